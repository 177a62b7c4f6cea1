//! Resolution of declared field names to physical worksheet columns.

use crate::types::Sheet;

/// Field-name → column tables resolved against one worksheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Declared worksheet field names (header-row spellings)
    pub xl_fields: Vec<String>,
    /// Declared logical field names, parallel to `xl_fields`
    pub fields: Vec<String>,
    /// Detected header row
    pub header_row: usize,
    /// Column index per declared field, `None` when the header lacks it
    pub columns: Vec<Option<usize>>,
}

impl ColumnMap {
    /// Column for a worksheet field name (text and filter fields resolve here).
    pub fn column_for_xl_field(&self, name: &str) -> Option<usize> {
        let idx = self.xl_fields.iter().position(|f| f == name)?;
        self.columns[idx]
    }

    /// Column for a logical field name (input and output fields resolve here).
    pub fn column_for_field(&self, name: &str) -> Option<usize> {
        let idx = self.fields.iter().position(|f| f == name)?;
        self.columns[idx]
    }
}

/// Resolve the declared field names against a worksheet.
///
/// The header row is found by scanning column 0 top-to-bottom for the first
/// cell matching the first declared worksheet field name; this tolerates
/// leading title rows without an explicit header-row parameter. No match
/// defaults the header row to 0. Each declared field then resolves by exact
/// trimmed-text match on the header row, left to right.
pub fn map_columns(all_xl_fields: &str, all_fields: &str, sheet: &Sheet) -> ColumnMap {
    let xl_fields: Vec<String> = all_xl_fields.split(',').map(|f| f.trim().to_string()).collect();
    let fields: Vec<String> = all_fields.split(',').map(|f| f.trim().to_string()).collect();

    let anchor = xl_fields.first().map(String::as_str).unwrap_or("");
    let mut header_row = 0;
    for row in 0..=sheet.last_row() {
        if sheet.cell(row, 0).as_trimmed() == anchor {
            header_row = row;
            break;
        }
    }

    let width = sheet.col_count();
    let columns = xl_fields
        .iter()
        .map(|xl_field| (0..width).find(|&col| sheet.cell(header_row, col).as_trimmed() == *xl_field))
        .collect();

    ColumnMap {
        xl_fields,
        fields,
        header_row,
        columns,
    }
}
