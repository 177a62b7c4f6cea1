//! Excel importer implementation - Excel (.xlsx) → in-memory Dataset

use crate::error::{RulegenError, RulegenResult};
use crate::types::{CellValue, Dataset, Sheet};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;

/// Excel importer for materializing a workbook as an in-memory [`Dataset`].
pub struct ExcelImporter {
    path: std::path::PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the workbook. Every sheet is fully buffered before any scanning
    /// begins; cell addressing in the result is absolute 0-based (row, column).
    pub fn import(&self) -> RulegenResult<Dataset> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            RulegenError::Excel(format!("failed to open {}: {e}", self.path.display()))
        })?;

        let mut dataset = Dataset::new();
        let sheet_names = workbook.sheet_names().to_vec();

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                RulegenError::Excel(format!("failed to read sheet \"{sheet_name}\": {e}"))
            })?;
            dataset.insert_sheet(sheet_name, materialize(&range));
        }

        Ok(dataset)
    }
}

/// Build an absolutely-addressed grid from a calamine range. Ranges whose
/// data does not start at A1 are padded with empty cells so (row, column)
/// stays absolute.
fn materialize(range: &Range<Data>) -> Sheet {
    let Some((start_row, start_col)) = range.start() else {
        return Sheet::default();
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let (height, width) = range.get_size();

    let mut rows = vec![vec![CellValue::Empty; start_col + width]; start_row + height];
    for r in 0..height {
        for c in 0..width {
            if let Some(cell) = range.get((r, c)) {
                rows[start_row + r][start_col + c] = convert_cell(cell);
            }
        }
    }
    Sheet::new(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
