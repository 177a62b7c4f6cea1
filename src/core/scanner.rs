//! Row scanning: the engine's core iteration.
//!
//! A scanner walks a worksheet's rows with a cursor, applying a filter to the
//! configured filter column and extracting one [`RowTriple`] per qualifying
//! row. Each step returns an owned [`ScanStep`] so the scan is a pure function
//! of (worksheet, cursor, filter); the cursor only ever moves forward, which
//! bounds the iteration by the sheet's row count.

use crate::core::columns::ColumnMap;
use crate::types::{RowTriple, Sheet};

/// Partition filter applied to the filter column's trimmed cell text.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Row qualifies only when the cell equals the value
    Exact(String),
    /// Row qualifies unless the cell is one of the listed values
    Exclude(Vec<String>),
}

impl FilterSpec {
    pub fn matches(&self, cell_text: &str) -> bool {
        match self {
            FilterSpec::Exact(value) => cell_text == value,
            FilterSpec::Exclude(values) => !values.iter().any(|v| v == cell_text),
        }
    }
}

/// Outcome of one scan step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStep {
    /// Extraction from the found row; empty when no row qualified
    pub triple: RowTriple,
    /// Whether a qualifying row was found at or after the start index
    pub found: bool,
    /// Where the next scan must start (found row + 1)
    pub next_row: usize,
    /// True only when the found row sits strictly before the last row
    pub has_more: bool,
}

/// Scans a worksheet's rows against resolved column tables.
pub struct RowScanner<'a> {
    sheet: &'a Sheet,
    column_map: &'a ColumnMap,
    out_columns: &'a [Option<usize>],
    text_col: Option<usize>,
    filter_col: Option<usize>,
}

impl<'a> RowScanner<'a> {
    pub fn new(
        sheet: &'a Sheet,
        column_map: &'a ColumnMap,
        out_columns: &'a [Option<usize>],
        text_field: &str,
        filter_field: &str,
    ) -> Self {
        Self {
            sheet,
            column_map,
            out_columns,
            text_col: column_map.column_for_xl_field(text_field),
            filter_col: column_map.column_for_xl_field(filter_field),
        }
    }

    /// Find the first qualifying row at or after `start_row` and extract its
    /// triple. An unresolved filter column qualifies every row.
    pub fn scan(&self, start_row: usize, filter: &FilterSpec, in_fields: &[String]) -> ScanStep {
        let last_row = self.sheet.last_row();

        for row in start_row..=last_row {
            if let Some(filter_col) = self.filter_col {
                let cell_text = self.sheet.cell(row, filter_col).as_trimmed();
                if !filter.matches(&cell_text) {
                    continue;
                }
            }

            return ScanStep {
                triple: self.extract_row(row, in_fields),
                found: true,
                next_row: row + 1,
                has_more: row < last_row,
            };
        }

        ScanStep {
            triple: RowTriple::default(),
            found: false,
            next_row: start_row + 1,
            has_more: false,
        }
    }

    /// Drive [`scan`](Self::scan) from `start_row` until exhausted,
    /// accumulating one triple per qualifying row in row order. A trailing
    /// all-empty extraction on the last row is dropped.
    pub fn collect_from(
        &self,
        start_row: usize,
        filter: &FilterSpec,
        in_fields: &[String],
    ) -> Vec<RowTriple> {
        let mut triples = Vec::new();
        let mut row = start_row;

        loop {
            let step = self.scan(row, filter, in_fields);
            if !step.has_more && step.triple.is_empty() {
                break;
            }
            triples.push(step.triple);
            row = step.next_row;
            if !step.has_more || row > self.sheet.last_row() {
                break;
            }
        }

        triples
    }

    fn extract_row(&self, row: usize, in_fields: &[String]) -> RowTriple {
        let text = match self.text_col {
            Some(col) => self.sheet.cell(row, col).as_trimmed(),
            None => String::new(),
        };

        // Input fields resolve through the logical field names; unresolved
        // fields are skipped entirely, not emitted as empty values
        let in_parts: Vec<String> = in_fields
            .iter()
            .filter_map(|field| self.column_map.column_for_field(field.trim()))
            .map(|col| self.sheet.cell(row, col).as_trimmed())
            .collect();

        let out_parts: Vec<String> = self
            .out_columns
            .iter()
            .filter_map(|col| *col)
            .map(|col| self.sheet.cell(row, col).as_trimmed())
            .collect();

        RowTriple {
            text,
            in_list: in_parts.join(","),
            out_list: out_parts.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::columns::map_columns;
    use crate::types::CellValue;
    use pretty_assertions::assert_eq;

    fn filter_sheet() -> Sheet {
        Sheet::new(vec![
            vec!["Filter".into(), "Text".into()],
            vec!["A".into(), "x1".into()],
            vec!["B".into(), "x2".into()],
            vec!["A".into(), "x3".into()],
        ])
    }

    #[test]
    fn test_exact_filter_scan_steps() {
        let sheet = filter_sheet();
        let map = map_columns("Filter,Text", "Filter,Text", &sheet);
        let scanner = RowScanner::new(&sheet, &map, &[], "Text", "Filter");
        let filter = FilterSpec::Exact("A".into());

        let first = scanner.scan(1, &filter, &[]);
        assert!(first.found);
        assert_eq!(first.triple.text, "x1");
        assert_eq!(first.next_row, 2);
        assert!(first.has_more);

        // Row 2 does not match and is skipped; row 3 is the last row
        let second = scanner.scan(first.next_row, &filter, &[]);
        assert_eq!(second.triple.text, "x3");
        assert_eq!(second.next_row, 4);
        assert!(!second.has_more);
    }

    #[test]
    fn test_scan_no_match_from_start_index() {
        let sheet = filter_sheet();
        let map = map_columns("Filter,Text", "Filter,Text", &sheet);
        let scanner = RowScanner::new(&sheet, &map, &[], "Text", "Filter");

        let step = scanner.scan(1, &FilterSpec::Exact("Z".into()), &[]);
        assert!(!step.found);
        assert!(!step.has_more);
        assert!(step.triple.is_empty());
    }

    #[test]
    fn test_exclusion_filter() {
        let sheet = filter_sheet();
        let map = map_columns("Filter,Text", "Filter,Text", &sheet);
        let scanner = RowScanner::new(&sheet, &map, &[], "Text", "Filter");

        let triples = scanner.collect_from(1, &FilterSpec::Exclude(vec!["A".into()]), &[]);
        let texts: Vec<&str> = triples.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["x2"]);
    }

    #[test]
    fn test_collect_preserves_row_order() {
        let sheet = filter_sheet();
        let map = map_columns("Filter,Text", "Filter,Text", &sheet);
        let scanner = RowScanner::new(&sheet, &map, &[], "Text", "Filter");

        let triples = scanner.collect_from(1, &FilterSpec::Exact("A".into()), &[]);
        let texts: Vec<&str> = triples.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["x1", "x3"]);
    }

    #[test]
    fn test_unresolved_filter_column_matches_every_row() {
        let sheet = filter_sheet();
        let map = map_columns("Filter,Text", "Filter,Text", &sheet);
        let scanner = RowScanner::new(&sheet, &map, &[], "Text", "NoSuchField");

        let triples = scanner.collect_from(1, &FilterSpec::Exact("A".into()), &[]);
        assert_eq!(triples.len(), 3);
    }

    #[test]
    fn test_in_and_out_list_extraction() {
        let sheet = Sheet::new(vec![
            vec!["Order_No".into(), "Status".into(), "Code".into()],
            vec![CellValue::Number(1001.0), "Active".into(), "C1".into()],
        ]);
        let map = map_columns("Order_No,Status,Code", "OrderNo,Status,Code", &sheet);
        let out_columns = vec![map.column_for_field("Code"), None];
        let scanner = RowScanner::new(&sheet, &map, &out_columns, "Order_No", "Status");

        let step = scanner.scan(
            1,
            &FilterSpec::Exact("Active".into()),
            &["OrderNo".into(), "Status".into(), "Unknown".into()],
        );
        assert_eq!(step.triple.text, "1001");
        assert_eq!(step.triple.in_list, "1001,Active");
        assert_eq!(step.triple.out_list, "C1");
    }
}
