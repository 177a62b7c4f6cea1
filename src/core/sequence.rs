//! Sequence-table reading.

use crate::types::Dataset;

/// Read the ordered sequence tokens from an auxiliary sheet: every non-empty
/// trimmed value in column 0, top to bottom, joined with `;`. An absent sheet
/// yields an empty string, which the executor treats as one default pass.
pub fn read_sequence(dataset: &Dataset, tab_name: &str) -> String {
    let Some(sheet) = dataset.sheet(tab_name) else {
        return String::new();
    };

    let mut tokens = Vec::new();
    for row in 0..=sheet.last_row() {
        let value = sheet.cell(row, 0).as_trimmed();
        if !value.is_empty() {
            tokens.push(value);
        }
    }
    tokens.join(";")
}
