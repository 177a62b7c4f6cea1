use serde::Serialize;
use std::collections::HashMap;

//==============================================================================
// Dataset Model
//==============================================================================

/// A single worksheet cell (string | number | boolean | empty).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// Render the cell as trimmed text, the form every engine comparison and
    /// extraction works on. Empty cells render as `""`, never a "null" token.
    pub fn as_trimmed(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Format a number for cell text, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places; spreadsheet cells rarely carry more and this
    // removes float artifacts from the Excel reader
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A 2-D grid of cells addressed by absolute 0-based (row, column).
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Cell at (row, col); out-of-range addresses read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Index of the last row (0 for an empty sheet, matching an `A1` range).
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of columns in the widest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A named collection of sheets, fully buffered for one engine invocation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    sheets: HashMap<String, Sheet>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        self.sheets.insert(name.into(), sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

//==============================================================================
// Macro Configuration
//==============================================================================

/// Configuration constants extracted from one macro definition document.
///
/// Every field defaults to an empty string (or `false` for the loop flag) when
/// the definition declares no value; downstream components tolerate partially
/// empty configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroConfig {
    /// Target worksheet name
    pub xl_sheet: String,
    /// Declared worksheet field names (comma-separated, header-row spellings)
    pub all_xl_fields: String,
    /// Declared logical field names (comma-separated, parallel to the above)
    pub all_fields: String,
    /// Worksheet field holding the rule text
    pub in_xl_text: String,
    /// Worksheet field the partition filter applies to
    pub in_xl_filter: String,
    /// Filter value set for legacy releases (comma-separated)
    pub in_xl_filter_values_old: String,
    /// Filter value set for current releases (comma-separated)
    pub in_xl_filter_values_new: String,
    /// Input field names (comma-separated)
    pub in_fields: String,
    /// Worksheet holding the sequence table
    pub in_fields_seq_tab: String,
    /// Output document name template (`%` placeholder)
    pub out_dvm: String,
    /// Output file name template (`%` placeholder)
    pub out_file: String,
    /// Numeric return code emitted per list block
    pub out_return_code: String,
    /// Output business component name
    pub out_bc: String,
    /// Output field names (comma-separated)
    pub out_fields: String,
    /// Default-value specification (`|`-separated 4-tuples)
    pub out_default: String,
    /// Wrap output rows in a loop marker
    pub out_loop: bool,
}

/// A named macro definition with its extracted configuration and raw source.
#[derive(Debug, Clone)]
pub struct ParsedMacroDefinition {
    pub name: String,
    pub config: MacroConfig,
    pub source: String,
}

//==============================================================================
// Execution Results
//==============================================================================

/// The (text, inList, outList) extraction unit produced per matching row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTriple {
    pub text: String,
    pub in_list: String,
    pub out_list: String,
}

impl RowTriple {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.in_list.is_empty() && self.out_list.is_empty()
    }
}

/// One output document produced per (macro definition x filter partition).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroResult {
    pub xml_content: String,
    pub file_name: String,
    pub success: bool,
    pub error: Option<String>,
}

impl MacroResult {
    pub fn success(xml_content: String, file_name: String) -> Self {
        Self {
            xml_content,
            file_name,
            success: true,
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            xml_content: String::new(),
            file_name: String::new(),
            success: false,
            error: Some(error),
        }
    }
}

/// Aggregate of every macro result across all applicable definitions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AutoDetectResult {
    pub results: Vec<MacroResult>,
    /// Names of macro definitions that were executed, in registry order
    pub executed: Vec<String>,
    /// Skipped definitions, each with its reason appended in parentheses
    pub skipped: Vec<String>,
}
