//! Parser for macro definition documents.
//!
//! Definitions are free-text documents carrying VBA-style constant
//! declarations. The parser scans for two declaration shapes:
//!
//! ```text
//! Const gcsXLSheet As String = "IntAssign"
//! Const gcbOutLoop As Boolean = True
//! ```
//!
//! Each recognized constant name feeds one [`MacroConfig`] field through a
//! declarative schema table; unknown names are ignored so new constants in a
//! definition never break parsing. Parsing is pure and never fails: a
//! malformed or partial definition simply yields a partially-empty config.

use crate::types::{MacroConfig, ParsedMacroDefinition};
use regex::Regex;

/// Which [`MacroConfig`] slot a recognized constant feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    XlSheet,
    AllXlFields,
    AllFields,
    InXlText,
    InXlFilter,
    InXlFilterValuesOld,
    InXlFilterValuesNew,
    InFields,
    InFieldsSeqTab,
    OutDvm,
    OutFile,
    OutReturnCode,
    OutBc,
    OutFields,
    OutDefault,
    OutLoop,
}

/// The fixed constant-name schema: (recognized name, target slot).
const CONSTANT_TABLE: &[(&str, Slot)] = &[
    ("gcsXLSheet", Slot::XlSheet),
    ("gcsAllXLFields", Slot::AllXlFields),
    ("gcsAllFields", Slot::AllFields),
    ("gcsInXLText", Slot::InXlText),
    ("gcsInXLFilter", Slot::InXlFilter),
    ("gcsInXLFilterValuesOld", Slot::InXlFilterValuesOld),
    ("gcsInXLFilterValuesNew", Slot::InXlFilterValuesNew),
    ("gcsInFields", Slot::InFields),
    ("gcsInFieldsSeqTab", Slot::InFieldsSeqTab),
    ("gcsOutDVM", Slot::OutDvm),
    ("gcsOutFile", Slot::OutFile),
    ("gcsOutReturnCode", Slot::OutReturnCode),
    ("gcsOutBC", Slot::OutBc),
    ("gcsOutFields", Slot::OutFields),
    ("gcsOutDefault", Slot::OutDefault),
    ("gcbOutLoop", Slot::OutLoop),
];

fn lookup_slot(name: &str) -> Option<Slot> {
    CONSTANT_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, slot)| *slot)
}

fn assign_string(config: &mut MacroConfig, slot: Slot, value: &str) {
    let field = match slot {
        Slot::XlSheet => &mut config.xl_sheet,
        Slot::AllXlFields => &mut config.all_xl_fields,
        Slot::AllFields => &mut config.all_fields,
        Slot::InXlText => &mut config.in_xl_text,
        Slot::InXlFilter => &mut config.in_xl_filter,
        Slot::InXlFilterValuesOld => &mut config.in_xl_filter_values_old,
        Slot::InXlFilterValuesNew => &mut config.in_xl_filter_values_new,
        Slot::InFields => &mut config.in_fields,
        Slot::InFieldsSeqTab => &mut config.in_fields_seq_tab,
        Slot::OutDvm => &mut config.out_dvm,
        Slot::OutFile => &mut config.out_file,
        Slot::OutReturnCode => &mut config.out_return_code,
        Slot::OutBc => &mut config.out_bc,
        Slot::OutFields => &mut config.out_fields,
        Slot::OutDefault => &mut config.out_default,
        // The loop flag is boolean-only; a string declaration for it is ignored
        Slot::OutLoop => return,
    };
    *field = value.to_string();
}

/// Extract a [`MacroConfig`] from raw definition text. Never fails.
pub fn parse_config(text: &str) -> MacroConfig {
    let string_pattern = Regex::new(r#"(?i)Const\s+(\w+)\s+As\s+String\s*=\s*"([^"]*)""#)
        .expect("string constant pattern is valid");
    let bool_pattern = Regex::new(r"(?i)Const\s+(\w+)\s+As\s+Boolean\s*=\s*(True|False)")
        .expect("boolean constant pattern is valid");

    let mut config = MacroConfig::default();

    for caps in string_pattern.captures_iter(text) {
        if let Some(slot) = lookup_slot(&caps[1]) {
            assign_string(&mut config, slot, &caps[2]);
        }
    }

    for caps in bool_pattern.captures_iter(text) {
        if lookup_slot(&caps[1]) == Some(Slot::OutLoop) {
            config.out_loop = caps[2].eq_ignore_ascii_case("true");
        }
    }

    config
}

/// Parse one definition document into a named, immutable record.
pub fn parse_definition(name: &str, text: &str) -> ParsedMacroDefinition {
    ParsedMacroDefinition {
        name: name.to_string(),
        config: parse_config(text),
        source: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_string_constants() {
        let text = r#"
Const gcsXLSheet As String = "IntAssign"
Const gcsAllXLFields As String = "Order_No,Status"
Const gcsOutDVM As String = "Assignment%"
"#;
        let config = parse_config(text);
        assert_eq!(config.xl_sheet, "IntAssign");
        assert_eq!(config.all_xl_fields, "Order_No,Status");
        assert_eq!(config.out_dvm, "Assignment%");
        assert_eq!(config.out_file, "");
    }

    #[test]
    fn test_parse_boolean_constant() {
        assert!(parse_config(r#"Const gcbOutLoop As Boolean = True"#).out_loop);
        assert!(!parse_config(r#"Const gcbOutLoop As Boolean = False"#).out_loop);
        assert!(!parse_config("").out_loop);
    }

    #[test]
    fn test_unknown_constants_ignored() {
        let text = r#"
Const gcsSomethingNew As String = "value"
Const gcbOtherFlag As Boolean = True
Const gcsXLSheet As String = "Sheet1"
"#;
        let config = parse_config(text);
        assert_eq!(config.xl_sheet, "Sheet1");
        assert!(!config.out_loop);
    }

    #[test]
    fn test_parse_never_fails_on_malformed_text() {
        for text in ["", "Const = = =", "not a definition at all", "Const gcsXLSheet As String = unquoted"] {
            let config = parse_config(text);
            assert_eq!(config, MacroConfig::default());
        }
    }

    #[test]
    fn test_declarations_inside_surrounding_prose() {
        // Definitions are stored as markdown; declarations sit inside code fences
        let text = "# IntAssign macro\n\n```vba\nPublic Const gcsXLSheet As String = \"IntAssign\"\n```\n";
        assert_eq!(parse_config(text).xl_sheet, "IntAssign");
    }

    #[test]
    fn test_string_declaration_for_loop_flag_ignored() {
        let config = parse_config(r#"Const gcbOutLoop As String = "True""#);
        assert!(!config.out_loop);
    }

    #[test]
    fn test_parse_definition_keeps_source() {
        let text = r#"Const gcsXLSheet As String = "S""#;
        let def = parse_definition("int_assign", text);
        assert_eq!(def.name, "int_assign");
        assert_eq!(def.config.xl_sheet, "S");
        assert_eq!(def.source, text);
    }
}
