//! XML assembly for ruleset documents.
//!
//! Four pure steps mirror the document structure: open the header, optionally
//! emit the loop marker, append one list block per sequence pass, close the
//! container. The document shape follows the downstream integration format
//! (SiebelMessage → IntObject → BusinessComponent → List → Rules).

use crate::types::RowTriple;
use quick_xml::escape::escape;

/// Open the document: header naming the output container and the document
/// name (the `%` placeholder already substituted by the caller).
pub fn xml_create(dvm_name: &str, business_component: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SiebelMessage MessageId="" MessageType="Integration Object" IntObjectName="{dvm_name}">
  <IntObject>
    <BusinessComponent Name="{business_component}">"#
    )
}

/// Loop marker emitted immediately inside the header when the loop flag is
/// set. The downstream format leaves it unclosed.
pub fn xml_add_loop() -> &'static str {
    "\n      <Loop>"
}

/// Append one list block: return code, 1-based sequence number, every
/// non-suppressed default field, and a nested rule collection when any rows
/// were accumulated for the pass.
pub fn xml_add_list(
    return_code: &str,
    default_values: &str,
    sequence: usize,
    triples: &[RowTriple],
) -> String {
    let mut xml = format!(
        "\n      <List>\n        <ReturnCode>{return_code}</ReturnCode>\n        <Sequence>{sequence}</Sequence>"
    );

    for default in parse_default_values(default_values) {
        xml.push_str(&format!(
            "\n        <{field}>{value}</{field}>",
            field = default.field,
            value = escape(&default.value),
        ));
    }

    if !triples.is_empty() {
        xml.push_str("\n        <Rules>");
        for triple in triples {
            xml.push_str(&format!(
                "\n          <Rule>\n            <Text>{}</Text>\n            <InList>{}</InList>\n            <OutList>{}</OutList>\n          </Rule>",
                escape(&triple.text),
                escape(&triple.in_list),
                escape(&triple.out_list),
            ));
        }
        xml.push_str("\n        </Rules>");
    }

    xml.push_str("\n      </List>");
    xml
}

/// Close the document. The consumed field-name list (possibly `,Loop`
/// suffixed) is informational and does not gate emission.
pub fn xml_close(_consumed_fields: &str) -> &'static str {
    "\n    </BusinessComponent>\n  </IntObject>\n</SiebelMessage>"
}

/// One emitted default field/value pair.
#[derive(Debug, Clone, PartialEq)]
struct DefaultField {
    field: String,
    value: String,
}

/// Parse the default-value specification: `|`-separated groups of
/// `container,fieldName,marker,value`. A marker of `-` with no value
/// suppresses the field; otherwise the 4th element (falling back to the 3rd
/// when absent) is the emitted literal.
fn parse_default_values(spec: &str) -> Vec<DefaultField> {
    let mut defaults = Vec::new();

    for group in spec.split('|') {
        let parts: Vec<&str> = group.split(',').collect();
        if parts.len() < 3 {
            continue;
        }
        let field = parts[1].trim().to_string();
        let value = parts
            .get(3)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .or_else(|| parts.get(2).map(|s| s.trim()).filter(|s| !s.is_empty()))
            .unwrap_or("-");
        if value == "-" {
            continue;
        }
        defaults.push(DefaultField {
            field,
            value: value.to_string(),
        });
    }

    defaults
}
