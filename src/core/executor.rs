//! Macro execution: one output document per filter partition.

use crate::core::assembler;
use crate::core::columns::{map_columns, ColumnMap};
use crate::core::scanner::{FilterSpec, RowScanner};
use crate::core::sequence::read_sequence;
use crate::error::{RulegenError, RulegenResult};
use crate::types::{Dataset, MacroConfig, MacroResult};

/// Release identifiers that select the legacy filter value set.
const LEGACY_RELEASE_TOKEN: &str = "202109";
const LEGACY_RELEASE_PREFIX: &str = "R1.0";

/// Partition value meaning "every value not otherwise declared".
const WILDCARD: &str = "%";

const OUTPUT_EXTENSION: &str = ".xml";

/// True when the release identifier selects the legacy filter value set.
pub fn is_legacy_release(release: &str) -> bool {
    release == LEGACY_RELEASE_TOKEN || release.starts_with(LEGACY_RELEASE_PREFIX)
}

/// Run one macro configuration against a dataset, producing one result per
/// filter partition. Any failure while running the macro is captured as a
/// single failed [`MacroResult`]; nothing propagates past this boundary.
pub fn execute_macro(dataset: &Dataset, config: &MacroConfig, release: &str) -> Vec<MacroResult> {
    match run(dataset, config, release) {
        Ok(results) => results,
        Err(e) => vec![MacroResult::failure(e.to_string())],
    }
}

fn run(dataset: &Dataset, config: &MacroConfig, release: &str) -> RulegenResult<Vec<MacroResult>> {
    let sheet = dataset
        .sheet(&config.xl_sheet)
        .ok_or_else(|| RulegenError::SheetNotFound(config.xl_sheet.clone()))?;

    let column_map = map_columns(&config.all_xl_fields, &config.all_fields, sheet);
    let out_columns = resolve_out_columns(&config.out_fields, &column_map);

    // One pass per sequence token; no sequence table means one default pass
    let sequence = read_sequence(dataset, &config.in_fields_seq_tab);
    let tokens: Vec<&str> = if sequence.is_empty() {
        vec![""]
    } else {
        sequence.split(';').collect()
    };

    let filter_values = if is_legacy_release(release) {
        &config.in_xl_filter_values_old
    } else {
        &config.in_xl_filter_values_new
    };
    let partition_values: Vec<&str> = filter_values.split(',').map(str::trim).collect();

    let scanner = RowScanner::new(
        sheet,
        &column_map,
        &out_columns,
        &config.in_xl_text,
        &config.in_xl_filter,
    );

    let mut results = Vec::new();

    for partition_value in &partition_values {
        let (suffix, filter) = if *partition_value == WILDCARD {
            // The wildcard partition excludes every other declared value
            let others: Vec<String> = partition_values
                .iter()
                .filter(|v| **v != WILDCARD)
                .map(|v| v.to_string())
                .collect();
            (String::new(), FilterSpec::Exclude(others))
        } else {
            (
                format!("-{partition_value}"),
                FilterSpec::Exact(partition_value.to_string()),
            )
        };

        tracing::debug!(
            sheet = %config.xl_sheet,
            partition = %partition_value,
            passes = tokens.len(),
            "building partition document"
        );

        let dvm_name = config.out_dvm.replacen('%', &suffix, 1);
        let mut xml = assembler::xml_create(&dvm_name, &config.out_bc);

        let mut loop_suffix = "";
        if config.out_loop {
            xml.push_str(assembler::xml_add_loop());
            loop_suffix = ",Loop";
        }

        for (pass, token) in tokens.iter().enumerate() {
            let in_fields: Vec<String> = token.split(',').map(|f| f.trim().to_string()).collect();
            let triples = scanner.collect_from(1, &filter, &in_fields);
            xml.push_str(&assembler::xml_add_list(
                &config.out_return_code,
                &config.out_default,
                pass + 1,
                &triples,
            ));
        }

        let consumed_fields = format!("{}{}", config.in_fields, loop_suffix);
        xml.push_str(assembler::xml_close(&consumed_fields));

        let file_name = format!("{}{}", config.out_file.replacen('%', &suffix, 1), OUTPUT_EXTENSION);
        results.push(MacroResult::success(xml, file_name));
    }

    Ok(results)
}

/// Output fields resolve by logical name against the resolved field table;
/// unresolved fields are skipped at extraction time.
fn resolve_out_columns(out_fields: &str, column_map: &ColumnMap) -> Vec<Option<usize>> {
    out_fields
        .split(',')
        .map(|field| column_map.column_for_field(field.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sheet;
    use pretty_assertions::assert_eq;

    fn config() -> MacroConfig {
        MacroConfig {
            xl_sheet: "IntAssign".into(),
            all_xl_fields: "Order_No,Status,Text".into(),
            all_fields: "OrderNo,Status,Text".into(),
            in_xl_text: "Text".into(),
            in_xl_filter: "Status".into(),
            in_xl_filter_values_old: "A".into(),
            in_xl_filter_values_new: "A,%".into(),
            in_fields: "OrderNo".into(),
            out_dvm: "Assignment%".into(),
            out_file: "assignment%".into(),
            out_return_code: "1000".into(),
            out_bc: "Data Validation".into(),
            out_fields: "OrderNo".into(),
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.insert_sheet(
            "IntAssign",
            Sheet::new(vec![
                vec!["Order_No".into(), "Status".into(), "Text".into()],
                vec!["1".into(), "A".into(), "t1".into()],
                vec!["2".into(), "B".into(), "t2".into()],
            ]),
        );
        dataset
    }

    #[test]
    fn test_release_rule() {
        assert!(is_legacy_release("202109"));
        assert!(is_legacy_release("R1.0-beta"));
        assert!(!is_legacy_release("R2.1"));
    }

    #[test]
    fn test_one_result_per_partition() {
        let results = execute_macro(&dataset(), &config(), "R2.1");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file_name, "assignment-A.xml");
        // Wildcard partition has an empty name suffix
        assert_eq!(results[1].file_name, "assignment.xml");
        assert!(results.iter().all(|r| r.success));
    }

    #[test]
    fn test_legacy_release_selects_old_value_set() {
        let results = execute_macro(&dataset(), &config(), "R1.0");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_name, "assignment-A.xml");
    }

    #[test]
    fn test_missing_sheet_yields_single_failed_result() {
        let results = execute_macro(&Dataset::new(), &config(), "R2.1");
        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].error.as_deref().unwrap().contains("IntAssign"));
    }

    #[test]
    fn test_idempotent_execution() {
        let dataset = dataset();
        let config = config();
        let first = execute_macro(&dataset, &config, "R2.1");
        let second = execute_macro(&dataset, &config, "R2.1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_loop_flag_emits_marker() {
        let mut config = config();
        config.out_loop = true;
        let results = execute_macro(&dataset(), &config, "R1.0");
        assert!(results[0].xml_content.contains("<Loop>"));
    }

    #[test]
    fn test_partitions_are_mutually_exclusive() {
        let results = execute_macro(&dataset(), &config(), "R2.1");
        // "A" rows land in the exact partition only
        assert!(results[0].xml_content.contains("<Text>t1</Text>"));
        assert!(!results[1].xml_content.contains("<Text>t1</Text>"));
        // "B" is undeclared, so it lands in the wildcard partition only
        assert!(results[1].xml_content.contains("<Text>t2</Text>"));
        assert!(!results[0].xml_content.contains("<Text>t2</Text>"));
    }
}
