//! Auto-detection: run every applicable macro definition against a dataset.

use crate::core::executor::execute_macro;
use crate::macros::MacroRegistry;
use crate::types::{AutoDetectResult, Dataset};

/// Return code substituted when a definition declares none.
const DEFAULT_RETURN_CODE: &str = "1000";

/// Check every registered macro definition against the dataset's sheets and
/// execute the applicable ones, aggregating all results in registry order.
/// One bad definition never blocks the others: its failure is recorded as a
/// failed result, not raised.
pub fn auto_detect_and_execute(
    dataset: &Dataset,
    registry: &MacroRegistry,
    release: &str,
) -> AutoDetectResult {
    let mut detect = AutoDetectResult::default();

    for name in registry.list() {
        let Some(definition) = registry.load(&name) else {
            detect.skipped.push(format!("{name} (definition not readable)"));
            continue;
        };

        let mut config = definition.config;
        if config.xl_sheet.is_empty() {
            detect.skipped.push(format!("{name} (no target sheet configured)"));
            continue;
        }
        if !dataset.has_sheet(&config.xl_sheet) {
            detect
                .skipped
                .push(format!("{name} (sheet \"{}\" not found)", config.xl_sheet));
            continue;
        }

        if config.out_return_code.is_empty() {
            config.out_return_code = DEFAULT_RETURN_CODE.to_string();
        }

        tracing::debug!(macro_name = %name, sheet = %config.xl_sheet, "executing macro");
        detect.results.extend(execute_macro(dataset, &config, release));
        detect.executed.push(name);
    }

    detect
}
