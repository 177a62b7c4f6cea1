//! Rulegen - DVM ruleset generation from Excel workbooks
//!
//! This library turns declarative macro definitions plus a tabular dataset
//! (an Excel workbook with multiple named sheets) into one or more ruleset
//! XML documents.
//!
//! # How it works
//!
//! - Macro definitions are small text documents of named constants (target
//!   sheet, field lists, filter rules, output templates)
//! - Auto-detection checks which definitions apply to a workbook by sheet
//!   presence
//! - Matching rows are partitioned by a filter dimension, one output document
//!   per partition, scanned in sequence-defined passes
//!
//! # Example
//!
//! ```no_run
//! use rulegen::core::auto_detect_and_execute;
//! use rulegen::excel::ExcelImporter;
//! use rulegen::macros::MacroRegistry;
//!
//! let dataset = ExcelImporter::new("workbook.xlsx").import()?;
//! let registry = MacroRegistry::new("macros");
//! let detect = auto_detect_and_execute(&dataset, &registry, "R2.1");
//!
//! for result in &detect.results {
//!     println!("{}: {}", result.file_name, result.success);
//! }
//! # Ok::<(), rulegen::error::RulegenError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod macros;
pub mod types;

// Re-export commonly used types
pub use error::{RulegenError, RulegenResult};
pub use types::{AutoDetectResult, Dataset, MacroConfig, MacroResult, RowTriple, Sheet};
