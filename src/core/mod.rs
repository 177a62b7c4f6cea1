//! The macro engine: column resolution, row scanning, document assembly,
//! per-macro execution and dataset-wide auto-detection.

pub mod assembler;
pub mod columns;
pub mod detect;
pub mod executor;
pub mod scanner;
pub mod sequence;

pub use columns::{map_columns, ColumnMap};
pub use detect::auto_detect_and_execute;
pub use executor::execute_macro;
pub use scanner::{FilterSpec, RowScanner, ScanStep};
pub use sequence::read_sequence;
