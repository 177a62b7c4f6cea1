//! Macro definition documents: parsing and registry access.

pub mod parser;
pub mod registry;

pub use parser::{parse_config, parse_definition};
pub use registry::MacroRegistry;
