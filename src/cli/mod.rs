//! CLI command handlers

pub mod commands;

pub use commands::{list, run, show};
