//! Filesystem-backed store of macro definition documents.

use crate::macros::parser;
use crate::types::ParsedMacroDefinition;
use std::fs;
use std::path::{Path, PathBuf};

/// Reserved aggregate document, excluded from enumeration.
const RESERVED_AGGREGATE: &str = "all";

const DEFINITION_EXTENSION: &str = "md";

/// Enumerates and loads macro definition documents from a directory.
pub struct MacroRegistry {
    dir: PathBuf,
}

impl MacroRegistry {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// List available definition names, sorted for deterministic processing
    /// order. An unreadable directory yields an empty list, not an error.
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "cannot read macros directory");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().and_then(|e| e.to_str()) != Some(DEFINITION_EXTENSION) {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?.to_string();
                if stem == RESERVED_AGGREGATE {
                    return None;
                }
                Some(stem)
            })
            .collect();
        names.sort();
        names
    }

    /// Load and parse one definition by name. An I/O failure on the document
    /// is reported as not-found, never as a fatal error.
    pub fn load(&self, name: &str) -> Option<ParsedMacroDefinition> {
        let path = self.dir.join(format!("{name}.{DEFINITION_EXTENSION}"));
        match fs::read_to_string(&path) {
            Ok(content) => Some(parser::parse_definition(name, &content)),
            Err(e) => {
                tracing::warn!(macro_name = name, error = %e, "cannot read macro definition");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn seed_registry(dir: &Path) {
        fs::write(dir.join("beta.md"), "Const gcsXLSheet As String = \"B\"").unwrap();
        fs::write(dir.join("alpha.md"), "Const gcsXLSheet As String = \"A\"").unwrap();
        fs::write(dir.join("all.md"), "aggregate document").unwrap();
        fs::write(dir.join("notes.txt"), "not a definition").unwrap();
    }

    #[test]
    fn test_list_sorted_excluding_reserved() {
        let dir = tempfile::tempdir().unwrap();
        seed_registry(dir.path());

        let registry = MacroRegistry::new(dir.path());
        assert_eq!(registry.list(), vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let registry = MacroRegistry::new("/nonexistent/macros/dir");
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_load_parses_definition() {
        let dir = tempfile::tempdir().unwrap();
        seed_registry(dir.path());

        let registry = MacroRegistry::new(dir.path());
        let def = registry.load("alpha").unwrap();
        assert_eq!(def.name, "alpha");
        assert_eq!(def.config.xl_sheet, "A");
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let registry = MacroRegistry::new(dir.path());
        assert!(registry.load("ghost").is_none());
    }
}
