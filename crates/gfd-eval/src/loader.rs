//! Script sources.
//!
//! The evaluator never touches the filesystem directly: it asks a
//! [`ScriptLoader`] for a file's text, so tests can run entirely against
//! in-memory scripts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolves script names to their text. Load failures are reported as a
/// plain reason string; the evaluator attaches the position.
pub trait ScriptLoader {
    fn load(&self, file: &str) -> Result<String, String>;
}

/// Append the script extension when the name carries none.
pub fn resolve_name(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.gfd")
    }
}

/// Loads scripts from a root directory. Import targets resolve relative
/// to the root, not to the importing file.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ScriptLoader for FsLoader {
    fn load(&self, file: &str) -> Result<String, String> {
        std::fs::read_to_string(self.root.join(file)).map_err(|e| e.to_string())
    }
}

/// In-memory script set for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: BTreeMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script under its full name (extension included).
    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.files.insert(name.to_string(), text.to_string());
        self
    }
}

impl ScriptLoader for MemoryLoader {
    fn load(&self, file: &str) -> Result<String, String> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| "no such script".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name_appends_extension() {
        assert_eq!(resolve_name("triangle"), "triangle.gfd");
        assert_eq!(resolve_name("triangle.gfd"), "triangle.gfd");
        assert_eq!(resolve_name("figure.txt"), "figure.txt");
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with("a.gfd", "A = random_point");
        assert_eq!(loader.load("a.gfd").unwrap(), "A = random_point");
        assert!(loader.load("b.gfd").is_err());
    }
}
