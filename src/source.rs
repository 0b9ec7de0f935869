use crate::error::{BibleError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Read access to the static data bundle.
///
/// Names are `/`-separated paths relative to the bundle root, for example
/// `books/genesis.json`.
pub trait DataSource: Send + Sync {
    /// Returns `Ok(None)` when the bundle has no file by that name
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Short description used in log lines
    fn describe(&self) -> String;
}

/// Read and deserialize a JSON document, mapping absence to `NotFound`
pub fn read_json<T: DeserializeOwned>(source: &dyn DataSource, name: &str) -> Result<T> {
    let bytes = source
        .read(name)?
        .ok_or_else(|| BibleError::not_found(format!("data file {}", name)))?;
    serde_json::from_slice(&bytes).map_err(|e| BibleError::parse(name, e))
}

/// Rejects names that could leave the bundle root
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name.starts_with('/')
        || name.contains('\\')
        || name.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(BibleError::not_found(format!("data file {}", name)));
    }
    Ok(())
}

/// Bundle stored in a directory on disk
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirectorySource {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        validate_name(name)?;
        let path = name.split('/').fold(self.root.clone(), |p, part| p.join(part));
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// In-memory bundle for development/testing
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), contents.into());
    }

    pub fn with(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }
}

impl DataSource for MemorySource {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        validate_name(name)?;
        Ok(self.files.get(name).cloned())
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}
