use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Per-book cache of parsed bundle files.
///
/// Entries are only ever inserted, never replaced or evicted. Failed loads are
/// not stored, so an error is returned again on the next call.
pub struct BookCache<T> {
    enabled: bool,
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T> BookCache<T> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, or run `load` and remember its result
    pub fn get_or_load<F>(&self, key: &str, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if !self.enabled {
            return load().map(Arc::new);
        }

        if let Some(hit) = self.read_entries().get(key) {
            return Ok(hit.clone());
        }

        let value = Arc::new(load()?);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        // Another reader may have won the race; keep the first value
        let stored = entries.entry(key.to_string()).or_insert(value).clone();
        debug!("Cached {} ({} entries)", key, entries.len());
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<T>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }
}
