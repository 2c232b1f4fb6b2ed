use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::VizResult;

/// Key-value string storage backing the mock session.
pub trait SessionStore {
    fn get(&self, key: &str) -> VizResult<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> VizResult<()>;

    fn remove(&mut self, key: &str) -> VizResult<()>;
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> VizResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> VizResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> VizResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object of string values.
///
/// The whole file is rewritten on every mutation. A missing or unparsable file
/// reads as an empty store and is replaced on the next write.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> VizResult<IndexMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(IndexMap::new()),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => Ok(entries),
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "session store is not a JSON object of strings; starting empty"
                    );
                    Ok(IndexMap::new())
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(IndexMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &IndexMap<String, String>) -> VizResult<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        trace!(path = %self.path.display(), entries = entries.len(), "wrote session store");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> VizResult<Option<String>> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> VizResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> VizResult<()> {
        let mut entries = self.read_all()?;
        if entries.shift_remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
