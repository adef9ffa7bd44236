// src/store/storage.rs
//! String key-value storage backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::{PinError, Result};

/// A string-to-string key-value store, the shape of a browser's local storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keeps every entry in memory. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A single JSON object file mapping keys to string values.
///
/// The whole file is rewritten on every `set` and `remove`, through a
/// temporary file that is renamed over the original.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Create an empty storage file. Fails if the file already exists.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(PinError::AlreadyInitialized);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let storage = Self {
            path: path.to_path_buf(),
            entries: BTreeMap::new(),
        };
        storage.flush()?;
        Ok(storage)
    }

    /// Open an existing storage file.
    ///
    /// Content that is not a JSON object is logged and ignored, and so is any
    /// entry whose value is not a string. The file is left as it is until
    /// the next write.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PinError::NotInitialized);
        }

        let raw = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: parse_entries(path, &raw),
        })
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            PinError::Storage(format!("could not replace {}: {}", self.path.display(), e))
        })
    }
}

fn parse_entries(path: &Path, raw: &str) -> BTreeMap<String, String> {
    if raw.trim().is_empty() {
        return BTreeMap::new();
    }

    let values: BTreeMap<String, Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage file is not a key-value object, starting empty");
            return BTreeMap::new();
        }
    };

    values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(value) => Some((key, value)),
            _ => {
                warn!(path = %path.display(), key = %key, "dropping non-string storage entry");
                None
            }
        })
        .collect()
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(previous) => self.entries.insert(key.to_string(), previous),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

/// Storage whose writes fail while the shared switch is on.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct FailingStorage {
    inner: MemoryStorage,
    pub fail_writes: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(test)]
impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if self.fail_writes.get() {
            return Err(PinError::Storage("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(PinError::Storage("disk full".to_string()));
        }
        self.inner.remove(key)
    }
}
