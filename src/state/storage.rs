//! Durable key-value storage for client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plays the role browser `localStorage` plays for a web client: the session
//! store persists into it and the HTTP adapter reads the bearer token back out
//! of it on every request. Values are strings; JSON helpers sit on top.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String key-value store that survives process restarts.
pub trait Storage: Send + Sync {
    /// Read the value for `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load a JSON value stored under `key`.
///
/// Unreadable storage and undecodable values both yield `None`; callers treat
/// them as "nothing persisted".
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, key, "storage read failed");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, key, "discarding undecodable stored value");
            None
        }
    }
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error when the value cannot be encoded or the write fails.
pub fn save_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Durable only for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Storage backed by a single JSON object file.
///
/// Every read goes to disk so separate handles on the same file observe each
/// other's writes. Writes go through a sibling temp file and a rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
