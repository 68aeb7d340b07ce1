//! Key-value storage backends for cart snapshots.
//!
//! The trait mirrors the browser local-storage contract the widget was built
//! against: string keys, string values, get/set/remove. The store never talks
//! to a backend directly; it goes through the snapshot codec in
//! [`snapshot`](crate::snapshot).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage failures, by phase.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("failed to read storage key {key:?}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing or removing a key failed.
    #[error("failed to write storage key {key:?}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be serialized.
    #[error("failed to encode cart snapshot")]
    Encode(#[source] serde_json::Error),

    /// Stored data under a key did not parse as a cart snapshot.
    #[error("cart snapshot under key {key:?} is corrupt")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Local-storage-shaped key-value contract.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backend fails; a missing key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend fails.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to simulate a previous session.
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Whether a key currently exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under a directory.
///
/// Used by the CLI so a cart survives between invocations the way the
/// browser widget's cart survives page loads.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys may contain path separators; flatten them to keep every entry
        // directly under the storage directory.
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(file)
    }

    /// The directory entries live under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let wrap = |source| StorageError::Write {
            key: key.to_owned(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(wrap)?;
        fs::write(self.path_for(key), value).map_err(wrap)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
