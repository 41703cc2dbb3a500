// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value store abstraction with file-backed and in-memory implementations.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// A durable store of string slots addressed by name.
pub trait KeyValueStore {
    /// Read a slot; `None` if it was never written or has been removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Store keeping each slot in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                operation: "read",
                path,
                source,
            }),
        }
    }

    /// Writes to a temp file and renames it over the slot.
    ///
    /// The temp file is removed again if writing or renaming fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source,
        })?;

        if let Err(e) = write_and_replace(&temp_path, &path, value) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %temp_path.display(),
                        error = %cleanup,
                        "Failed to remove temp slot file"
                    );
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                operation: "remove",
                path,
                source,
            }),
        }
    }
}

fn write_and_replace(temp_path: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    let mut file = File::create(temp_path).map_err(|source| StorageError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;
    file.write_all(value.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|source| StorageError::Io {
            operation: "write",
            path: temp_path.to_path_buf(),
            source,
        })?;

    fs::rename(temp_path, path).map_err(|source| StorageError::Io {
        operation: "replace",
        path: path.to_path_buf(),
        source,
    })
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            available: true,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with `StorageError::Unavailable`.
    pub fn new_unavailable() -> Self {
        Self {
            slots: HashMap::new(),
            available: false,
        }
    }

    /// Pre-populate a slot.
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Toggle availability, e.g. to simulate a full disk mid-session.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.slots.remove(key);
        Ok(())
    }
}
