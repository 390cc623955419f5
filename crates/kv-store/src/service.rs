//! Typed key/value facade over a [`StorageBackend`]
//!
//! Values are stored as JSON text. Each write operation comes in two forms:
//! - `try_*` returns the error to the caller
//! - the plain form logs the error at warn level and carries on, so callers
//!   that only care about best-effort persistence never see a failure
//!
//! The backend sits behind an `RwLock`: reads run concurrently, writes are
//! exclusive. Writers in other processes sharing the same file are not
//! coordinated; the last write wins.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{MemoryBackend, StorageBackend};
use crate::error::{Result, StoreError};
use crate::file::FileBackend;
use crate::snapshot::{Snapshot, SnapshotValue};

/// Serialization-safe key/value store
#[derive(Debug)]
pub struct DataService {
    backend: RwLock<Box<dyn StorageBackend>>,
}

impl DataService {
    /// Wraps an existing backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: RwLock::new(Box::new(backend)),
        }
    }

    /// Creates a service over an unbounded in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Opens a file-backed service.
    ///
    /// # Errors
    ///
    /// See [`FileBackend::open`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(FileBackend::open(path)?))
    }

    // A panic while holding the lock cannot leave the map half-written
    // (backends commit after persisting), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Box<dyn StorageBackend>> {
        self.backend.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Box<dyn StorageBackend>> {
        self.backend.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// - `StoreError::Serialization` if the value cannot be encoded
    /// - any backend write error (`QuotaExceeded`, `Write`, ...)
    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.write().set_raw(key, text)?;
        log::trace!("Saved '{}'", key);
        Ok(())
    }

    /// Best-effort [`try_save`](Self::try_save): failures are logged, not returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            log::warn!("Failed to save '{}': {}", key, e);
        }
    }

    /// Store text verbatim, bypassing encoding.
    pub fn try_save_raw(&self, key: &str, text: impl Into<String>) -> Result<()> {
        self.write().set_raw(key, text.into())
    }

    /// Decode the value stored under `key`.
    ///
    /// Returns `Ok(None)` for an absent key.
    ///
    /// # Errors
    ///
    /// `StoreError::Serialization` if the stored text does not decode as `T`.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(text) = self.read().get_raw(key) else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                key: key.to_string(),
                source,
            })
    }

    /// Value under `key`, or `default` if absent or undecodable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Failed to load '{}', using default: {}", key, e);
                default
            }
        }
    }

    /// Raw text stored under `key`.
    pub fn load_raw(&self, key: &str) -> Option<String> {
        self.read().get_raw(key)
    }

    /// Remove `key`, returning whether it was present.
    pub fn try_remove(&self, key: &str) -> Result<bool> {
        self.write().delete(key)
    }

    /// Remove `key` if present; a missing key is a no-op.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            log::warn!("Failed to remove '{}': {}", key, e);
        }
    }

    /// Whether `key` has an entry, whatever its value.
    pub fn exists(&self, key: &str) -> bool {
        self.read().contains(key)
    }

    /// Delete every entry.
    pub fn try_clear(&self) -> Result<()> {
        self.write().clear()
    }

    /// Delete every entry; failures are logged.
    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            log::warn!("Failed to clear store: {}", e);
        }
    }

    /// Every key, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read().keys().len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every entry, decoded where possible.
    ///
    /// Taken under one read lock, so concurrent writers cannot interleave.
    pub fn export_data(&self) -> Snapshot {
        let backend = self.read();
        backend
            .keys()
            .into_iter()
            .filter_map(|key| {
                let text = backend.get_raw(&key)?;
                Some((key, SnapshotValue::from_stored(&text)))
            })
            .collect()
    }

    /// Save every snapshot entry, overwriting existing keys.
    ///
    /// Not transactional: every entry is attempted, and entries saved before
    /// a failure stay saved. Raw entries are restored verbatim.
    ///
    /// # Errors
    ///
    /// `StoreError::Import` naming the keys that could not be saved.
    pub fn try_import_data(&self, snapshot: &Snapshot) -> Result<usize> {
        let mut failed = Vec::new();
        for (key, value) in snapshot.iter() {
            let result = match value {
                SnapshotValue::Value(v) => self.try_save(key, v),
                SnapshotValue::Raw(entry) => self.try_save_raw(key, entry.raw.clone()),
            };
            if let Err(e) = result {
                log::warn!("Failed to import '{}': {}", key, e);
                failed.push(key.clone());
            }
        }
        if failed.is_empty() {
            log::debug!("Imported {} entries", snapshot.len());
            Ok(snapshot.len())
        } else {
            Err(StoreError::Import {
                failed,
                total: snapshot.len(),
            })
        }
    }

    /// Best-effort [`try_import_data`](Self::try_import_data).
    pub fn import_data(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_import_data(snapshot) {
            log::warn!("{}", e);
        }
    }
}

impl Default for DataService {
    fn default() -> Self {
        Self::in_memory()
    }
}
