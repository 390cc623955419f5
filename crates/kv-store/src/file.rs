//! File-backed storage
//!
//! The whole map lives in memory and is mirrored to a single pretty-printed
//! JSON object file. Every mutation rewrites the file with the atomic
//! temp-file-then-rename pattern:
//! 1. Write to `<name>.tmp.<timestamp>.<pid>.<n>` next to the store file
//! 2. Fsync to disk
//! 3. Rename over the store file
//!
//! If the rename fails the temp file is left behind as a safety copy and the
//! in-memory map keeps its previous contents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;

use crate::backend::StorageBackend;
use crate::error::{Result, StoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Store persisted as one JSON object file
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileBackend {
    /// Open the store at `path`.
    ///
    /// A missing or empty file is an empty store; nothing is written until
    /// the first mutation.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the file exists but cannot be read
    /// - `StoreError::Corrupt` if it is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            read_entries(&path)?
        } else {
            log::debug!("No store file at {}, starting empty", path.display());
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the map, persist it, then commit it.
    fn commit<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut next = self.entries.clone();
        change(&mut next);
        write_entries_atomic(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Sibling temp path for `path`, distinct per process and per write.
fn temp_path_for(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let pid = process::id();
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store.json".to_string());
    path.with_file_name(format!("{file_name}.tmp.{timestamp}.{pid}.{n}"))
}

fn write_entries_atomic(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    let temp_path = temp_path_for(path);

    let write_error = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        temp_path: temp_path.clone(),
        source,
    };

    // Create directory if missing
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Serialization {
        key: String::new(),
        source: e,
    })?;

    fs::write(&temp_path, json).map_err(write_error)?;

    // Fsync
    let file = fs::File::open(&temp_path).map_err(write_error)?;
    file.sync_all().map_err(write_error)?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(write_error)?;

    Ok(())
}

impl StorageBackend for FileBackend {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<()> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        self.commit(|entries| {
            entries.remove(key);
        })?;
        Ok(true)
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.commit(BTreeMap::clear)
    }
}
