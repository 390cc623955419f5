//! Serialization-safe key/value persistence
//!
//! This crate provides a string-keyed store of JSON-encoded values with the
//! semantics of browser local storage: typed save/load with default
//! fallback, remove, exists, clear, and full-store export/import for backups.
//!
//! # Backends
//!
//! - [`FileBackend`]: one JSON object file, rewritten atomically on every change
//! - [`MemoryBackend`]: in-process map with an optional byte quota
//!
//! # Error handling
//!
//! The plain operations never fail: encoding, decoding and storage errors
//! are logged through the `log` facade and the call degrades to a no-op or
//! to the caller's default. The `try_*` operations return [`StoreError`]
//! instead.
//!
//! # Examples
//!
//! ```
//! use kv_store::DataService;
//!
//! let store = DataService::in_memory();
//! store.save("theme", "dark");
//! assert_eq!(store.load("theme", String::from("light")), "dark");
//! assert_eq!(store.load("missing", 10), 10);
//!
//! let backup = store.export_data();
//! store.clear();
//! store.import_data(&backup);
//! assert!(store.exists("theme"));
//! ```

#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod global;
mod service;
mod snapshot;

// Re-export all public types
pub use backend::{MemoryBackend, StorageBackend};
pub use error::{Result, StoreError};
pub use file::FileBackend;
pub use global::{default_store_path, global, init_global};
pub use service::DataService;
pub use snapshot::{RawEntry, Snapshot, SnapshotValue};
