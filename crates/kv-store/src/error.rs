//! Error types for kv-store
//!
//! The plain `DataService` operations swallow these errors and log them; the
//! `try_*` operations hand them back to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Value could not be encoded to, or decoded from, JSON text
    #[error("Failed to (de)serialize value for key '{key}': {source}")]
    Serialization {
        /// Key being written or read
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Write rejected because the store would exceed its size quota
    #[error("Storage quota exceeded writing '{key}': {required} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Total bytes the store would hold after the write
        required: usize,
        /// Configured quota in bytes
        quota: usize,
    },

    /// I/O error reading the backing file
    #[error("Failed to read store file: {path}")]
    Io {
        /// Path to the store file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but is not a JSON object of strings
    #[error("Store file is corrupt: {path}: {message}")]
    Corrupt {
        /// Path to the store file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Failed to write the backing file atomically
    #[error("Failed to write store atomically: {path} - Safety copy at: {temp_path}")]
    Write {
        /// Path to the store file
        path: PathBuf,
        /// Path to the temporary file holding the new contents
        temp_path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Some entries of an import could not be saved
    #[error("Import incomplete: {} of {total} entries failed ({})", .failed.len(), .failed.join(", "))]
    Import {
        /// Keys that were not saved
        failed: Vec<String>,
        /// Number of entries in the snapshot
        total: usize,
    },
}

/// Result type alias for kv-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exceeded_display() {
        let err = StoreError::QuotaExceeded {
            key: "widgets".to_string(),
            required: 6000,
            quota: 5000,
        };
        let display = err.to_string();
        assert!(display.contains("widgets"), "Error should contain key");
        assert!(display.contains("6000"), "Error should contain required size");
        assert!(display.contains("5000"), "Error should contain quota");
    }

    #[test]
    fn test_write_display_mentions_safety_copy() {
        let err = StoreError::Write {
            path: PathBuf::from("/data/store.json"),
            temp_path: PathBuf::from("/data/store.json.tmp.20260203-143022"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = err.to_string();
        assert!(display.contains("/data/store.json"));
        assert!(display.contains("store.json.tmp.20260203-143022"));
        assert!(display.contains("Safety copy"));
    }

    #[test]
    fn test_import_display_lists_keys() {
        let err = StoreError::Import {
            failed: vec!["a".to_string(), "b".to_string()],
            total: 5,
        };
        let display = err.to_string();
        assert!(display.contains("2 of 5"));
        assert!(display.contains("a, b"));
    }

    #[test]
    fn test_serialization_source_chain() {
        let json_err = serde_json::from_str::<u32>("nope").expect_err("invalid json");
        let err = StoreError::Serialization {
            key: "count".to_string(),
            source: json_err,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
