//! Raw string-keyed storage backends
//!
//! A backend stores opaque text under string keys, like browser local
//! storage. Encoding and decoding values is the job of
//! [`DataService`](crate::DataService).

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, StoreError};

/// Durable (or not) string → string map
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Raw text stored under `key`.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous entry.
    fn set_raw(&mut self, key: &str, value: String) -> Result<()>;

    /// Remove `key`, returning whether it was present.
    fn delete(&mut self, key: &str) -> Result<bool>;

    /// Whether an entry exists for `key`.
    fn contains(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// Every key, sorted.
    fn keys(&self) -> Vec<String>;

    /// Remove every entry.
    fn clear(&mut self) -> Result<()>;
}

/// Bytes an entry accounts for against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// In-process backend with an optional size quota
///
/// The quota counts key and value bytes of every entry. A write that would
/// take the total over the quota is rejected and leaves the store unchanged.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Creates an unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that rejects writes beyond `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes currently used.
    pub fn used(&self) -> usize {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }

    /// Configured quota in bytes, if any.
    pub fn quota(&self) -> Option<usize> {
        self.quota
    }
}

impl StorageBackend for MemoryBackend {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: String) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map(|old| entry_size(key, old))
                .unwrap_or(0);
            let required = self.used() - replaced + entry_size(key, &value);
            if required > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let mut backend = MemoryBackend::new();
        backend.set_raw("a", "1".to_string()).expect("set should succeed");
        assert_eq!(backend.get_raw("a"), Some("1".to_string()));
        assert!(backend.contains("a"));
        assert!(backend.delete("a").expect("delete should succeed"));
        assert!(!backend.delete("a").expect("delete should succeed"));
        assert!(backend.get_raw("a").is_none());
    }

    #[test]
    fn test_keys_sorted() {
        let mut backend = MemoryBackend::new();
        for key in ["widgets", "menus", "theme"] {
            backend.set_raw(key, "null".to_string()).expect("set should succeed");
        }
        assert_eq!(backend.keys(), vec!["menus", "theme", "widgets"]);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut backend = MemoryBackend::with_quota(10);
        backend.set_raw("k", "12345".to_string()).expect("fits in quota");
        assert_eq!(backend.used(), 6);

        let err = backend
            .set_raw("j", "123456".to_string())
            .expect_err("should exceed quota");
        assert!(matches!(err, StoreError::QuotaExceeded { required: 13, quota: 10, .. }));
        assert!(!backend.contains("j"), "rejected write leaves store unchanged");
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let mut backend = MemoryBackend::with_quota(10);
        backend.set_raw("k", "123456789".to_string()).expect("exactly at quota");
        backend
            .set_raw("k", "987654321".to_string())
            .expect("replacing an entry of equal size fits");
        assert_eq!(backend.get_raw("k"), Some("987654321".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut backend = MemoryBackend::new();
        backend.set_raw("a", "1".to_string()).expect("set should succeed");
        backend.clear().expect("clear should succeed");
        assert!(backend.keys().is_empty());
        assert_eq!(backend.used(), 0);
    }
}
