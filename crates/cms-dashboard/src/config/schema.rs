//! TOML configuration schema.
//!
//! Every struct uses `#[serde(default)]`, so a partial or empty file fills
//! the gaps with built-in values. Unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// ```toml
/// [store]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where and how the key/value store is kept.
    pub store: StoreConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// JSON file on disk.
    #[default]
    File,
    /// Process-local map, discarded on exit.
    Memory,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend kind.
    pub backend: BackendKind,
    /// Store file path for the file backend. Empty means the platform data
    /// directory; a leading `~` is expanded.
    pub path: String,
    /// Byte quota for the memory backend. 0 means unlimited.
    pub quota_bytes: u64,
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity used when `CMSD_LOG` is unset.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
