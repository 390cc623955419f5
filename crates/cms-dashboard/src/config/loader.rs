//! Configuration file loader with position-aware error reporting.
//!
//! A missing file at the default location yields `Config::default()`; a
//! missing file at an explicitly requested path is an error.

use std::fs;
use std::path::{Path, PathBuf};

use kv_store::{DataService, MemoryBackend};

use crate::config::error::ConfigError;
use crate::config::schema::{BackendKind, Config, StoreConfig};
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse_toml(&content, path)
    }

    /// Load configuration from the default XDG location, or defaults if absent.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// `load_from_path` for an explicit path, `load_default` otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Self::load_default(),
        }
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| {
                    let line = content[..span.start].matches('\n').count() + 1;
                    let last_newline = content[..span.start]
                        .rfind('\n')
                        .map(|p| p + 1)
                        .unwrap_or(0);
                    (line, span.start - last_newline + 1)
                })
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

impl StoreConfig {
    /// Resolved store file path for the file backend.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            kv_store::default_store_path()
        } else {
            xdg::expand_tilde(self.path.trim())
        }
    }

    /// Build the configured [`DataService`].
    ///
    /// `override_path` forces the file backend at that path.
    ///
    /// # Errors
    ///
    /// Any error from opening the store file.
    pub fn open_service(&self, override_path: Option<&Path>) -> kv_store::Result<DataService> {
        if let Some(path) = override_path {
            return DataService::open(path);
        }
        match self.backend {
            BackendKind::File => {
                let path = self.resolved_path();
                tracing::debug!("Opening store at {}", path.display());
                DataService::open(path)
            }
            BackendKind::Memory if self.quota_bytes > 0 => {
                let quota = usize::try_from(self.quota_bytes).unwrap_or(usize::MAX);
                Ok(DataService::new(MemoryBackend::with_quota(quota)))
            }
            BackendKind::Memory => Ok(DataService::in_memory()),
        }
    }
}
