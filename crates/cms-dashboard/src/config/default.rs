//! Default configuration template and file creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// Commented TOML template holding every default value.
///
/// Every value here must match `Config::default()`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# CMS Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/cms-dashboard/config.toml

# ==============================================================================
# Store
# ==============================================================================

[store]

# Where widget data and other entries are kept.
# Options: "file", "memory"
#   file   - one JSON file, rewritten atomically on every change
#   memory - kept in-process only and lost on exit (useful for dry runs)
backend = "file"

# Store file used by the file backend.
# Empty string means the platform data directory:
#   $XDG_DATA_HOME/cms-dashboard/store.json or ~/.local/share/cms-dashboard/store.json
# Tilde (~) is expanded to the user's home directory.
path = ""

# Size limit in bytes for the memory backend (keys plus encoded values).
# Writes that would exceed it are rejected. 0 means unlimited.
quota_bytes = 0

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity when CMSD_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
# CMSD_LOG accepts full filter directives, e.g. CMSD_LOG=kv_store=debug,warn
level = "info"
"#;

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, renames it to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the template, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
