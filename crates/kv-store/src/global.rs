//! Process-wide store instance
//!
//! Exactly one global [`DataService`] exists per process. It is created on
//! first access and lives until the process exits. Callers that need a
//! different backend install one with [`init_global`] before anything calls
//! [`global`]; tests and libraries should prefer passing a `DataService`
//! explicitly.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::service::DataService;

const APP_NAME: &str = "cms-dashboard";

static GLOBAL: OnceLock<DataService> = OnceLock::new();

/// Returns the path of the default store file.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/cms-dashboard/store.json` (if set and non-empty, any platform)
/// 2. Platform data directory:
///    - Linux: `~/.local/share/cms-dashboard/store.json`
///    - macOS: `~/Library/Application Support/cms-dashboard/store.json`
/// 3. The system temp directory when no home directory can be determined
pub fn default_store_path() -> PathBuf {
    let base = std::env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::data_dir)
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_NAME).join("store.json")
}

/// Install `service` as the global instance.
///
/// # Errors
///
/// Returns the service back if the global instance already exists.
pub fn init_global(service: DataService) -> Result<(), DataService> {
    GLOBAL.set(service)
}

/// The global store, opening [`default_store_path`] on first use.
///
/// If the store file cannot be opened the error is logged and an in-memory
/// store is used for the rest of the process, so nothing written will
/// survive a restart.
pub fn global() -> &'static DataService {
    GLOBAL.get_or_init(|| {
        let path = default_store_path();
        match DataService::open(&path) {
            Ok(service) => {
                log::debug!("Opened store at {}", path.display());
                service
            }
            Err(e) => {
                log::error!("{}; falling back to in-memory store", e);
                DataService::in_memory()
            }
        }
    })
}
