//! Raw key/value commands: get, set, rm, exists, keys, clear, export, import.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use kv_store::{DataService, Snapshot};
use serde_json::Value;

/// Prints the value under `key` as pretty JSON.
pub(crate) fn run_get_command(store: &DataService, key: &str) -> ExitCode {
    match store.try_load::<Value>(key) {
        Ok(Some(value)) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            eprintln!("Error: key not found: {key}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(raw) = store.load_raw(key) {
                eprintln!("Stored text: {raw}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Stores `json` (parsed first, so only valid JSON is accepted) under `key`.
pub(crate) fn run_set_command(store: &DataService, key: &str, json: &str) -> ExitCode {
    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: value is not valid JSON: {e}");
            eprintln!("Hint: quote strings, e.g. '\"dark\"'");
            return ExitCode::FAILURE;
        }
    };
    match store.try_save(key, &value) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Removes `key`. A missing key is not an error.
pub(crate) fn run_rm_command(store: &DataService, key: &str) -> ExitCode {
    match store.try_remove(key) {
        Ok(true) => {
            println!("Removed {key}");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("{key} not present");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints `true`/`false`; the exit code mirrors the answer.
pub(crate) fn run_exists_command(store: &DataService, key: &str) -> ExitCode {
    let exists = store.exists(key);
    println!("{exists}");
    if exists {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub(crate) fn run_keys_command(store: &DataService) -> ExitCode {
    for key in store.keys() {
        println!("{key}");
    }
    ExitCode::SUCCESS
}

/// Deletes every entry; refuses unless `confirmed`.
pub(crate) fn run_clear_command(store: &DataService, confirmed: bool) -> ExitCode {
    if !confirmed {
        eprintln!("Error: refusing to delete every entry without --yes");
        return ExitCode::FAILURE;
    }
    let count = store.len();
    match store.try_clear() {
        Ok(()) => {
            println!("Cleared {count} entries");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Writes a backup document to `output`, or stdout.
pub(crate) fn run_export_command(store: &DataService, output: Option<&Path>) -> ExitCode {
    let snapshot = store.export_data();
    let text = match snapshot.to_json_string() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: failed to encode backup: {e}");
            return ExitCode::FAILURE;
        }
    };
    match output {
        Some(path) => match fs::write(path, format!("{text}\n")) {
            Ok(()) => {
                eprintln!("Exported {} entries to {}", snapshot.len(), path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to write {}: {e}", path.display());
                ExitCode::FAILURE
            }
        },
        None => {
            println!("{text}");
            ExitCode::SUCCESS
        }
    }
}

/// Restores a backup document, overwriting existing keys.
pub(crate) fn run_import_command(store: &DataService, file: &Path) -> ExitCode {
    let text = match fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: failed to read {}: {e}", file.display());
            return ExitCode::FAILURE;
        }
    };
    let snapshot = match Snapshot::from_json_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {} is not a backup document: {e}", file.display());
            return ExitCode::FAILURE;
        }
    };
    match store.try_import_data(&snapshot) {
        Ok(count) => {
            println!("Imported {count} entries");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
