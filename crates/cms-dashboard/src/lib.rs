//! CMS dashboard library
//!
//! Ties the widget data model (`widget-schema`) to the key/value store
//! (`kv-store`) and provides the configuration and logging used by the
//! `cmsd` binary.

/// Configuration loading, defaults and XDG path resolution.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// Widget persistence on top of the store.
pub mod repository;

pub use repository::{RepositoryError, WidgetRepository, WIDGETS_KEY};
