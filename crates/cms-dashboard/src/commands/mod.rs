//! Command implementations for the `cmsd` CLI.
//!
//! - `store` - raw key/value access, backup and restore
//! - `widgets` - widget CRUD and the type catalog

pub(crate) mod store;
pub(crate) mod widgets;

pub(crate) use store::*;
pub(crate) use widgets::*;
