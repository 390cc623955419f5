//! Widget data model for the CMS dashboard
//!
//! This crate defines the records the dashboard persists: widgets placed in
//! layout positions, the catalog of widget types with their settings schemas,
//! and navigation menus. It carries shape and invariants only; storage is
//! handled by the `kv-store` crate.
//!
//! # Wire format
//!
//! Every type serializes to camelCase JSON, timestamps as RFC 3339 strings.
//! Setting values and widget content are tagged enums:
//!
//! ```json
//! {"type": "color", "value": "#ff0000"}
//! {"kind": "text", "body": "<p>Hello</p>"}
//! ```
//!
//! # Examples
//!
//! ```
//! use widget_schema::{widgets_in_position, WidgetCatalog};
//!
//! let catalog = WidgetCatalog::builtin();
//! let ty = catalog.get("text").expect("built-in type");
//!
//! let mut about = ty.instantiate("about", "About us", "sidebar");
//! about.set_order(2);
//! let promo = ty.instantiate("promo", "Spring sale", "sidebar");
//!
//! let widgets = vec![about, promo];
//! let ids: Vec<&str> = widgets_in_position(&widgets, "sidebar")
//!     .into_iter()
//!     .map(|w| w.id())
//!     .collect();
//! assert_eq!(ids, ["promo", "about"]);
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod menu;
mod setting;
mod widget;
mod widget_type;

pub use catalog::WidgetCatalog;
pub use error::{Result, SchemaError};
pub use menu::{LinkTarget, MenuContent, MenuItem, MenuItemKind, MenuStyle, MenuTheme, MenuWidget};
pub use setting::{SelectOption, SettingKind, SettingValue, WidgetSetting};
pub use widget::{sort_widgets, widgets_in_position, Widget, WidgetContent};
pub use widget_type::WidgetType;
