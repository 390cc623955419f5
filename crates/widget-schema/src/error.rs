//! Error types for widget-schema
//!
//! Every violation of a widget, widget type or setting invariant maps to one
//! variant here, so callers can report all problems of a schema at once.

use thiserror::Error;

use crate::setting::SettingKind;

/// Schema and invariant violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A setting value does not match the declared setting type
    #[error("Setting '{key}' expects {expected} but got {actual}")]
    SettingTypeMismatch {
        /// Setting key
        key: String,
        /// Declared type
        expected: SettingKind,
        /// Type of the supplied value
        actual: SettingKind,
    },

    /// A select setting declares no options
    #[error("Select setting '{0}' has no options")]
    MissingOptions(String),

    /// A non-select setting declares options
    #[error("Setting '{key}' of type {kind} must not declare options")]
    UnexpectedOptions {
        /// Setting key
        key: String,
        /// Declared type
        kind: SettingKind,
    },

    /// A select value is not one of the declared options
    #[error("Setting '{key}' value '{value}' is not one of its options")]
    InvalidSelectValue {
        /// Setting key
        key: String,
        /// Offending value
        value: String,
    },

    /// Two settings in one schema share a key
    #[error("Duplicate setting key '{0}'")]
    DuplicateSettingKey(String),

    /// A required setting has no value
    #[error("Missing required setting '{0}'")]
    MissingRequiredSetting(String),

    /// A value was supplied for a key the schema does not declare
    #[error("Unknown setting '{key}' for widget type '{widget_type}'")]
    UnknownSetting {
        /// Widget type id
        widget_type: String,
        /// Setting key
        key: String,
    },

    /// A widget expected to carry menu content does not
    #[error("Widget '{0}' does not carry menu content")]
    NotAMenu(String),

    /// A widget type id is registered twice
    #[error("Widget type already registered: {0}")]
    DuplicateWidgetType(String),

    /// A stored widget claims to be updated before it was created
    #[error("Widget '{id}' has updatedAt {updated_at} before createdAt {created_at}")]
    TimestampOrder {
        /// Widget id
        id: String,
        /// Creation timestamp (RFC 3339)
        created_at: String,
        /// Update timestamp (RFC 3339)
        updated_at: String,
    },
}

/// Result type alias for widget-schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
