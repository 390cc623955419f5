//! Widget setting schema types
//!
//! A [`WidgetSetting`] describes one editable field of a widget type. Values
//! for those fields are carried as [`SettingValue`], a tagged enum with one
//! variant per [`SettingKind`], so a match over a value is exhaustive over
//! every field type the editor can render.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Editable field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Single-line text
    Text,
    /// Multi-line text
    Textarea,
    /// Numeric input
    Number,
    /// Checkbox / toggle
    Boolean,
    /// One value out of a fixed option list
    Select,
    /// Colour picker (CSS colour string)
    Color,
    /// Image reference (URL or media id)
    Image,
}

impl SettingKind {
    /// Lowercase wire name, as used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKind::Text => "text",
            SettingKind::Textarea => "textarea",
            SettingKind::Number => "number",
            SettingKind::Boolean => "boolean",
            SettingKind::Select => "select",
            SettingKind::Color => "color",
            SettingKind::Image => "image",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value, tagged with the field type it belongs to.
///
/// Serialized as `{"type": "number", "value": 3.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SettingValue {
    /// Single-line text
    Text(String),
    /// Multi-line text
    Textarea(String),
    /// Numeric value
    Number(f64),
    /// Toggle state
    Boolean(bool),
    /// Selected option value
    Select(String),
    /// CSS colour string
    Color(String),
    /// Image reference
    Image(String),
}

impl SettingValue {
    /// The field type this value belongs to.
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Text(_) => SettingKind::Text,
            SettingValue::Textarea(_) => SettingKind::Textarea,
            SettingValue::Number(_) => SettingKind::Number,
            SettingValue::Boolean(_) => SettingKind::Boolean,
            SettingValue::Select(_) => SettingKind::Select,
            SettingValue::Color(_) => SettingKind::Color,
            SettingValue::Image(_) => SettingKind::Image,
        }
    }

    /// String payload for the text-like variants, `None` for number/boolean.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s)
            | SettingValue::Textarea(s)
            | SettingValue::Select(s)
            | SettingValue::Color(s)
            | SettingValue::Image(s) => Some(s),
            SettingValue::Number(_) | SettingValue::Boolean(_) => None,
        }
    }
}

/// One entry of a select setting's option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value
    pub value: String,
    /// Human-readable label
    pub label: String,
}

impl SelectOption {
    /// Creates an option from a value/label pair.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One configurable field within a widget type's settings schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSetting {
    /// Key, unique within its schema
    pub key: String,
    /// Field label
    pub label: String,
    /// Declared field type
    #[serde(rename = "type")]
    pub kind: SettingKind,
    /// Value used when a widget of this type is instantiated
    pub default_value: SettingValue,
    /// Option list, present only for select settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Whether a widget must carry a value for this key
    #[serde(default)]
    pub required: bool,
    /// Optional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WidgetSetting {
    /// Creates a non-required setting whose type is taken from the default value.
    pub fn new(key: impl Into<String>, label: impl Into<String>, default_value: SettingValue) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: default_value.kind(),
            default_value,
            options: None,
            required: false,
            description: None,
        }
    }

    /// Creates a select setting with the given options.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        default: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            options: Some(options),
            ..Self::new(key, label, SettingValue::Select(default.into()))
        }
    }

    /// Marks the setting as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches help text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the setting definition itself.
    ///
    /// # Errors
    ///
    /// - `SettingTypeMismatch` if the default value is of another type
    /// - `MissingOptions` / `UnexpectedOptions` if options do not follow the type
    /// - `InvalidSelectValue` if a select default is not among the options
    pub fn validate(&self) -> Result<()> {
        self.check_value(&self.default_value)?;
        match (self.kind, &self.options) {
            (SettingKind::Select, None) => Err(SchemaError::MissingOptions(self.key.clone())),
            (SettingKind::Select, Some(options)) if options.is_empty() => {
                Err(SchemaError::MissingOptions(self.key.clone()))
            }
            (SettingKind::Select, Some(_)) => Ok(()),
            (kind, Some(_)) => Err(SchemaError::UnexpectedOptions {
                key: self.key.clone(),
                kind,
            }),
            (_, None) => Ok(()),
        }
    }

    /// Check a value supplied for this setting.
    ///
    /// # Errors
    ///
    /// - `SettingTypeMismatch` if the value is of another type
    /// - `InvalidSelectValue` if a select value is not among the options
    pub fn check_value(&self, value: &SettingValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(SchemaError::SettingTypeMismatch {
                key: self.key.clone(),
                expected: self.kind,
                actual: value.kind(),
            });
        }
        if let (SettingValue::Select(selected), Some(options)) = (value, &self.options) {
            if !options.iter().any(|o| &o.value == selected) {
                return Err(SchemaError::InvalidSelectValue {
                    key: self.key.clone(),
                    value: selected.clone(),
                });
            }
        }
        Ok(())
    }
}
