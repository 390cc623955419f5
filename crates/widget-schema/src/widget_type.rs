//! Widget type catalog entries

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::setting::{SettingValue, WidgetSetting};
use crate::widget::{Widget, WidgetContent};

/// A class of widgets and the schema of its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetType {
    /// Unique type id
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description for the type picker
    pub description: String,
    /// Grouping key in the type picker
    pub category: String,
    /// Glyph reference
    pub icon: String,
    /// Content given to new widgets of this type
    #[serde(default)]
    pub default_content: WidgetContent,
    /// Editable settings, in form order
    #[serde(default)]
    pub settings_schema: Vec<WidgetSetting>,
}

impl WidgetType {
    /// Looks up a setting definition by key.
    pub fn setting(&self, key: &str) -> Option<&WidgetSetting> {
        self.settings_schema.iter().find(|s| s.key == key)
    }

    /// Every setting's default value, keyed by setting key.
    pub fn default_settings(&self) -> BTreeMap<String, SettingValue> {
        self.settings_schema
            .iter()
            .map(|s| (s.key.clone(), s.default_value.clone()))
            .collect()
    }

    /// Creates a widget of this type, seeded with the default content and
    /// default settings.
    pub fn instantiate(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        position: impl Into<String>,
    ) -> Widget {
        Widget::new(id, self.id.clone(), title, position)
            .with_seed(self.default_content.clone(), self.default_settings())
    }

    /// Check the schema definition.
    ///
    /// # Errors
    ///
    /// - `DuplicateSettingKey` if two settings share a key
    /// - any error from [`WidgetSetting::validate`]
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for setting in &self.settings_schema {
            if !seen.insert(setting.key.as_str()) {
                return Err(SchemaError::DuplicateSettingKey(setting.key.clone()));
            }
            setting.validate()?;
        }
        Ok(())
    }

    /// Check a widget's settings against this schema, collecting every violation.
    pub fn validate_settings(
        &self,
        settings: &BTreeMap<String, SettingValue>,
    ) -> std::result::Result<(), Vec<SchemaError>> {
        let mut errors = Vec::new();

        for setting in &self.settings_schema {
            match settings.get(&setting.key) {
                Some(value) => {
                    if let Err(e) = setting.check_value(value) {
                        errors.push(e);
                    }
                }
                None if setting.required => {
                    errors.push(SchemaError::MissingRequiredSetting(setting.key.clone()));
                }
                None => {}
            }
        }

        for key in settings.keys() {
            if self.setting(key).is_none() {
                errors.push(SchemaError::UnknownSetting {
                    widget_type: self.id.clone(),
                    key: key.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::{SelectOption, SettingKind};

    fn gallery() -> WidgetType {
        WidgetType {
            id: "gallery".to_string(),
            name: "Gallery".to_string(),
            description: "Image grid".to_string(),
            category: "media".to_string(),
            icon: "images".to_string(),
            default_content: WidgetContent::Empty,
            settings_schema: vec![
                WidgetSetting::new("columns", "Columns", SettingValue::Number(3.0)).required(),
                WidgetSetting::select(
                    "layout",
                    "Layout",
                    "grid",
                    vec![SelectOption::new("grid", "Grid"), SelectOption::new("list", "List")],
                ),
                WidgetSetting::new("caption", "Caption", SettingValue::Text(String::new()))
                    .with_description("Shown under the grid"),
            ],
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(gallery().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_keys() {
        let mut ty = gallery();
        ty.settings_schema
            .push(WidgetSetting::new("columns", "Again", SettingValue::Number(1.0)));
        assert_eq!(
            ty.validate(),
            Err(SchemaError::DuplicateSettingKey("columns".to_string()))
        );
    }

    #[test]
    fn test_instantiate_seeds_defaults() {
        let widget = gallery().instantiate("g-1", "Photos", "main");
        assert_eq!(widget.widget_type(), "gallery");
        assert_eq!(widget.settings().len(), 3);
        assert_eq!(widget.setting("layout"), Some(&SettingValue::Select("grid".into())));
        assert!(gallery().validate_settings(widget.settings()).is_ok());
    }

    #[test]
    fn test_validate_settings_collects_all_violations() {
        let mut settings = BTreeMap::new();
        settings.insert("layout".to_string(), SettingValue::Select("masonry".into()));
        settings.insert("caption".to_string(), SettingValue::Number(1.0));
        settings.insert("autoplay".to_string(), SettingValue::Boolean(true));

        let errors = gallery()
            .validate_settings(&settings)
            .expect_err("should report violations");
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&SchemaError::MissingRequiredSetting("columns".into())));
        assert!(errors.iter().any(|e| matches!(e, SchemaError::InvalidSelectValue { .. })));
        assert!(errors.iter().any(|e| matches!(
            e,
            SchemaError::SettingTypeMismatch { expected: SettingKind::Text, .. }
        )));
        assert!(errors.iter().any(|e| matches!(e, SchemaError::UnknownSetting { key, .. } if key == "autoplay")));
    }

    #[test]
    fn test_optional_settings_may_be_absent() {
        let mut settings = BTreeMap::new();
        settings.insert("columns".to_string(), SettingValue::Number(4.0));
        assert!(gallery().validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_widget_type_roundtrip() {
        let ty = gallery();
        let json = serde_json::to_string(&ty).expect("serialization failed");
        assert!(json.contains("settingsSchema"));
        assert!(json.contains("defaultContent"));
        let back: WidgetType = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(back, ty);
    }
}
