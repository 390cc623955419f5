//! Catalog data exchange tests
//!
//! Widget types are static catalog data that may be shipped as JSON by
//! plugins. These tests load type definitions from JSON documents and check
//! the resulting catalog behaves like the built-in one.

use serde_json::json;
use widget_schema::{
    SchemaError, SettingKind, SettingValue, WidgetCatalog, WidgetContent, WidgetType,
};

fn slider_json() -> serde_json::Value {
    json!({
        "id": "slider",
        "name": "Slider",
        "description": "Rotating banner",
        "category": "marketing",
        "icon": "film",
        "defaultContent": {"kind": "custom", "data": {"slides": []}},
        "settingsSchema": [
            {
                "key": "interval",
                "label": "Interval (s)",
                "type": "number",
                "defaultValue": {"type": "number", "value": 5.0},
                "required": true
            },
            {
                "key": "transition",
                "label": "Transition",
                "type": "select",
                "defaultValue": {"type": "select", "value": "fade"},
                "options": [
                    {"value": "fade", "label": "Fade"},
                    {"value": "slide", "label": "Slide"}
                ]
            }
        ]
    })
}

#[test]
fn test_register_plugin_type_from_json() {
    let ty: WidgetType = serde_json::from_value(slider_json()).expect("valid type json");
    let mut catalog = WidgetCatalog::with_builtins();
    catalog.register(ty).expect("register should succeed");

    let slider = catalog.get("slider").expect("slider registered");
    assert_eq!(slider.settings_schema[1].kind, SettingKind::Select);
    assert_eq!(catalog.by_category("marketing").len(), 3);

    let widget = slider.instantiate("hero", "Homepage hero", "header");
    assert_eq!(widget.setting("interval"), Some(&SettingValue::Number(5.0)));
    assert!(matches!(widget.content(), WidgetContent::Custom { .. }));
}

#[test]
fn test_plugin_type_with_bad_select_default_rejected() {
    let mut raw = slider_json();
    raw["settingsSchema"][1]["defaultValue"]["value"] = json!("zoom");
    let ty: WidgetType = serde_json::from_value(raw).expect("shape is valid");

    let mut catalog = WidgetCatalog::new();
    let err = catalog.register(ty).expect_err("invalid default");
    assert!(matches!(err, SchemaError::InvalidSelectValue { ref value, .. } if value == "zoom"));
}

#[test]
fn test_unknown_setting_type_fails_to_parse() {
    let mut raw = slider_json();
    raw["settingsSchema"][0]["type"] = json!("date");
    assert!(serde_json::from_value::<WidgetType>(raw).is_err());
}

#[test]
fn test_builtin_catalog_survives_json_roundtrip() {
    let builtin = WidgetCatalog::builtin();
    let exported = serde_json::to_string(&builtin.list()).expect("serialization failed");
    let imported: Vec<WidgetType> = serde_json::from_str(&exported).expect("deserialization failed");

    let mut catalog = WidgetCatalog::new();
    for ty in imported {
        catalog.register(ty).expect("built-in types are valid");
    }
    assert_eq!(catalog.len(), builtin.len());
    assert_eq!(catalog.get("newsletter"), builtin.get("newsletter"));
}
