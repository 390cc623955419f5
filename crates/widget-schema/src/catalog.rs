//! Widget type catalog
//!
//! Maps widget type ids to their [`WidgetType`] definitions. The built-in
//! catalog is assembled once per process and shared read-only; callers that
//! add plugin types build their own catalog from [`WidgetCatalog::with_builtins`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Result, SchemaError};
use crate::menu::{MenuContent, MenuItem};
use crate::setting::{SelectOption, SettingValue, WidgetSetting};
use crate::widget::WidgetContent;
use crate::widget_type::WidgetType;

/// Registry of widget types keyed by id
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    types: BTreeMap<String, WidgetType>,
}

impl WidgetCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in types:
    /// - `text`
    /// - `image`
    /// - `menu`
    /// - `social-links`
    /// - `newsletter`
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for ty in builtin_types() {
            catalog.types.insert(ty.id.clone(), ty);
        }
        catalog
    }

    /// The shared built-in catalog.
    pub fn builtin() -> &'static WidgetCatalog {
        static BUILTIN: OnceLock<WidgetCatalog> = OnceLock::new();
        BUILTIN.get_or_init(WidgetCatalog::with_builtins)
    }

    /// Add a widget type.
    ///
    /// # Errors
    ///
    /// - `DuplicateWidgetType` if the id is already registered
    /// - any error from [`WidgetType::validate`]
    pub fn register(&mut self, ty: WidgetType) -> Result<()> {
        if self.types.contains_key(&ty.id) {
            return Err(SchemaError::DuplicateWidgetType(ty.id));
        }
        ty.validate()?;
        self.types.insert(ty.id.clone(), ty);
        Ok(())
    }

    /// Type registered under `id`.
    pub fn get(&self, id: &str) -> Option<&WidgetType> {
        self.types.get(id)
    }

    /// All types, sorted by id.
    pub fn list(&self) -> Vec<&WidgetType> {
        self.types.values().collect()
    }

    /// Types in one category, sorted by id.
    pub fn by_category(&self, category: &str) -> Vec<&WidgetType> {
        self.types.values().filter(|t| t.category == category).collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.types.values().map(|t| t.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn builtin_types() -> Vec<WidgetType> {
    vec![
        WidgetType {
            id: "text".to_string(),
            name: "Text".to_string(),
            description: "Free-form rich text block".to_string(),
            category: "content".to_string(),
            icon: "type".to_string(),
            default_content: WidgetContent::Text { body: String::new() },
            settings_schema: vec![
                WidgetSetting::new("show_title", "Show title", SettingValue::Boolean(true)),
                WidgetSetting::new("background", "Background", SettingValue::Color("#ffffff".into())),
            ],
        },
        WidgetType {
            id: "image".to_string(),
            name: "Image".to_string(),
            description: "Single image with optional link".to_string(),
            category: "media".to_string(),
            icon: "image".to_string(),
            default_content: WidgetContent::Image {
                src: String::new(),
                alt: String::new(),
            },
            settings_schema: vec![
                WidgetSetting::new("link", "Link url", SettingValue::Text(String::new())),
                WidgetSetting::new("max_width", "Max width (px)", SettingValue::Number(600.0)),
            ],
        },
        WidgetType {
            id: "menu".to_string(),
            name: "Navigation menu".to_string(),
            description: "Tree of links to pages, posts and categories".to_string(),
            category: "navigation".to_string(),
            icon: "menu".to_string(),
            default_content: WidgetContent::Menu(MenuContent {
                items: vec![MenuItem::new("home", "Home", "/")],
                ..MenuContent::default()
            }),
            settings_schema: vec![WidgetSetting::select(
                "alignment",
                "Alignment",
                "left",
                vec![
                    SelectOption::new("left", "Left"),
                    SelectOption::new("center", "Center"),
                    SelectOption::new("right", "Right"),
                ],
            )],
        },
        WidgetType {
            id: "social-links".to_string(),
            name: "Social links".to_string(),
            description: "Icons linking to social profiles".to_string(),
            category: "marketing".to_string(),
            icon: "share".to_string(),
            default_content: WidgetContent::Empty,
            settings_schema: vec![
                WidgetSetting::new("twitter", "Twitter / X url", SettingValue::Text(String::new())),
                WidgetSetting::new("facebook", "Facebook url", SettingValue::Text(String::new())),
                WidgetSetting::new("icon_color", "Icon colour", SettingValue::Color("#333333".into())),
            ],
        },
        WidgetType {
            id: "newsletter".to_string(),
            name: "Newsletter signup".to_string(),
            description: "Email capture form".to_string(),
            category: "marketing".to_string(),
            icon: "mail".to_string(),
            default_content: WidgetContent::Text {
                body: "Subscribe to our newsletter".to_string(),
            },
            settings_schema: vec![
                WidgetSetting::new("list_id", "Mailing list id", SettingValue::Text(String::new()))
                    .required()
                    .with_description("Identifier of the list subscribers are added to"),
                WidgetSetting::new(
                    "intro",
                    "Intro text",
                    SettingValue::Textarea(String::new()),
                ),
                WidgetSetting::new("banner", "Banner image", SettingValue::Image(String::new())),
                WidgetSetting::new("double_opt_in", "Double opt-in", SettingValue::Boolean(true)),
            ],
        },
    ]
}
