//! Widget instances
//!
//! A [`Widget`] is a positioned, configurable content block. Its id and
//! creation time are fixed once built; every mutator refreshes `updatedAt`.
//! Fields are therefore private and reached through accessors and setters.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::menu::MenuContent;
use crate::setting::SettingValue;

/// Type-specific widget payload
///
/// Serialized with a `kind` tag, e.g. `{"kind": "text", "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetContent {
    /// No content yet
    #[default]
    Empty,
    /// Rich text body
    Text {
        /// Body markup
        body: String,
    },
    /// Single image
    Image {
        /// Image source
        src: String,
        /// Alternative text
        #[serde(default)]
        alt: String,
    },
    /// Navigation menu
    Menu(MenuContent),
    /// Payload owned by a plugin; not interpreted here
    Custom {
        /// Opaque plugin data
        data: serde_json::Value,
    },
}

/// A positionable, configurable content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WidgetRecord", into = "WidgetRecord")]
pub struct Widget {
    id: String,
    widget_type: String,
    title: String,
    content: WidgetContent,
    position: String,
    order: i32,
    is_active: bool,
    settings: BTreeMap<String, SettingValue>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Wire form of [`Widget`]; checked on the way in.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WidgetRecord {
    id: String,
    #[serde(rename = "type")]
    widget_type: String,
    title: String,
    #[serde(default)]
    content: WidgetContent,
    position: String,
    #[serde(default)]
    order: i32,
    is_active: bool,
    #[serde(default)]
    settings: BTreeMap<String, SettingValue>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WidgetRecord> for Widget {
    type Error = SchemaError;

    fn try_from(r: WidgetRecord) -> Result<Self, Self::Error> {
        if r.updated_at < r.created_at {
            return Err(SchemaError::TimestampOrder {
                id: r.id,
                created_at: r.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                updated_at: r.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            });
        }
        Ok(Widget {
            id: r.id,
            widget_type: r.widget_type,
            title: r.title,
            content: r.content,
            position: r.position,
            order: r.order,
            is_active: r.is_active,
            settings: r.settings,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

impl From<Widget> for WidgetRecord {
    fn from(w: Widget) -> Self {
        WidgetRecord {
            id: w.id,
            widget_type: w.widget_type,
            title: w.title,
            content: w.content,
            position: w.position,
            order: w.order,
            is_active: w.is_active,
            settings: w.settings,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

impl Widget {
    /// Creates an active, empty widget at order 0, stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        widget_type: impl Into<String>,
        title: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            title: title.into(),
            content: WidgetContent::Empty,
            position: position.into(),
            order: 0,
            is_active: true,
            settings: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style content seed, used when instantiating from a type.
    pub(crate) fn with_seed(
        mut self,
        content: WidgetContent,
        settings: BTreeMap<String, SettingValue>,
    ) -> Self {
        self.content = content;
        self.settings = settings;
        self
    }

    /// Unique widget id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the [`WidgetType`](crate::WidgetType) this widget was created from.
    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Type-specific payload.
    pub fn content(&self) -> &WidgetContent {
        &self.content
    }

    /// Layout slot, e.g. `"sidebar"`.
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Sort key within the position; lower renders first.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Whether the widget is rendered.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Every setting value, keyed by setting key.
    pub fn settings(&self) -> &BTreeMap<String, SettingValue> {
        &self.settings
    }

    /// Value of one setting.
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time; never earlier than [`Widget::created_at`].
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Refresh `updatedAt`.
    ///
    /// Never moves the timestamp backwards, even if the wall clock does.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Replace the title and touch.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Replace the content and touch.
    pub fn set_content(&mut self, content: WidgetContent) {
        self.content = content;
        self.touch();
    }

    /// Move to another position and touch. The order is kept.
    pub fn set_position(&mut self, position: impl Into<String>) {
        self.position = position.into();
        self.touch();
    }

    /// Set the order within the position and touch.
    pub fn set_order(&mut self, order: i32) {
        self.order = order;
        self.touch();
    }

    /// Show or hide the widget and touch.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    /// Insert or replace one setting value, returning the previous one.
    pub fn set_setting(&mut self, key: impl Into<String>, value: SettingValue) -> Option<SettingValue> {
        let previous = self.settings.insert(key.into(), value);
        self.touch();
        previous
    }

    /// Remove one setting value; touches only when something was removed.
    pub fn remove_setting(&mut self, key: &str) -> Option<SettingValue> {
        let removed = self.settings.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Render order within one position: `order`, then `id`.
    pub fn render_order(&self, other: &Widget) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sort widgets by position, then render order within each position.
pub fn sort_widgets(widgets: &mut [Widget]) {
    widgets.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.render_order(b)));
}

/// Widgets placed in `position`, in render order.
pub fn widgets_in_position<'a>(widgets: &'a [Widget], position: &str) -> Vec<&'a Widget> {
    let mut placed: Vec<&Widget> = widgets.iter().filter(|w| w.position == position).collect();
    placed.sort_by(|a, b| a.render_order(b));
    placed
}
