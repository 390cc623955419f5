//! Navigation menu content
//!
//! A menu widget carries a tree of [`MenuItem`]s. Sibling order is decided by
//! `order`, with the item id as tie-breaker, the same rule widgets use within
//! a position.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::widget::{Widget, WidgetContent};

/// Menu orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStyle {
    /// Items laid out in a row
    #[default]
    Horizontal,
    /// Items stacked in a column
    Vertical,
    /// Top-level items open child lists on hover/click
    Dropdown,
}

/// Menu colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuTheme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

/// How the router resolves a menu item's url
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    /// Literal url
    #[default]
    Custom,
    /// CMS page
    Page,
    /// CMS post
    Post,
    /// Post category archive
    Category,
}

/// Browsing context the link opens in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkTarget {
    /// Same tab
    #[default]
    #[serde(rename = "_self")]
    SelfTarget,
    /// New tab
    #[serde(rename = "_blank")]
    Blank,
}

/// A node in the navigation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item id
    pub id: String,
    /// Link text
    pub label: String,
    /// Link url (interpreted according to `kind`)
    pub url: String,
    /// Resolution kind
    #[serde(rename = "type", default)]
    pub kind: MenuItemKind,
    /// Link target
    #[serde(default)]
    pub target: LinkTarget,
    /// Child items, omitted from the wire format when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
    /// Sibling sort key
    #[serde(default)]
    pub order: i32,
    /// Whether the item is shown
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl MenuItem {
    /// Creates an active custom link opening in the same tab.
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            kind: MenuItemKind::Custom,
            target: LinkTarget::SelfTarget,
            children: Vec::new(),
            order: 0,
            is_active: true,
        }
    }

    /// Appends a child item.
    pub fn with_child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }

    /// Children in display order.
    pub fn sorted_children(&self) -> Vec<&MenuItem> {
        let mut children: Vec<&MenuItem> = self.children.iter().collect();
        children.sort_by(|a, b| sibling_order(a, b));
        children
    }

    /// Depth-first search for an item with the given id, this item included.
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, this item included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MenuItem::count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(MenuItem::depth).max().unwrap_or(0)
    }

    /// Copy of this subtree without inactive nodes, siblings sorted.
    ///
    /// Returns `None` when this item is itself inactive; an inactive parent
    /// hides all of its descendants.
    pub fn visible(&self) -> Option<MenuItem> {
        if !self.is_active {
            return None;
        }
        Some(MenuItem {
            children: self
                .sorted_children()
                .into_iter()
                .filter_map(MenuItem::visible)
                .collect(),
            ..self.clone()
        })
    }
}

fn sibling_order(a: &MenuItem, b: &MenuItem) -> Ordering {
    a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id))
}

/// Content of a menu widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuContent {
    /// Top-level items
    pub items: Vec<MenuItem>,
    /// Orientation
    #[serde(default)]
    pub style: MenuStyle,
    /// Colour scheme
    #[serde(default)]
    pub theme: MenuTheme,
}

impl MenuContent {
    /// Top-level items in display order.
    pub fn sorted_items(&self) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self.items.iter().collect();
        items.sort_by(|a, b| sibling_order(a, b));
        items
    }

    /// The tree as it should be rendered: inactive nodes pruned, siblings sorted.
    pub fn visible(&self) -> Vec<MenuItem> {
        self.sorted_items()
            .into_iter()
            .filter_map(MenuItem::visible)
            .collect()
    }

    /// Search every top-level subtree for an item id.
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find_map(|item| item.find(id))
    }

    /// Total number of items in the tree.
    pub fn count(&self) -> usize {
        self.items.iter().map(MenuItem::count).sum()
    }
}

/// A widget whose content is known to be a menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuWidget(Widget);

impl MenuWidget {
    /// The menu content.
    pub fn menu(&self) -> &MenuContent {
        match self.0.content() {
            WidgetContent::Menu(menu) => menu,
            // Construction goes through TryFrom, which rejects other content.
            _ => unreachable!("MenuWidget always wraps menu content"),
        }
    }

    /// Replace the menu content, refreshing `updatedAt`.
    pub fn set_menu(&mut self, menu: MenuContent) {
        self.0.set_content(WidgetContent::Menu(menu));
    }

    /// The underlying widget.
    pub fn widget(&self) -> &Widget {
        &self.0
    }

    /// Unwraps into the underlying widget.
    pub fn into_widget(self) -> Widget {
        self.0
    }
}

impl TryFrom<Widget> for MenuWidget {
    type Error = SchemaError;

    fn try_from(widget: Widget) -> Result<Self, Self::Error> {
        match widget.content() {
            WidgetContent::Menu(_) => Ok(MenuWidget(widget)),
            _ => Err(SchemaError::NotAMenu(widget.id().to_string())),
        }
    }
}

impl From<MenuWidget> for Widget {
    fn from(menu: MenuWidget) -> Self {
        menu.0
    }
}
