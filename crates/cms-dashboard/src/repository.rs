//! Widget persistence on top of the key/value store.
//!
//! All widgets live as one list under [`WIDGETS_KEY`]. Every mutation is a
//! load, modify, save cycle on that list; concurrent writers in other
//! processes are last-write-wins.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use kv_store::{DataService, StoreError};
use thiserror::Error;
use widget_schema::{widgets_in_position, SchemaError, Widget, WidgetCatalog};

/// Store key holding the widget list.
pub const WIDGETS_KEY: &str = "widgets";

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors from repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No widget type with this id is registered.
    #[error("Unknown widget type: {0}")]
    UnknownType(String),

    /// No widget with this id is stored.
    #[error("Widget not found: {0}")]
    NotFound(String),

    /// A widget named in a reorder is not placed in that position.
    #[error("Widget '{id}' is not in position '{position}'")]
    NotInPosition {
        /// Widget id.
        id: String,
        /// Position being reordered.
        position: String,
    },

    /// A reorder names the same widget more than once.
    #[error("Widget '{0}' is listed more than once")]
    DuplicateId(String),

    /// The position already holds a widget at the highest order.
    #[error("No order left after the last widget in position '{0}'")]
    OrderOverflow(String),

    /// A widget's settings violate its type schema.
    #[error("Widget '{id}' has {} invalid setting(s): {}", .errors.len(), join_errors(.errors))]
    InvalidSettings {
        /// Widget id.
        id: String,
        /// Every violation found.
        errors: Vec<SchemaError>,
    },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Widget CRUD against a [`DataService`], checked against a [`WidgetCatalog`].
pub struct WidgetRepository<'a> {
    store: &'a DataService,
    catalog: &'a WidgetCatalog,
}

impl<'a> WidgetRepository<'a> {
    /// Creates a repository over `store`, resolving types in `catalog`.
    pub fn new(store: &'a DataService, catalog: &'a WidgetCatalog) -> Self {
        Self { store, catalog }
    }

    /// Every stored widget, in stored order.
    ///
    /// # Errors
    ///
    /// `StoreError::Serialization` if the stored list does not decode. The
    /// list is not replaced with a default, so a bad entry is never
    /// overwritten by a later save.
    pub fn list(&self) -> Result<Vec<Widget>> {
        Ok(self.store.try_load(WIDGETS_KEY)?.unwrap_or_default())
    }

    /// Widgets placed in `position`, in render order.
    pub fn list_position(&self, position: &str) -> Result<Vec<Widget>> {
        let widgets = self.list()?;
        Ok(widgets_in_position(&widgets, position)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Widget with `id`, if stored.
    pub fn get(&self, id: &str) -> Result<Option<Widget>> {
        Ok(self.list()?.into_iter().find(|w| w.id() == id))
    }

    /// Instantiate a widget of `type_id` and store it.
    ///
    /// The new widget goes after every widget already in `position`. If the
    /// last one already has order `i32::MAX`, nothing is stored and
    /// [`RepositoryError::OrderOverflow`] is returned.
    pub fn create(&self, type_id: &str, title: &str, position: &str) -> Result<Widget> {
        let ty = self
            .catalog
            .get(type_id)
            .ok_or_else(|| RepositoryError::UnknownType(type_id.to_string()))?;

        let mut widgets = self.list()?;
        let last_order = widgets
            .iter()
            .filter(|w| w.position() == position)
            .map(Widget::order)
            .max();
        let next_order = match last_order {
            None => 0,
            Some(order) => order
                .checked_add(1)
                .ok_or_else(|| RepositoryError::OrderOverflow(position.to_string()))?,
        };

        let id = next_id(type_id, &widgets);
        let mut widget = ty.instantiate(id, title, position);
        widget.set_order(next_order);

        widgets.push(widget.clone());
        self.save(&widgets)?;
        tracing::info!("Created widget {} ({}) in {}", widget.id(), type_id, position);
        Ok(widget)
    }

    /// Apply `change` to the widget with `id` and store the result.
    ///
    /// The widget is touched after `change` runs; its id cannot change.
    pub fn update<F>(&self, id: &str, change: F) -> Result<Widget>
    where
        F: FnOnce(&mut Widget),
    {
        let mut widgets = self.list()?;
        let widget = widgets
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        change(widget);
        widget.touch();
        let updated = widget.clone();
        self.save(&widgets)?;
        Ok(updated)
    }

    /// Remove the widget with `id`, returning whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut widgets = self.list()?;
        let before = widgets.len();
        widgets.retain(|w| w.id() != id);
        if widgets.len() == before {
            return Ok(false);
        }
        self.save(&widgets)?;
        tracing::info!("Removed widget {}", id);
        Ok(true)
    }

    /// Assign orders `0..n` in `position` following `ids`.
    ///
    /// Widgets in `position` not named in `ids` keep their relative order
    /// and follow the named ones. Naming a widget twice is an error and
    /// leaves every order unchanged.
    pub fn reorder(&self, position: &str, ids: &[&str]) -> Result<()> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(RepositoryError::DuplicateId(dup.to_string()));
        }

        let mut widgets = self.list()?;

        for id in ids {
            match widgets.iter().find(|w| w.id() == *id) {
                None => return Err(RepositoryError::NotFound(id.to_string())),
                Some(w) if w.position() != position => {
                    return Err(RepositoryError::NotInPosition {
                        id: id.to_string(),
                        position: position.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        let rest: Vec<String> = widgets_in_position(&widgets, position)
            .into_iter()
            .map(|w| w.id().to_string())
            .filter(|id| !ids.contains(&id.as_str()))
            .collect();
        let sequence = ids.iter().copied().chain(rest.iter().map(String::as_str));

        for (order, id) in sequence.enumerate() {
            if let Some(w) = widgets.iter_mut().find(|w| w.id() == id) {
                let order = i32::try_from(order).unwrap_or(i32::MAX);
                if w.order() != order {
                    w.set_order(order);
                }
            }
        }
        self.save(&widgets)
    }

    /// Check the settings of widget `id` against its type schema.
    pub fn validate(&self, id: &str) -> Result<()> {
        let widget = self
            .get(id)?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        let ty = self
            .catalog
            .get(widget.widget_type())
            .ok_or_else(|| RepositoryError::UnknownType(widget.widget_type().to_string()))?;
        ty.validate_settings(widget.settings())
            .map_err(|errors| RepositoryError::InvalidSettings {
                id: id.to_string(),
                errors,
            })
    }

    fn save(&self, widgets: &[Widget]) -> Result<()> {
        Ok(self.store.try_save(WIDGETS_KEY, widgets)?)
    }
}

/// `<type>-<unix millis>-<counter>`, unique within `existing`.
fn next_id(type_id: &str, existing: &[Widget]) -> String {
    let millis = Utc::now().timestamp_millis();
    loop {
        let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let id = format!("{type_id}-{millis}-{n}");
        if !existing.iter().any(|w| w.id() == id) {
            return id;
        }
    }
}
