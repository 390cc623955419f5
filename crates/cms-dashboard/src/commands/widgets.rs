//! Widget and widget type commands.

use std::process::ExitCode;

use cms_dashboard::WidgetRepository;
use kv_store::DataService;
use widget_schema::{sort_widgets, Widget, WidgetCatalog};

fn print_widget(w: &Widget) {
    let state = if w.is_active() { "active" } else { "inactive" };
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        w.id(),
        w.widget_type(),
        w.position(),
        w.order(),
        state,
        w.title()
    );
}

/// Lists widgets, one per line, grouped by position in render order.
pub(crate) fn run_widgets_list_command(
    store: &DataService,
    catalog: &WidgetCatalog,
    position: Option<&str>,
) -> ExitCode {
    let repo = WidgetRepository::new(store, catalog);
    let result = match position {
        Some(p) => repo.list_position(p),
        None => repo.list().map(|mut widgets| {
            sort_widgets(&mut widgets);
            widgets
        }),
    };
    match result {
        Ok(widgets) => {
            widgets.iter().for_each(print_widget);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Creates a widget and prints its id.
pub(crate) fn run_widgets_add_command(
    store: &DataService,
    catalog: &WidgetCatalog,
    type_id: &str,
    title: &str,
    position: &str,
) -> ExitCode {
    match WidgetRepository::new(store, catalog).create(type_id, title, position) {
        Ok(widget) => {
            println!("{}", widget.id());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn run_widgets_rm_command(
    store: &DataService,
    catalog: &WidgetCatalog,
    id: &str,
) -> ExitCode {
    match WidgetRepository::new(store, catalog).remove(id) {
        Ok(true) => {
            println!("Removed {id}");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("{id} not present");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reorders a position; ids not named keep their relative order after these.
pub(crate) fn run_widgets_reorder_command(
    store: &DataService,
    catalog: &WidgetCatalog,
    position: &str,
    ids: &[String],
) -> ExitCode {
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    match WidgetRepository::new(store, catalog).reorder(position, &ids) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Checks one widget's settings against its type.
pub(crate) fn run_widgets_validate_command(
    store: &DataService,
    catalog: &WidgetCatalog,
    id: &str,
) -> ExitCode {
    match WidgetRepository::new(store, catalog).validate(id) {
        Ok(()) => {
            println!("{id} is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Lists registered widget types.
pub(crate) fn run_types_command(catalog: &WidgetCatalog, category: Option<&str>) -> ExitCode {
    let types = match category {
        Some(c) => catalog.by_category(c),
        None => catalog.list(),
    };
    for ty in types {
        println!("{}\t{}\t{}", ty.id, ty.category, ty.name);
    }
    ExitCode::SUCCESS
}
