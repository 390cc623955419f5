//! Store behaviour tests
//!
//! Exercises the public `DataService` contract against both backends:
//! round-trip, default fallback, overwrite, remove, clear, export/import,
//! and persistence of widget records.

use kv_store::{DataService, FileBackend, MemoryBackend, Snapshot, SnapshotValue};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use widget_schema::{MenuContent, MenuItem, MenuStyle, Widget, WidgetCatalog, WidgetContent};

/// Route `log` output through the test harness.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One service per backend, each in a fresh state.
fn services() -> (TempDir, Vec<DataService>) {
    init_logging();
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let file = FileBackend::open(dir.path().join("store.json")).expect("open should succeed");
    (dir, vec![DataService::new(MemoryBackend::new()), DataService::new(file)])
}

#[test]
fn test_roundtrip_json_values() {
    let (_dir, stores) = services();
    let values = [
        json!(true),
        json!(-12.5),
        json!("text with \"quotes\""),
        json!([1, "two", {"three": 3}]),
        json!({"nested": {"deeper": [null, false]}}),
    ];
    for store in &stores {
        for (i, value) in values.iter().enumerate() {
            let key = format!("k{i}");
            store.save(&key, value);
            assert_eq!(&store.load(&key, Value::Null), value);
        }
    }
}

#[test]
fn test_default_for_never_written_and_removed_keys() {
    let (_dir, stores) = services();
    for store in &stores {
        assert_eq!(store.load("never", json!({"d": 1})), json!({"d": 1}));
        store.save("gone", &5);
        store.remove("gone");
        store.remove("gone");
        assert!(!store.exists("gone"));
        assert_eq!(store.load("gone", 0), 0);
    }
}

#[test]
fn test_overwrite_returns_latest() {
    let (_dir, stores) = services();
    for store in &stores {
        store.save("k", &json!({"v": 1}));
        store.save("k", &json!({"v": 2}));
        assert_eq!(store.load("k", Value::Null), json!({"v": 2}));
    }
}

#[test]
fn test_clear_removes_every_key() {
    let (_dir, stores) = services();
    for store in &stores {
        for key in ["a", "b", "c"] {
            store.save(key, key);
        }
        store.clear();
        for key in ["a", "b", "c"] {
            assert!(!store.exists(key));
        }
        assert!(store.is_empty());
    }
}

#[test]
fn test_export_import_roundtrip() {
    let (_dir, stores) = services();
    for store in &stores {
        store.save("a", &1);
        store.save("b", "x");
        store.save("c", &json!({"nested": true}));

        let snapshot = store.export_data();
        store.import_data(&snapshot);

        assert_eq!(store.load("a", 0), 1);
        assert_eq!(store.load("b", String::new()), "x");
        assert_eq!(store.load("c", Value::Null), json!({"nested": true}));
        assert_eq!(store.export_data(), snapshot);
    }
}

#[test]
fn test_backup_document_restores_into_fresh_store() {
    let (_dir, stores) = services();
    let source = &stores[0];
    source.save("a", &1);
    source.try_save_raw("legacy", "<not json>").expect("raw write");

    let document = source.export_data().to_json_string().expect("serialize backup");
    let restored = Snapshot::from_json_str(&document).expect("parse backup");

    let target = &stores[1];
    target.save("a", &99);
    assert_eq!(target.try_import_data(&restored).expect("import"), 2);
    assert_eq!(target.load("a", 0), 1, "import overwrites existing keys");
    assert_eq!(target.load_raw("legacy"), Some("<not json>".to_string()));
    assert!(matches!(restored.get("legacy"), Some(SnapshotValue::Raw(_))));
}

#[test]
fn test_backup_document_keeps_marker_shaped_objects() {
    let (_dir, stores) = services();
    let source = &stores[0];
    source.save("k", &json!({"$raw": "x"}));
    source.save("w", &json!({"$value": 1}));

    let document = source.export_data().to_json_string().expect("serialize backup");
    let restored = Snapshot::from_json_str(&document).expect("parse backup");

    let target = &stores[1];
    assert_eq!(target.try_import_data(&restored).expect("import"), 2);
    assert_eq!(target.load("k", Value::Null), json!({"$raw": "x"}));
    assert_eq!(target.load("w", Value::Null), json!({"$value": 1}));
}

#[test]
fn test_file_store_survives_reopen() {
    init_logging();
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("store.json");

    {
        let store = DataService::open(&path).expect("open should succeed");
        store.save("theme", "dark");
        store.save("count", &3);
    }

    let store = DataService::open(&path).expect("reopen should succeed");
    assert_eq!(store.load("theme", String::new()), "dark");
    assert_eq!(store.load("count", 0), 3);
    assert_eq!(store.keys(), vec!["count", "theme"]);
}

#[test]
fn test_menu_tree_roundtrip() {
    let (_dir, stores) = services();

    let mut about = MenuItem::new("about", "About", "/about");
    about.is_active = false;
    let mut careers = MenuItem::new("careers", "Careers", "/careers");
    careers.is_active = false;
    careers.order = 1;
    let company = MenuItem::new("company", "Company", "/company")
        .with_child(about)
        .with_child(careers);

    let menu = MenuContent {
        items: vec![company],
        style: MenuStyle::Dropdown,
        ..MenuContent::default()
    };

    for store in &stores {
        store.save("menus/main", &menu);
        let loaded: MenuContent = store.load("menus/main", MenuContent::default());
        assert_eq!(loaded, menu);
        let children = &loaded.items[0].children;
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| !c.is_active));
        assert_eq!(children[1].order, 1);
    }
}

#[test]
fn test_widget_list_roundtrip() {
    let (_dir, stores) = services();
    let catalog = WidgetCatalog::builtin();
    let mut nav = catalog
        .get("menu")
        .expect("menu type")
        .instantiate("nav", "Main menu", "header");
    nav.set_order(2);
    let text = catalog
        .get("text")
        .expect("text type")
        .instantiate("intro", "Intro", "sidebar");
    let widgets = vec![nav, text];

    for store in &stores {
        store.save("widgets", &widgets);
        let loaded: Vec<Widget> = store.load("widgets", Vec::new());
        assert_eq!(loaded, widgets);
        assert!(matches!(loaded[0].content(), WidgetContent::Menu(_)));
        assert_eq!(loaded[0].created_at(), widgets[0].created_at());
    }
}

#[test]
fn test_concurrent_writers_do_not_lose_keys() {
    init_logging();
    let store = Arc::new(DataService::in_memory());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    store.save(&format!("t{t}-{i}"), &i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
    assert_eq!(store.len(), 400);
    assert_eq!(store.load("t7-49", 0), 49);
}
