//! Integration tests for `cmsd widgets`, `cmsd types` and `cmsd config`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CMSD_BIN: &str = env!("CARGO_BIN_EXE_cmsd");

fn cmsd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(CMSD_BIN);
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("XDG_DATA_HOME", dir.path())
        .env_remove("CMSD_LOG")
        .arg("--store")
        .arg(dir.path().join("store.json"));
    cmd
}

/// Runs `widgets add` and returns the printed id.
fn add_widget(dir: &TempDir, widget_type: &str, title: &str, position: &str) -> String {
    let output = cmsd(dir)
        .args(["widgets", "add", widget_type, title, "--position", position])
        .output()
        .expect("failed to run cmsd");
    assert!(output.status.success(), "widgets add failed: {output:?}");
    String::from_utf8(output.stdout)
        .expect("utf-8 stdout")
        .trim()
        .to_string()
}

#[test]
fn add_then_list_by_position() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let about = add_widget(&dir, "text", "About", "sidebar");
    let nav = add_widget(&dir, "menu", "Main menu", "header");
    assert!(about.starts_with("text-"));
    assert!(nav.starts_with("menu-"));

    cmsd(&dir)
        .args(["widgets", "list", "--position", "sidebar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&about))
        .stdout(predicate::str::contains("About"))
        .stdout(predicate::str::contains(&nav).not());

    cmsd(&dir)
        .args(["widgets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("header\t0\tactive\tMain menu"));
}

#[test]
fn add_unknown_type_fails() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    cmsd(&dir)
        .args(["widgets", "add", "carousel", "Hero", "--position", "header"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown widget type: carousel"));
}

#[test]
fn reorder_changes_list_order() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let first = add_widget(&dir, "text", "First", "footer");
    let second = add_widget(&dir, "text", "Second", "footer");

    cmsd(&dir)
        .args(["widgets", "reorder", "--position", "footer", &second, &first])
        .assert()
        .success();

    let output = cmsd(&dir)
        .args(["widgets", "list", "--position", "footer"])
        .output()
        .expect("failed to run cmsd");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let titles: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.rsplit('\t').next())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[test]
fn rm_and_validate() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let id = add_widget(&dir, "newsletter", "Join", "footer");

    cmsd(&dir)
        .args(["widgets", "validate", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    cmsd(&dir).args(["widgets", "rm", &id]).assert().success();
    cmsd(&dir)
        .args(["widgets", "validate", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Widget not found"));
}

#[test]
fn widgets_are_plain_store_entries() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    add_widget(&dir, "image", "Logo", "header");
    cmsd(&dir)
        .args(["get", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "image""#))
        .stdout(predicate::str::contains(r#""createdAt""#));
}

#[test]
fn types_by_category() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    cmsd(&dir)
        .args(["types", "--category", "marketing"])
        .assert()
        .success()
        .stdout("newsletter\tmarketing\tNewsletter signup\nsocial-links\tmarketing\tSocial links\n");
}

#[test]
fn config_init_validate_and_force() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = dir.path().join("cms-dashboard/config.toml");

    cmsd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cms-dashboard/config.toml"));

    cmsd(&dir).args(["config", "init"]).assert().success();
    assert!(config.exists());

    cmsd(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cmsd(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    cmsd(&dir).args(["config", "init", "--force"]).assert().success();
    assert!(config.with_extension("toml.backup").exists());
}

#[test]
fn invalid_config_reports_position() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[store]\nbackend = \"redis\"\n").expect("write config");

    cmsd(&dir)
        .arg("--config")
        .arg(&config)
        .arg("keys")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.toml:2:"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    cmsd(&dir)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("keys")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn memory_backend_from_config_does_not_persist() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = dir.path().join("memory.toml");
    fs::write(&config, "[store]\nbackend = \"memory\"\n").expect("write config");

    let mut cmd = Command::new(CMSD_BIN);
    cmd.env("XDG_DATA_HOME", dir.path())
        .env_remove("CMSD_LOG")
        .arg("--config")
        .arg(&config)
        .args(["set", "k", "1"])
        .assert()
        .success();
    assert!(!dir.path().join("cms-dashboard/store.json").exists());
}
