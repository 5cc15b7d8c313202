//! Smoke tests for the pagefinder CLI
//!
//! These tests verify basic CLI functionality works correctly.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the pagefinder binary
fn pagefinder() -> Command {
    let mut cmd = Command::cargo_bin("pagefinder").expect("pagefinder binary should exist");
    cmd.env_remove("RUST_LOG");
    cmd
}

const REPOSITORY: &str = r#"{
    "pages": [
        {
            "name": "LoginPage",
            "elements": [
                { "elementName": "submit", "id": "login-btn", "cssSelector": "form button" },
                { "elementName": "email", "name": "email" }
            ]
        },
        { "name": "HomePage", "elements": [] }
    ]
}"#;

fn repository(dir: &TempDir) -> String {
    let path = dir.path().join("pages.json");
    fs::write(&path, REPOSITORY).unwrap();
    path.to_string_lossy().into_owned()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    pagefinder()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    pagefinder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locate"))
        .stdout(predicate::str::contains("selector"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_no_args_shows_help() {
    pagefinder().assert().failure(); // Requires a subcommand
}

// ============================================================================
// Locate
// ============================================================================

#[test]
fn test_locate_text() {
    let dir = TempDir::new().unwrap();
    pagefinder()
        .args(["locate", "-r", &repository(&dir), "-p", "LoginPage", "-e", "submit", "--types", "id,css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("By.all(By.id: login-btn, By.css: form button)"));
}

#[test]
fn test_locate_skips_undeclared_strategy() {
    let dir = TempDir::new().unwrap();
    pagefinder()
        .args(["locate", "-r", &repository(&dir), "-p", "LoginPage", "-e", "submit", "--types", "name,css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("By.all(By.css: form button)"));
}

#[test]
fn test_locate_json() {
    let dir = TempDir::new().unwrap();
    let output = pagefinder()
        .args(["locate", "-r", &repository(&dir), "-p", "LoginPage", "-e", "email", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["element"], "email");
    assert_eq!(value["selectors"][0]["strategy"], "name");
    assert_eq!(value["selectors"][0]["value"], "email");
}

#[test]
fn test_locate_unknown_page_fails() {
    let dir = TempDir::new().unwrap();
    pagefinder()
        .args(["locate", "-r", &repository(&dir), "-p", "CheckoutPage", "-e", "submit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No page matching 'CheckoutPage' could be found"));
}

#[test]
fn test_locate_missing_repository_fails() {
    pagefinder()
        .args(["locate", "-r", "/nonexistent/pages.json", "-p", "LoginPage", "-e", "submit"])
        .assert()
        .failure();
}

// ============================================================================
// Selector
// ============================================================================

#[test]
fn test_selector_css() {
    pagefinder()
        .args(["selector", "data-id=7", "role=button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[data-id = '7'][role = 'button']"));
}

#[test]
fn test_selector_xpath() {
    pagefinder()
        .args(["selector", "--strategy", "xpath", "data-id=7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("//*[@data-id = '7']"));
}

#[test]
fn test_selector_requires_pairs() {
    pagefinder().arg("selector").assert().failure();
}

// ============================================================================
// Inspect and Config
// ============================================================================

#[test]
fn test_inspect_lists_pages() {
    let dir = TempDir::new().unwrap();
    pagefinder()
        .args(["--color", "never", "inspect", "-r", &repository(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("LoginPage (2 elements)"))
        .stdout(predicate::str::contains("HomePage (0 elements)"))
        .stdout(predicate::str::contains("id=login-btn, css=form button"));
}

#[test]
fn test_inspect_single_page_json() {
    let dir = TempDir::new().unwrap();
    let output = pagefinder()
        .args(["inspect", "-r", &repository(&dir), "-p", "HomePage", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["name"], "HomePage");
}

#[test]
fn test_config_defaults() {
    pagefinder()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("element-timeout: 15000"))
        .stdout(predicate::str::contains("match-mode: lenient"));
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pagefinder.yaml");
    fs::write(&path, "element-timeout: 2500\n").unwrap();
    pagefinder()
        .args(["config", "--file", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("element-timeout: 2500"))
        .stdout(predicate::str::contains("implicit-wait: 15000"));
}

#[test]
fn test_config_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pagefinder.yaml");
    fs::write(&path, "elementTimeout: 2500\n").unwrap();
    pagefinder()
        .args(["config", "--file", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
