//! Integration tests for the refscan CLI.
//!
//! Run with: `cargo test --package refscan-cli --test cli_integration`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to run the refscan CLI with given arguments and a throwaway config dir.
fn run_refscan(args: &[&str]) -> Output {
    let config_home = TempDir::new().unwrap();
    run_refscan_with_config_home(config_home.path(), args)
}

/// Helper to run the refscan CLI with `XDG_CONFIG_HOME` pointed at `config_home`.
fn run_refscan_with_config_home(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_refscan"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("REFSCAN_FORMAT")
        .env_remove("REFSCAN_REPORT_EMPTY_REFERENCES")
        .env("REFSCAN_ASSET_PREFIX", "Assets/")
        .output()
        .expect("Failed to execute refscan command")
}

/// Write a small project snapshot with two scenes and two assets.
fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("project.json");
    fs::write(
        &path,
        r#"{
  "name": "Demo",
  "active_scene": "Level",
  "scenes": [
    { "name": "Menu", "objects": [
      { "id": 0, "name": "Canvas", "components": ["missing"] }
    ]},
    { "name": "Level", "objects": [
      { "id": 0, "name": "World" },
      { "id": 1, "name": "Player", "parent": 0, "components": [
        { "resolved": { "type_name": "Loadout", "fields": [
          { "name": "weapon", "kind": "object_reference", "had_assigned_identity": true },
          { "name": "offhand", "kind": "object_reference" },
          { "name": "health", "kind": "other" }
        ]}}
      ]}
    ]},
    { "name": "Credits", "objects": [
      { "id": 0, "name": "Scroller" }
    ]}
  ],
  "assets": {
    "objects": [
      { "id": 0, "name": "Player", "components": ["missing"] },
      { "id": 1, "name": "Button", "components": [
        { "resolved": { "type_name": "Image", "fields": [
          { "name": "sprite", "kind": "object_reference", "had_assigned_identity": true }
        ]}}
      ]}
    ],
    "entries": [
      { "path": "Assets/Prefabs/Player.prefab", "root": 0 },
      { "path": "Assets/UI/Button.prefab", "root": 1 }
    ]
  }
}"#,
    )
    .unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// =============================================================================
// Scan Command Tests
// =============================================================================

#[test]
fn test_scene_reports_dangling_reference() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&["scene", snapshot.to_str().unwrap(), "--format", "md"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "refscan scene should succeed");
    assert!(stdout.contains("# Missing references: current scene"));
    assert!(stdout.contains("| Level | World/Player | Missing reference | weapon |"));
    assert!(
        !stdout.contains("offhand"),
        "Unassigned references should not be reported"
    );
}

#[test]
fn test_scene_flag_switches_scene() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&[
        "scene",
        snapshot.to_str().unwrap(),
        "--scene",
        "Credits",
        "--format",
        "md",
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("Scanned: Credits"));
    assert!(stdout.contains("No missing references found."));
}

#[test]
fn test_unknown_scene_fails() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&["scene", snapshot.to_str().unwrap(), "--scene", "Nope"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown scene: Nope"));
}

#[test]
fn test_all_scenes_json_in_scene_order() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&["all", snapshot.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        json["contexts"],
        serde_json::json!(["Menu", "Level", "Credits"])
    );

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["context"], "Menu");
    assert_eq!(results[0]["reason"], "missing_component");
    assert_eq!(results[0]["field_name"], "");
    assert_eq!(results[1]["full_path"], "World/Player");
    assert_eq!(results[1]["reason"], "dangling_reference");
    assert_eq!(json["summary"]["missing_components"], 1);
}

#[test]
fn test_assets_prefix_filter() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&[
        "assets",
        snapshot.to_str().unwrap(),
        "--prefix",
        "Assets/UI",
        "--format",
        "md",
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("| Project | Button | Missing reference | sprite |"));
    assert!(!stdout.contains("Missing component"));
}

#[test]
fn test_assets_default_prefix_from_config() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&["assets", snapshot.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["target"]["path_prefix"], "Assets/");
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[test]
fn test_report_empty_references_flag() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&[
        "scene",
        snapshot.to_str().unwrap(),
        "--report-empty-references",
        "--format",
        "md",
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("| Level | World/Player | Empty reference | offhand |"));
}

#[test]
fn test_output_file() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());
    let report = temp.path().join("report.md");

    let output = run_refscan(&[
        "all",
        snapshot.to_str().unwrap(),
        "--format",
        "md",
        "--output",
        report.to_str().unwrap(),
    ]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("💾 Saved report to"));
    assert!(stdout.contains("Missing components:  1"));

    let written = fs::read_to_string(&report).unwrap();
    assert!(written.contains("| Menu | Canvas | Missing component | - |"));
}

#[test]
fn test_missing_snapshot_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let output = run_refscan(&["all", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load snapshot"));
}

#[test]
fn test_cyclic_snapshot_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cyclic.json");
    fs::write(
        &path,
        r#"{ "name": "Broken", "scenes": [ { "name": "Main", "objects": [
            { "id": 0, "name": "A", "parent": 1 },
            { "id": 1, "name": "B", "parent": 0 }
        ]}]}"#,
    )
    .unwrap();

    let output = run_refscan(&["scene", path.to_str().unwrap()]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("corrupt object hierarchy"));
    assert!(stderr.contains("Cyclic hierarchy"));
}

#[test]
fn test_invalid_format_fails() {
    let temp = TempDir::new().unwrap();
    let snapshot = write_snapshot(temp.path());

    let output = run_refscan(&["all", snapshot.to_str().unwrap(), "--format", "xml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown format"));
}

#[test]
fn test_invalid_format_rejected_before_loading_snapshot() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let output = run_refscan(&["all", missing.to_str().unwrap(), "--format", "xml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Unknown format"));
    assert!(!stderr.contains("Failed to load snapshot"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_get_reads_env_override() {
    let output = run_refscan(&["config", "get", "asset-prefix"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Assets/");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let output = run_refscan(&["config", "get", "colour"]);
    assert!(!output.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn test_stored_config_is_isolated_per_run() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("refscan");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.json"),
        r#"{ "report_empty_references": true, "default_format": "json", "asset_prefix": "Assets/" }"#,
    )
    .unwrap();

    let output = run_refscan_with_config_home(config_home.path(), &["config", "get", "format"]);
    assert_eq!(stdout(&output).trim(), "json");

    let output = run_refscan(&["config", "get", "format"]);
    assert_eq!(stdout(&output).trim(), "md");
}

#[cfg(target_os = "linux")]
#[test]
fn test_reset_and_path_survive_corrupt_config() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("refscan");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), "{broken").unwrap();

    let output = run_refscan_with_config_home(config_home.path(), &["config", "get", "format"]);
    assert!(!output.status.success());

    let output = run_refscan_with_config_home(config_home.path(), &["config", "path"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("config.json"));

    let output = run_refscan_with_config_home(config_home.path(), &["config", "reset"]);
    assert!(output.status.success());

    let output = run_refscan_with_config_home(config_home.path(), &["config", "get", "format"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "md");
}

#[test]
fn test_help_lists_commands() {
    let output = run_refscan(&["--help"]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    for command in ["scene", "all", "assets", "config"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}
