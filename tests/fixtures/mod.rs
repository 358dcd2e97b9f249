//! Shared test fixtures for layout and CLI tests.
#![allow(dead_code)] // Each test binary uses a different subset

use kle_layout::config::CONFIG_PATH_ENV;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the kle-layout binary
pub fn kle_layout_bin() -> &'static str {
    env!("CARGO_BIN_EXE_kle-layout")
}

/// Command for the binary, isolated from the user's config file.
///
/// The config path points into `temp_dir`, where no config exists unless a
/// test writes one.
pub fn kle_command(temp_dir: &Path) -> Command {
    let mut cmd = Command::new(kle_layout_bin());
    cmd.env(CONFIG_PATH_ENV, temp_dir.join("config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Two plain rows with metadata.
///
/// Keys: Esc (0,0), Q (1,0), W (2,0), Tab (0,1) 1.5u, A (1.5,1).
pub fn layout_basic() -> Value {
    json!([
        {"name": "Test Board", "author": "Test Suite"},
        ["Esc", "Q", "W"],
        [{"w": 1.5}, "Tab", "A"]
    ])
}

/// A small split-style thumb cluster rotated about (4, 3).
pub fn layout_rotated() -> Value {
    json!([
        ["1", "2", "3"],
        [{"r": 15, "rx": 4, "ry": 3, "y": -0.5}, "T1", {"h": 1.5}, "T2"],
        [{"x": 1}, "T3"],
        [{"r": 0, "rx": 0, "ry": 0, "y": 5}, "Space"]
    ])
}

/// An ISO-style layout with a stepped, homing and decal key.
pub fn layout_iso() -> Value {
    json!([
        [{"c": "#444444", "t": "#eeeeee", "a": 4, "p": "DCS"}, "~\n`", "!\n1"],
        [{"w": 1.5}, "Tab", {"x": 0.25, "w": 1.25, "h": 2, "w2": 1.5, "h2": 1, "x2": -0.25}, "Enter"],
        [{"w": 1.75, "l": true}, "Caps", {"n": true}, "F", {"d": true}, "note"]
    ])
}

/// A key with 13 legends.
pub fn layout_legend_overflow() -> Value {
    let legend = (0..13).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
    json!([["A", legend]])
}

/// Writes a layout into a fresh temp directory.
pub fn create_temp_layout_file(layout: &Value) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let layout_path = temp_dir.path().join("layout.json");
    fs::write(&layout_path, serde_json::to_string_pretty(layout).unwrap())
        .expect("Failed to write layout file");
    (layout_path, temp_dir)
}

/// Asserts two floats are equal within `1e-6`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
