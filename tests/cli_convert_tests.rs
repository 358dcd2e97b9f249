//! End-to-end tests for `kle-layout convert` command.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::fs;

use kle_layout::parser::parse_kle_file;

mod fixtures;

use fixtures::*;

#[test]
fn test_convert_preserves_geometry() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_iso());
    let out_path = layout_temp.path().join("converted.json");

    let output = kle_command(layout_temp.path())
        .args([
            "convert",
            "--layout",
            layout_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let original = parse_kle_file(&layout_path, 19.0).unwrap();
    let converted = parse_kle_file(&out_path, 19.0).unwrap();
    assert_eq!(converted.key_count(), original.key_count());
    for (a, b) in original.keys().iter().zip(converted.keys()) {
        assert_eq!(a.key_properties(), b.key_properties());
        assert_eq!(a.legend_str(), b.legend_str());
    }
}

#[test]
fn test_convert_one_row_per_key() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());

    let output = kle_command(layout_temp.path())
        .args(["convert", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should print KLE JSON");
    let rows = value.as_array().unwrap();

    // Metadata object followed by one row per key
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["author"], "Test Suite");
    assert_eq!(rows[5][1], "A");
    assert_eq!(rows[5][0]["x"], 1.5);
    assert_eq!(rows[5][0]["y"], 1);
}

#[test]
fn test_convert_compact() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());

    let output = kle_command(layout_temp.path())
        .args(["convert", "--layout", layout_path.to_str().unwrap(), "--compact"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn test_convert_compact_from_config() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());
    fs::write(
        layout_temp.path().join("config.toml"),
        "[output]\npretty = false\n",
    )
    .unwrap();

    let output = kle_command(layout_temp.path())
        .args(["convert", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end().lines().count(), 1);
}

#[test]
fn test_convert_invalid_json() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "[[\"A\",").unwrap();

    let output = kle_command(temp.path())
        .args(["convert", "--layout", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_convert_unwritable_output() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());
    let out_path = layout_temp.path().join("no_such_dir").join("out.json");

    let output = kle_command(layout_temp.path())
        .args([
            "convert",
            "--layout",
            layout_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
