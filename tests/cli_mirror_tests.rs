//! End-to-end tests for `kle-layout mirror` command.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use kle_layout::models::Point;
use kle_layout::parser::{parse_kle_file, parse_kle_str, parse_kle_value};

mod fixtures;

use fixtures::*;

#[test]
fn test_mirror_to_stdout() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());

    let output = kle_command(layout_temp.path())
        .args(["mirror", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let original = parse_kle_value(&layout_basic(), 19.0).unwrap();
    let mirrored = parse_kle_str(&String::from_utf8_lossy(&output.stdout), 19.0).unwrap();

    assert_eq!(mirrored.key_count(), original.key_count());
    assert_eq!(mirrored.metadata()["name"], "Test Board");
    for (a, b) in original.keys().iter().zip(mirrored.keys()) {
        let c = a.center();
        assert!(b.center().approx_eq(Point::new(-c.x, c.y), 1e-9));
        assert_eq!(a.legend_str(), b.legend_str());
    }
}

#[test]
fn test_mirror_y_axis_to_file() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_rotated());
    let out_path = layout_temp.path().join("mirrored.json");

    let output = kle_command(layout_temp.path())
        .args([
            "mirror",
            "--layout",
            layout_path.to_str().unwrap(),
            "--axis",
            "y",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Wrote 7 keys"));

    let original = parse_kle_file(&layout_path, 19.0).unwrap();
    let mirrored = parse_kle_file(&out_path, 19.0).unwrap();
    for (a, b) in original.keys().iter().zip(mirrored.keys()) {
        let c = a.center();
        assert!(b.center().approx_eq(Point::new(c.x, -c.y), 1e-9));
        assert_close(b.r(), -a.r());
    }
}

#[test]
fn test_mirror_twice_restores_layout() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_rotated());
    let once = layout_temp.path().join("once.json");
    let twice = layout_temp.path().join("twice.json");

    for (input, output_path) in [(&layout_path, &once), (&once, &twice)] {
        let output = kle_command(layout_temp.path())
            .args([
                "mirror",
                "--layout",
                input.to_str().unwrap(),
                "--output",
                output_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
    }

    let original = parse_kle_file(&layout_path, 19.0).unwrap();
    let restored = parse_kle_file(&twice, 19.0).unwrap();
    for (a, b) in original.keys().iter().zip(restored.keys()) {
        assert!(a.center().approx_eq(b.center(), 1e-9));
        assert_close(a.r(), b.r());
    }
}

#[test]
fn test_mirror_invalid_axis() {
    let (layout_path, layout_temp) = create_temp_layout_file(&layout_basic());

    let output = kle_command(layout_temp.path())
        .args([
            "mirror",
            "--layout",
            layout_path.to_str().unwrap(),
            "--axis",
            "z",
        ])
        .output()
        .expect("Failed to execute command");

    // Rejected by argument parsing
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_mirror_missing_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let missing = temp.path().join("missing.json");

    let output = kle_command(temp.path())
        .args(["mirror", "--layout", missing.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
