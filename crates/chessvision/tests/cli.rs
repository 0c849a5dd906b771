use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::path::Path;

fn write_frame(path: &Path) {
    RgbaImage::from_fn(24, 16, |x, _| {
        if x < 12 {
            Rgba([20, 20, 20, 255])
        } else {
            Rgba([230, 230, 230, 255])
        }
    })
    .save(path)
    .unwrap();
}

#[test]
fn writes_edge_map_per_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("left.png");
    let b = dir.path().join("right.png");
    write_frame(&a);
    write_frame(&b);
    let out = dir.path().join("out");

    Command::cargo_bin("chessvision")
        .unwrap()
        .arg("--out-dir")
        .arg(&out)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("display 0: 24x16"))
        .stdout(predicate::str::contains("display 1: 24x16"));

    for name in ["left_edges.png", "right_edges.png"] {
        let img = image::open(out.join(name)).unwrap().to_luma16();
        assert_eq!(img.dimensions(), (24, 16));
    }
}

#[test]
fn snapshots_flag_writes_debug_images() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("screen.png");
    write_frame(&input);

    Command::cargo_bin("chessvision")
        .unwrap()
        .arg("--snapshots")
        .arg("--out-dir")
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success();

    assert!(dir.path().join("debug/display0_grayscale.png").is_file());
    assert!(dir.path().join("debug/display0_canny.png").is_file());
}

#[test]
fn missing_input_reports_display() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("ok.png");
    write_frame(&good);

    Command::cargo_bin("chessvision")
        .unwrap()
        .arg("--out-dir")
        .arg(dir.path())
        .arg(&good)
        .arg(dir.path().join("gone.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("capture failed for display 1"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("screen.png");
    write_frame(&input);
    let config = dir.path().join("params.json");
    std::fs::write(&config, "{ not json").unwrap();

    Command::cargo_bin("chessvision")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn config_overrides_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("screen.png");
    write_frame(&input);
    let config = dir.path().join("params.json");
    std::fs::write(&config, r#"{ "threshold": { "ignore_zeros": true } }"#).unwrap();

    Command::cargo_bin("chessvision")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success();
    assert!(dir.path().join("screen_edges.png").is_file());
}

#[test]
fn log_level_flag_controls_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("screen.png");
    write_frame(&input);

    Command::cargo_bin("chessvision")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--log-level")
        .arg("debug")
        .arg("--out-dir")
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("edge pixels"));

    Command::cargo_bin("chessvision")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--out-dir")
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("edge pixels").not());
}
