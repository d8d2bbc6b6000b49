//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba};
use predicates::prelude::*;
use std::io::Cursor;
use std::path::Path;

const NO_MASK_RESPONSE: &str = r#"{"Persons": [{"BoundingBox": {"Left": 0.0, "Top": 0.0, "Width": 1.0, "Height": 1.0}, "BodyParts": [{"Name": "FACE", "EquipmentDetections": []}]}]}"#;

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Png).unwrap();
    std::fs::write(path, out.into_inner()).unwrap();
}

fn event_json(bucket: &str, key: &str) -> String {
    format!(
        r#"{{"Records": [{{"eventName": "ObjectCreated:Put", "s3": {{"bucket": {{"name": "{}"}}, "object": {{"key": "{}"}}}}}}]}}"#,
        bucket, key
    )
}

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ppe-detect "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ppe-detect "));
}

#[test]
fn test_annotate_command() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("in.png");
    let detections = dir.path().join("response.json");
    let output = dir.path().join("out.png");
    write_png(&image, 40, 30);
    std::fs::write(&detections, NO_MASK_RESPONSE).unwrap();

    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("annotate")
        .arg("--image")
        .arg(&image)
        .arg("--detections")
        .arg(&detections)
        .arg("--output")
        .arg(&output)
        .env_remove("PPE_CONFIG");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 no mask"));

    let annotated = image::open(&output).unwrap();
    assert_eq!((annotated.width(), annotated.height()), (40, 30));
    assert_eq!(annotated.to_rgba8().get_pixel(20, 0), &Rgba([255, 0, 0, 255]));
}

#[test]
fn test_handle_command_writes_to_destination_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("buckets");
    std::fs::create_dir_all(root.join("uploads")).unwrap();
    write_png(&root.join("uploads/lobby.png"), 40, 30);

    let event = dir.path().join("event.json");
    std::fs::write(&event, event_json("uploads", "lobby.png")).unwrap();
    let detections = dir.path().join("response.json");
    std::fs::write(&detections, NO_MASK_RESPONSE).unwrap();

    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("handle")
        .arg("--event")
        .arg(&event)
        .arg("--store-root")
        .arg(&root)
        .arg("--detections")
        .arg(&detections)
        .arg("--dest-bucket")
        .arg("annotated")
        .env_remove("PPE_CONFIG");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("annotated/ppe-detected-lobby.png"));

    assert!(root.join("annotated/ppe-detected-lobby.png").exists());
}

#[test]
fn test_handle_command_requires_destination_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let event = dir.path().join("event.json");
    std::fs::write(&event, event_json("uploads", "lobby.png")).unwrap();

    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("handle")
        .arg("--event")
        .arg(&event)
        .arg("--store-root")
        .arg(dir.path())
        .arg("--detections")
        .arg(dir.path().join("response.json"))
        .env_remove("PPE_DEST_BUCKET")
        .env_remove("PPE_CONFIG");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("destination bucket"));
}

#[test]
fn test_handle_command_missing_source_object() {
    let dir = tempfile::tempdir().unwrap();
    let event = dir.path().join("event.json");
    std::fs::write(&event, event_json("uploads", "missing.png")).unwrap();

    let mut cmd = cargo_bin_cmd!("ppe-detect");
    cmd.arg("handle")
        .arg("--event")
        .arg(&event)
        .arg("--store-root")
        .arg(dir.path())
        .arg("--detections")
        .arg(dir.path().join("response.json"))
        .arg("--dest-bucket")
        .arg("annotated")
        .env_remove("PPE_CONFIG");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch uploads/missing.png"));
}
