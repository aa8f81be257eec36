use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("PIXFIT_CLI_TEST_{}", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &PathBuf, width: u32, height: u32) {
    image::RgbaImage::from_pixel(width, height, image::Rgba([30, 60, 90, 255]))
        .save(path)
        .unwrap();
}

#[test]
fn test_resize_file_default_jpeg() {
    let dir = workspace("FILE_DEFAULT");
    let input = dir.join("photo.png");
    let output = dir.join("photo.jpg");
    write_png(&input, 1600, 1200);

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let resized = image::open(&output).unwrap();
    assert_eq!((resized.width(), resized.height()), (800, 600));
}

#[test]
fn test_resize_file_scale_ratio_png() {
    let dir = workspace("FILE_RATIO");
    let input = dir.join("square.png");
    let output = dir.join("square_small.png");
    write_png(&input, 1000, 1000);

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args([
            "--max-width",
            "800",
            "--max-height",
            "800",
            "--scale-ratio",
            "0.5",
            "--mime-type",
            "image/png",
        ])
        .assert()
        .success();

    let resized = image::open(&output).unwrap();
    assert_eq!((resized.width(), resized.height()), (400, 400));
}

#[test]
fn test_resize_file_data_url() {
    let dir = workspace("FILE_DATA_URL");
    let input = dir.join("small.png");
    write_png(&input, 64, 32);

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "--data-url", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/jpeg;base64,"));
}

#[test]
fn test_resize_file_config_file() {
    let dir = workspace("FILE_CONFIG");
    let input = dir.join("wide.png");
    let output = dir.join("wide_small.png");
    let config = dir.join("pixfit.json");
    write_png(&input, 1000, 500);
    std::fs::write(&config, r#"{"maxWidth": 100, "mimeType": "image/png"}"#).unwrap();

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let resized = image::open(&output).unwrap();
    assert_eq!((resized.width(), resized.height()), (100, 50));
}

#[test]
fn test_resize_file_unsupported_mime() {
    let dir = workspace("FILE_BAD_MIME");
    let input = dir.join("photo.png");
    write_png(&input, 10, 10);

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "--mime-type", "image/svg+xml", "-o"])
        .arg(dir.join("out.svg"))
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("FormatError"));
}

#[test]
fn test_resize_file_missing_input() {
    let dir = workspace("FILE_MISSING");

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "-i"])
        .arg(dir.join("missing.png"))
        .arg("-o")
        .arg(dir.join("out.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("ReadError"));
}

#[test]
fn test_resize_file_not_an_image() {
    let dir = workspace("FILE_NOT_IMAGE");
    let input = dir.join("fake.png");
    std::fs::write(&input, b"definitely not a png").unwrap();

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "file", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.join("out.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("DecodeError"));
}

#[test]
fn test_resize_dir() {
    let dir = workspace("DIR");
    let input = dir.join("images");
    let output = dir.join("resized");
    std::fs::create_dir_all(&input).unwrap();

    write_png(&input.join("a.png"), 1600, 1200);
    write_png(&input.join("b.png"), 300, 200);
    std::fs::write(input.join("notes.txt"), "ignored").unwrap();
    std::fs::write(input.join("broken.png"), "not an image").unwrap();

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "dir", "-t", "2", "--mime-type", "image/png", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let a = image::open(output.join("a.png")).unwrap();
    assert_eq!((a.width(), a.height()), (800, 600));

    let b = image::open(output.join("b.png")).unwrap();
    assert_eq!((b.width(), b.height()), (300, 200));

    let sizes = std::fs::read_to_string(output.join("resize_sizes.tsv")).unwrap();
    assert_eq!(sizes.lines().count(), 2);
    assert!(sizes.contains("a.png"));

    let errors = std::fs::read_to_string(output.join("resize_errors.tsv")).unwrap();
    assert!(errors.starts_with("broken.png\t"));
}

#[test]
fn test_resize_dir_shared_stem() {
    let dir = workspace("DIR_SHARED_STEM");
    let input = dir.join("images");
    let output = dir.join("resized");
    std::fs::create_dir_all(&input).unwrap();

    write_png(&input.join("a.png"), 1600, 1200);
    image::RgbImage::from_pixel(640, 480, image::Rgb([10, 20, 30]))
        .save(input.join("a.jpg"))
        .unwrap();

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "dir", "-t", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let from_png = image::open(output.join("a.png.jpg")).unwrap();
    assert_eq!((from_png.width(), from_png.height()), (800, 600));

    let from_jpg = image::open(output.join("a.jpg.jpg")).unwrap();
    assert_eq!((from_jpg.width(), from_jpg.height()), (640, 480));

    assert!(!output.join("a.jpg").exists());

    let sizes = std::fs::read_to_string(output.join("resize_sizes.tsv")).unwrap();
    assert_eq!(sizes.lines().count(), 2);
    assert!(sizes.contains("a.png\ta.png.jpg\t"));
    assert!(sizes.contains("a.jpg\ta.jpg.jpg\t"));
    assert!(!output.join("resize_errors.tsv").exists());
}

#[test]
fn test_resize_dir_empty() {
    let dir = workspace("DIR_EMPTY");

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["resize", "dir", "-i"])
        .arg(&dir)
        .arg("-o")
        .arg(dir.join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No image files"));
}

#[test]
fn test_inspect() {
    let dir = workspace("INSPECT");
    let input = dir.join("big.png");
    write_png(&input, 3200, 2400);

    Command::cargo_bin("pixfit")
        .unwrap()
        .args(["inspect", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("source\t3200 x 2400"))
        .stdout(predicate::str::contains("halvings\t2"))
        .stdout(predicate::str::contains("bilinear\tfalse"))
        .stdout(predicate::str::contains("output\t800 x 600"));
}
