//! End-to-end tests against real files using the production backend.
//!
//! Fixtures are generated with the `image` crate into a temp directory, opened
//! as assets, resized, saved, and re-probed from disk.

use image::{DynamicImage, Rgba, RgbaImage};
use image_manipulation::config::parse_config;
use image_manipulation::{ImageAsset, ImageError, Resize, Transformation};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Gradient with a transparent left half.
fn write_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let pixels = DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, alpha])
    }));
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") => DynamicImage::ImageRgb8(pixels.to_rgb8())
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap(),
        Some("gif") => pixels
            .save_with_format(&path, image::ImageFormat::Gif)
            .unwrap(),
        Some("png") => pixels
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap(),
        other => panic!("unsupported fixture extension {other:?}"),
    }
    path
}

fn resize(max_width: Option<u32>, max_height: Option<u32>, preserve: bool) -> Arc<Resize> {
    let mut resize = Resize::new();
    if let Some(w) = max_width {
        resize.set_max_width(w).unwrap();
    }
    if let Some(h) = max_height {
        resize.set_max_height(h).unwrap();
    }
    resize.set_preserve_aspect_ratio(preserve);
    Arc::new(resize)
}

#[test]
fn opens_each_supported_format() {
    let tmp = TempDir::new().unwrap();
    for (name, mime) in [
        ("a.gif", "image/gif"),
        ("a.jpg", "image/jpeg"),
        ("a.png", "image/png"),
    ] {
        let path = write_fixture(tmp.path(), name, 50, 30);
        let asset = ImageAsset::open(&path).unwrap();
        assert_eq!(asset.mime_type(), mime);
        assert_eq!(asset.width().unwrap(), 50);
        assert_eq!(asset.height().unwrap(), 30);
        assert_eq!(asset.file_name(), name);
        assert_eq!(asset.file_extension(), Path::new(name).extension().and_then(|e| e.to_str()));
    }
}

#[test]
fn rejects_missing_directory_and_text_files() {
    let tmp = TempDir::new().unwrap();
    let text = tmp.path().join("manifest.png");
    std::fs::write(&text, "{\"looks\": \"like json\"}").unwrap();

    for path in [tmp.path().join("file-not-exists"), tmp.path().to_path_buf(), text] {
        let err = ImageAsset::open(&path).unwrap_err();
        assert!(
            matches!(err, ImageError::InvalidInput(_)),
            "{} should be invalid input, got {err:?}",
            path.display()
        );
    }
}

#[test]
fn png_resize_round_trip() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "wide.png", 500, 300);
    let output = tmp.path().join("wide-200.png");

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(Some(200), None, true));
    let report = asset.apply_transformations().unwrap();
    assert_eq!(report.get("Resize"), Some(true));

    asset.save_transformed_file(&output, 0).unwrap();

    // 200 * (500 / 300) = 333.33 → 333
    assert_eq!(image::image_dimensions(&output).unwrap(), (200, 333));
    let reopened = ImageAsset::open(&output).unwrap();
    assert_eq!(reopened.mime_type(), "image/png");
    assert_eq!((reopened.width().unwrap(), reopened.height().unwrap()), (200, 333));
}

#[test]
fn jpeg_resize_round_trip_at_default_quality() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "tall.jpg", 300, 500);
    let output = tmp.path().join("tall-small.jpg");

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(None, Some(60), true));
    asset.apply_transformations().unwrap();
    asset.save_transformed_file_default(&output).unwrap();

    assert_eq!(image::image_dimensions(&output).unwrap(), (100, 60));
    assert_eq!(ImageAsset::open(&output).unwrap().mime_type(), "image/jpeg");
}

#[test]
fn gif_resize_round_trip_ignores_compression() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "anim.gif", 100, 60);
    let output = tmp.path().join("anim-small.gif");

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(None, Some(30), true));
    asset.apply_transformations().unwrap();
    asset.save_transformed_file(&output, 55).unwrap();

    // 30 * (100 / 60) = 50
    assert_eq!(image::image_dimensions(&output).unwrap(), (50, 30));
}

#[test]
fn exact_size_preserves_png_transparency() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "square.png", 500, 500);
    let output = tmp.path().join("square-out.png");

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(Some(500), Some(500), false));
    asset.apply_transformations().unwrap();
    asset.save_transformed_file(&output, 9).unwrap();

    let saved = image::open(&output).unwrap();
    assert_eq!((saved.width(), saved.height()), (500, 500));
    assert!(saved.color().has_alpha());
    assert_eq!(saved.to_rgba8().get_pixel(10, 10)[3], 0);
    assert_eq!(saved.to_rgba8().get_pixel(490, 10)[3], 255);
}

#[test]
fn disabled_transparency_flattens_png() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "alpha.png", 80, 40);
    let output = tmp.path().join("alpha-flat.png");

    let mut resize = Resize::new();
    resize
        .set_max_width(40)
        .unwrap()
        .set_preserve_png_transparency(false);
    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(Arc::new(resize));
    asset.apply_transformations().unwrap();
    asset.save_transformed_file(&output, 0).unwrap();

    let saved = image::open(&output).unwrap();
    assert!(!saved.color().has_alpha());
    // Transparent pixels composite onto black
    assert_eq!(saved.to_rgb8().get_pixel(2, 2).0, [0, 0, 0]);
}

#[test]
fn both_bounds_with_preserved_ratio_is_unsupported() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "a.png", 20, 10);

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(Some(10), Some(10), true));

    let err = asset.apply_transformations().unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedCombination));
    assert!(asset.transformed_buffer().is_none());
}

#[test]
fn save_without_transformation_fails() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "a.jpg", 20, 10);
    let output = tmp.path().join("never.jpg");

    let asset = ImageAsset::open(&source).unwrap();
    let err = asset.save_transformed_file(&output, 0).unwrap_err();

    assert!(matches!(err, ImageError::NoTransformedData));
    assert!(!output.exists());
}

#[test]
fn empty_registry_gives_empty_report() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "a.gif", 20, 10);

    let mut asset = ImageAsset::open(&source).unwrap();
    assert!(asset.apply_transformations().unwrap().is_empty());
}

#[test]
fn corrupt_image_body_reports_failure() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "whole.png", 64, 64);
    let bytes = std::fs::read(&source).unwrap();
    // Keep the signature and IHDR so sniffing and identify succeed, drop the pixel data.
    let truncated = tmp.path().join("truncated.png");
    std::fs::write(&truncated, &bytes[..40]).unwrap();

    let mut asset = ImageAsset::open(&truncated).unwrap();
    assert_eq!(asset.mime_type(), "image/png");
    asset.add_transformation(resize(Some(10), None, true));

    let report = asset.apply_transformations().unwrap();
    assert_eq!(report.get("Resize"), Some(false));
    assert!(asset.transformed_buffer().is_none());
}

#[test]
fn oversized_target_reports_failure_instead_of_allocating() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "tiny.png", 2, 1);

    // 100_000 x 200_000 RGBA would need 80 GB
    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(Some(100_000), None, true));

    let report = asset.apply_transformations().unwrap();
    assert_eq!(report.get("Resize"), Some(false));
    assert!(asset.transformed_buffer().is_none());
}

#[test]
fn target_beyond_u32_is_invalid_configuration() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "tiny.png", 2, 1);

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(resize(Some(u32::MAX), None, true));

    let err = asset.apply_transformations().unwrap_err();
    assert!(matches!(err, ImageError::InvalidConfiguration(_)));
    assert!(asset.transformed_buffer().is_none());
}

#[test]
fn resize_built_from_config() {
    let tmp = TempDir::new().unwrap();
    let source = write_fixture(tmp.path(), "cfg.png", 120, 80);
    let output = tmp.path().join("cfg-out.png");

    let config = parse_config(
        r#"
[resize]
max_width = 60
max_height = 20
preserve_aspect_ratio = false

[output]
compression = 6
"#,
    )
    .unwrap();

    let resize = Resize::from_config(&config.resize).unwrap();
    assert_eq!(resize.name(), "Resize");

    let mut asset = ImageAsset::open(&source).unwrap();
    asset.add_transformation(Arc::new(resize));
    asset.apply_transformations().unwrap();
    asset.save_with_config(&output, &config.output).unwrap();

    assert_eq!(image::image_dimensions(&output).unwrap(), (60, 20));
}
