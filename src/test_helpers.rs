//! Shared test utilities: real image fixtures written into a temp directory.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let png = write_fixture(tmp.path(), "photo.png", 500, 300);
//! let notes = write_text_file(tmp.path(), "notes.txt", "hello");
//! ```

use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Gradient with a transparent left half, so alpha handling is observable.
pub fn fixture_pixels(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, alpha])
    })
}

/// Write a fixture image; the format follows the file extension
/// (`gif`, `jpg`/`jpeg`, `png`).
pub fn write_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let pixels = DynamicImage::ImageRgba8(fixture_pixels(width, height));
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => DynamicImage::ImageRgb8(pixels.to_rgb8())
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap(),
        "gif" => pixels
            .save_with_format(&path, image::ImageFormat::Gif)
            .unwrap(),
        "png" => pixels
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap(),
        other => panic!("no fixture format for extension '{other}'"),
    }
    path
}

/// Write a plain text file.
pub fn write_text_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
