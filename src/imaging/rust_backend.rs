//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | File probe | `std::fs::metadata` + `image::guess_format` on the file header |
//! | Identify | `image::image_dimensions` |
//! | Decode (GIF, JPEG, PNG) | `image::ImageReader` with the format forced from the MIME kind |
//! | Resample | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality 1–100) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (zlib level 0–9, adaptive filter) |
//! | Encode → GIF | `image::codecs::gif::GifEncoder` |
//!
//! Encoded bytes are buffered in memory and written to disk only once the
//! encoder succeeds, so a failed save never truncates an existing file.
//! Resampling is refused when its buffers would exceed the allocation limit
//! of [`image::Limits::default`].

use super::backend::{BackendError, Dimensions, FileProbe, ImageBackend, PixelBuffer};
use super::params::{EncodeParams, ResampleParams};
use crate::mime::ImageKind;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Reported for regular files whose content matches no known image format.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Bytes read from the start of a file for format sniffing.
const SNIFF_LEN: u64 = 64;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Sniff the MIME type from the first bytes of a file.
fn sniff_mime_type(path: &Path) -> Result<String, BackendError> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(image::guess_format(&header)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MIME_TYPE.to_string()))
}

/// Bytes per pixel of the `Rgba32F` intermediate `imageops::resize` builds.
const RESAMPLE_WORK_BYTES_PER_PIXEL: u64 = 16;

/// Bytes per pixel of the `Rgba8` resample output.
const RESAMPLE_OUTPUT_BYTES_PER_PIXEL: u64 = 4;

/// Reject resample targets whose buffers overflow or exceed the `image`
/// crate's default allocation limit.
fn check_resample_allocation(
    source: &PixelBuffer,
    params: &ResampleParams,
) -> Result<(), BackendError> {
    let too_large = || {
        BackendError::ProcessingFailed(format!(
            "Resampling {}x{} to {}x{} exceeds the allocation limit",
            source.width(),
            source.height(),
            params.width,
            params.height
        ))
    };
    let work = u64::from(source.width())
        .checked_mul(u64::from(params.height))
        .and_then(|px| px.checked_mul(RESAMPLE_WORK_BYTES_PER_PIXEL))
        .ok_or_else(too_large)?;
    let output = u64::from(params.width)
        .checked_mul(u64::from(params.height))
        .and_then(|px| px.checked_mul(RESAMPLE_OUTPUT_BYTES_PER_PIXEL))
        .ok_or_else(too_large)?;
    let total = work.checked_add(output).ok_or_else(too_large)?;

    match image::Limits::default().max_alloc {
        Some(limit) if total > limit => Err(too_large()),
        _ => Ok(()),
    }
}

/// Composite RGBA pixels onto an opaque black canvas.
fn flatten_onto_black(pixels: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let Rgba([r, g, b, a]) = *pixels.get_pixel(x, y);
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn write_jpeg<W: Write>(
    pixels: &DynamicImage,
    writer: &mut W,
    quality: u8,
) -> Result<(), BackendError> {
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    // JPEG has no alpha channel
    let result = if pixels.color().has_alpha() {
        DynamicImage::ImageRgb8(pixels.to_rgb8()).write_with_encoder(encoder)
    } else {
        pixels.write_with_encoder(encoder)
    };
    result.map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

fn write_png<W: Write>(pixels: &DynamicImage, writer: &mut W, level: u8) -> Result<(), BackendError> {
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Level(level), PngFilter::Adaptive);
    pixels
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
}

fn write_gif<W: Write>(pixels: &DynamicImage, writer: &mut W) -> Result<(), BackendError> {
    let mut encoder = GifEncoder::new(writer);
    let rgba = pixels.to_rgba8();
    encoder
        .encode(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| BackendError::ProcessingFailed(format!("GIF encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn probe_file(&self, path: &Path) -> Result<FileProbe, BackendError> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileProbe::Missing),
            Err(e) => return Err(BackendError::Io(e)),
        };
        if !metadata.is_file() {
            return Ok(FileProbe::NotAFile);
        }
        let mime_type = sniff_mime_type(path)?;
        debug!(path = %path.display(), %mime_type, "sniffed file");
        Ok(FileProbe::Regular { mime_type })
    }

    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        debug!(path = %path.display(), width, height, "identified image");
        Ok(Dimensions { width, height })
    }

    fn decode(&self, path: &Path, kind: ImageKind) -> Result<PixelBuffer, BackendError> {
        let mut reader = ImageReader::open(path)?;
        reader.set_format(kind.image_format());
        let pixels = reader.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), %kind, color = ?pixels.color(), "decoded image");
        Ok(pixels)
    }

    fn encode(
        &self,
        pixels: &PixelBuffer,
        output: &Path,
        params: &EncodeParams,
    ) -> Result<(), BackendError> {
        let mut encoded = Vec::new();
        match params {
            EncodeParams::Jpeg { quality } => {
                write_jpeg(pixels, &mut encoded, quality.value() as u8)?
            }
            EncodeParams::Png { compression } => write_png(pixels, &mut encoded, compression.level())?,
            EncodeParams::Gif => write_gif(pixels, &mut encoded)?,
        }
        // Overwrites an existing file
        fs::write(output, &encoded)?;
        debug!(output = %output.display(), ?params, bytes = encoded.len(), "encoded image");
        Ok(())
    }

    fn resample(
        &self,
        source: &PixelBuffer,
        params: &ResampleParams,
    ) -> Result<PixelBuffer, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot resample to {}x{}",
                params.width, params.height
            )));
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(BackendError::ProcessingFailed(
                "Cannot resample an empty image".to_string(),
            ));
        }
        check_resample_allocation(source, params)?;

        let resized = image::imageops::resize(
            &source.to_rgba8(),
            params.width,
            params.height,
            FilterType::Lanczos3,
        );
        debug!(
            from_width = source.width(),
            from_height = source.height(),
            width = params.width,
            height = params.height,
            preserve_alpha = params.preserve_alpha,
            "resampled image"
        );

        Ok(if params.preserve_alpha {
            DynamicImage::ImageRgba8(resized)
        } else {
            DynamicImage::ImageRgb8(flatten_onto_black(&resized))
        })
    }
}
