//! Parameter types for backend operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the asset/transformation layer (which decides what to
//! produce) and the [`backend`](super::backend) (which does the actual pixel
//! work). This separation allows swapping backends (e.g. for testing with a
//! mock) without changing any asset logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100). Clamped on construction.
//! - [`PngCompression`] — zlib level (0–9). Clamped on construction.
//! - [`EncodeParams`] — per-format encoder settings derived from a caller's
//!   compression value.
//! - [`ResampleParams`] — target size and alpha handling for a resample.

use crate::mime::ImageKind;
use tracing::warn;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// PNG zlib compression level. 0 stores uncompressed, 9 is smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngCompression(pub u8);

impl PngCompression {
    pub const MAX_LEVEL: u8 = 9;

    pub fn new(level: u32) -> Self {
        Self(level.min(Self::MAX_LEVEL as u32) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

/// Encoder settings for one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeParams {
    Gif,
    Jpeg { quality: Quality },
    Png { compression: PngCompression },
}

impl EncodeParams {
    /// Interpret a caller-supplied compression value for the given format.
    ///
    /// - JPEG: `0` means maximum quality (100); other values are clamped to 1–100.
    /// - PNG: passed through as the zlib level; `0` is a legal level. Values
    ///   above 9 are capped at 9 and logged.
    /// - GIF: ignored.
    pub fn for_kind(kind: ImageKind, compression: u32) -> Self {
        match kind {
            ImageKind::Gif => EncodeParams::Gif,
            ImageKind::Jpeg => {
                let quality = if compression == 0 {
                    Quality::new(100)
                } else {
                    Quality::new(compression)
                };
                EncodeParams::Jpeg { quality }
            }
            ImageKind::Png => {
                if compression > PngCompression::MAX_LEVEL as u32 {
                    warn!(
                        compression,
                        level = PngCompression::MAX_LEVEL,
                        "PNG compression above the maximum zlib level, capping"
                    );
                }
                EncodeParams::Png {
                    compression: PngCompression::new(compression),
                }
            }
        }
    }
}

/// Parameters for a resampling copy of a full source into a new buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleParams {
    pub width: u32,
    pub height: u32,
    /// Keep per-pixel alpha with no blending. When false the result is
    /// composited onto an opaque black canvas.
    pub preserve_alpha: bool,
}
