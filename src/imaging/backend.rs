//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the five collaborators every asset
//! depends on: file probing, dimension probing, decode, encode, and resample.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` in this module.

use super::params::{EncodeParams, ResampleParams};
use crate::mime::ImageKind;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

/// Decoded pixels. Owned exclusively by whoever holds it; dropped with it.
pub type PixelBuffer = DynamicImage;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What the filesystem knows about a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileProbe {
    Missing,
    /// Exists but is a directory or other non-regular file.
    NotAFile,
    /// A regular file with its content-sniffed MIME type.
    Regular { mime_type: String },
}

/// Trait for image processing backends.
///
/// Every backend must implement all five operations so assets and
/// transformations stay backend-agnostic. Implementations are shared behind
/// an `Arc`, hence `Send + Sync`.
pub trait ImageBackend: Send + Sync {
    /// Check existence and sniff the MIME type from file content, not the
    /// extension.
    fn probe_file(&self, path: &Path) -> Result<FileProbe, BackendError>;

    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the file as the given kind.
    fn decode(&self, path: &Path, kind: ImageKind) -> Result<PixelBuffer, BackendError>;

    /// Encode `pixels` to `output`, overwriting any existing file.
    fn encode(
        &self,
        pixels: &PixelBuffer,
        output: &Path,
        params: &EncodeParams,
    ) -> Result<(), BackendError>;

    /// Resampling copy of the full source into a new buffer of the target size.
    fn resample(
        &self,
        source: &PixelBuffer,
        params: &ResampleParams,
    ) -> Result<PixelBuffer, BackendError>;
}
