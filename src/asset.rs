//! The image asset: a validated file path with lazily resolved metadata.
//!
//! ## Lazy fields
//!
//! | Field | Resolved by | When |
//! |-------|-------------|------|
//! | MIME type | [`ImageBackend::probe_file`] | construction |
//! | width / height | [`ImageBackend::identify`] | first access to either |
//! | aspect ratio | [`calculate_aspect_ratio`] | first access |
//! | path parts | [`PathParts::from_path`] | first access to any part |
//! | pixels | [`ImageBackend::decode`] | first access |
//!
//! Each field is a [`OnceCell`], so it is computed at most once per asset and
//! an asset is not `Sync`. A failed resolution leaves the cell empty and the
//! next access retries.
//!
//! ## Applying transformations
//!
//! Every registered transformation reads the *original* decoded pixels, not
//! the previous transformation's output. After
//! [`apply_transformations`](ImageAsset::apply_transformations) the
//! transformed buffer holds the output of the last transformation that
//! succeeded.

use crate::config::OutputConfig;
use crate::error::ImageError;
use crate::imaging::{
    Dimensions, EncodeParams, FileProbe, ImageBackend, PixelBuffer, RustBackend,
    calculate_aspect_ratio,
};
use crate::mime::ImageKind;
use crate::path_parts::PathParts;
use crate::transform::{Transformation, TransformationReport};
use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// A GIF, JPEG or PNG file on disk.
pub struct ImageAsset {
    path: PathBuf,
    mime_type: String,
    kind: ImageKind,
    backend: Arc<dyn ImageBackend>,
    dimensions: OnceCell<Dimensions>,
    aspect_ratio: OnceCell<f64>,
    path_parts: OnceCell<PathParts>,
    pixels: OnceCell<PixelBuffer>,
    transformed: Option<PixelBuffer>,
    transformations: Vec<Arc<dyn Transformation>>,
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("path", &self.path)
            .field("mime_type", &self.mime_type)
            .field("dimensions", &self.dimensions.get())
            .field("decoded", &self.pixels.get().is_some())
            .field("transformed", &self.transformed.is_some())
            .field("transformations", &self.transformations.len())
            .finish()
    }
}

impl ImageAsset {
    /// Open `path` with the production [`RustBackend`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        Self::open_with(path, Arc::new(RustBackend::new()))
    }

    /// Open `path` using `backend` for all file and pixel operations.
    ///
    /// Fails with [`ImageError::InvalidInput`] when the path does not exist,
    /// is not a regular file, or its content is not a GIF, JPEG or PNG.
    pub fn open_with(
        path: impl AsRef<Path>,
        backend: Arc<dyn ImageBackend>,
    ) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let probe = backend.probe_file(path).map_err(|e| {
            ImageError::InvalidInput(format!("cannot inspect {}: {e}", path.display()))
        })?;
        let mime_type = match probe {
            FileProbe::Missing => {
                return Err(ImageError::InvalidInput(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            FileProbe::NotAFile => {
                return Err(ImageError::InvalidInput(format!(
                    "{} is not a regular file",
                    path.display()
                )));
            }
            FileProbe::Regular { mime_type } => mime_type,
        };
        let kind = ImageKind::from_mime(&mime_type).ok_or_else(|| {
            ImageError::InvalidInput(format!(
                "{} is not a supported image ({mime_type})",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), %mime_type, "opened image");

        Ok(Self {
            path: path.to_path_buf(),
            mime_type,
            kind,
            backend,
            dimensions: OnceCell::new(),
            aspect_ratio: OnceCell::new(),
            path_parts: OnceCell::new(),
            pixels: OnceCell::new(),
            transformed: None,
            transformations: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sniffed MIME type, exactly as reported by the backend.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn backend(&self) -> &dyn ImageBackend {
        self.backend.as_ref()
    }

    fn dimensions(&self) -> Result<Dimensions, ImageError> {
        if let Some(dims) = self.dimensions.get() {
            return Ok(*dims);
        }
        let dims = self.backend.identify(&self.path)?;
        if dims.width == 0 || dims.height == 0 {
            return Err(ImageError::InvalidInput(format!(
                "{} has no pixels ({}x{})",
                self.path.display(),
                dims.width,
                dims.height
            )));
        }
        Ok(*self.dimensions.get_or_init(|| dims))
    }

    pub fn width(&self) -> Result<u32, ImageError> {
        Ok(self.dimensions()?.width)
    }

    pub fn height(&self) -> Result<u32, ImageError> {
        Ok(self.dimensions()?.height)
    }

    /// Longer edge over shorter edge; `1.0` for a square.
    pub fn aspect_ratio(&self) -> Result<f64, ImageError> {
        if let Some(ratio) = self.aspect_ratio.get() {
            return Ok(*ratio);
        }
        let dims = self.dimensions()?;
        let ratio = calculate_aspect_ratio(dims.width, dims.height);
        Ok(*self.aspect_ratio.get_or_init(|| ratio))
    }

    fn path_parts(&self) -> &PathParts {
        self.path_parts
            .get_or_init(|| PathParts::from_path(&self.path))
    }

    /// Base name including the extension.
    pub fn file_name(&self) -> &str {
        &self.path_parts().file_name
    }

    /// Containing directory.
    pub fn file_path(&self) -> &str {
        &self.path_parts().directory
    }

    pub fn file_extension(&self) -> Option<&str> {
        self.path_parts().extension.as_deref()
    }

    /// The decoded original pixels.
    pub fn pixel_buffer(&self) -> Result<&PixelBuffer, ImageError> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels);
        }
        let decoded = self.backend.decode(&self.path, self.kind)?;
        Ok(self.pixels.get_or_init(|| decoded))
    }

    /// Output of the last successful transformation, if any.
    pub fn transformed_buffer(&self) -> Option<&PixelBuffer> {
        self.transformed.as_ref()
    }

    /// Register a transformation. The same `Arc` is only registered once;
    /// distinct instances with equal settings are both kept.
    ///
    /// Returns whether it was added.
    pub fn add_transformation(&mut self, transformation: Arc<dyn Transformation>) -> bool {
        if self
            .transformations
            .iter()
            .any(|registered| Arc::ptr_eq(registered, &transformation))
        {
            return false;
        }
        self.transformations.push(transformation);
        true
    }

    pub fn transformations(&self) -> &[Arc<dyn Transformation>] {
        &self.transformations
    }

    /// Apply every registered transformation in registration order.
    ///
    /// A transformation that fails with a processing error is recorded as
    /// `false` and the rest still run. A caller error (e.g.
    /// [`ImageError::MissingDimension`]) is returned immediately.
    pub fn apply_transformations(&mut self) -> Result<TransformationReport, ImageError> {
        let mut report = TransformationReport::new();

        for transformation in &self.transformations {
            let name = transformation.name();
            match transformation.apply(self) {
                Ok(output) => {
                    debug!(path = %self.path.display(), transformation = name, "applied");
                    self.transformed = Some(output);
                    report.record(name, true);
                }
                Err(e) if e.is_caller_error() => return Err(e),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        transformation = name,
                        error = %e,
                        "transformation failed"
                    );
                    report.record(name, false);
                }
            }
        }

        Ok(report)
    }

    /// Encode the transformed pixels to `output` in this asset's format.
    ///
    /// `compression` is interpreted per format by [`EncodeParams::for_kind`]:
    /// JPEG quality with `0` meaning 100, PNG zlib level, ignored for GIF.
    pub fn save_transformed_file(
        &self,
        output: impl AsRef<Path>,
        compression: u32,
    ) -> Result<&PixelBuffer, ImageError> {
        let pixels = self
            .transformed
            .as_ref()
            .ok_or(ImageError::NoTransformedData)?;
        let params = EncodeParams::for_kind(self.kind, compression);
        self.backend.encode(pixels, output.as_ref(), &params)?;
        Ok(pixels)
    }

    /// [`save_transformed_file`](Self::save_transformed_file) with compression `0`.
    pub fn save_transformed_file_default(
        &self,
        output: impl AsRef<Path>,
    ) -> Result<&PixelBuffer, ImageError> {
        self.save_transformed_file(output, 0)
    }

    /// [`save_transformed_file`](Self::save_transformed_file) with the
    /// compression from a loaded `[output]` config section.
    pub fn save_with_config(
        &self,
        output: impl AsRef<Path>,
        config: &OutputConfig,
    ) -> Result<&PixelBuffer, ImageError> {
        self.save_transformed_file(output, config.compression)
    }
}
