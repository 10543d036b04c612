//! Resize transformation.
//!
//! Target dimensions come from [`calculate_resize_dimensions`]; the pixel
//! work is a Lanczos3 resample done by the asset's backend.

use super::Transformation;
use crate::asset::ImageAsset;
use crate::config::ResizeConfig;
use crate::error::ImageError;
use crate::imaging::{PixelBuffer, ResampleParams, calculate_resize_dimensions};
use crate::mime::ImageKind;
use tracing::debug;

/// Resize to a maximum width and/or height.
///
/// ```
/// # use image_manipulation::Resize;
/// let mut resize = Resize::new();
/// resize.set_max_width(200)?.set_preserve_aspect_ratio(true);
/// assert_eq!(resize.max_width(), Some(200));
/// assert!(resize.set_max_height(0).is_err());
/// # Ok::<(), image_manipulation::ImageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resize {
    max_width: Option<u32>,
    max_height: Option<u32>,
    preserve_aspect_ratio: bool,
    preserve_png_transparency: bool,
}

impl Default for Resize {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            preserve_aspect_ratio: true,
            preserve_png_transparency: true,
        }
    }
}

fn validate_dimension(value: u32, what: &str) -> Result<u32, ImageError> {
    if value == 0 {
        return Err(ImageError::InvalidConfiguration(format!(
            "{what} must be greater than 0"
        )));
    }
    Ok(value)
}

impl Resize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resize from a `[resize]` config section.
    pub fn from_config(config: &ResizeConfig) -> Result<Self, ImageError> {
        let mut resize = Self::new();
        if let Some(width) = config.max_width {
            resize.set_max_width(width)?;
        }
        if let Some(height) = config.max_height {
            resize.set_max_height(height)?;
        }
        resize
            .set_preserve_aspect_ratio(config.preserve_aspect_ratio)
            .set_preserve_png_transparency(config.preserve_png_transparency);
        Ok(resize)
    }

    pub fn set_max_width(&mut self, width: u32) -> Result<&mut Self, ImageError> {
        self.max_width = Some(validate_dimension(width, "max width")?);
        Ok(self)
    }

    pub fn set_max_height(&mut self, height: u32) -> Result<&mut Self, ImageError> {
        self.max_height = Some(validate_dimension(height, "max height")?);
        Ok(self)
    }

    pub fn set_preserve_aspect_ratio(&mut self, value: bool) -> &mut Self {
        self.preserve_aspect_ratio = value;
        self
    }

    pub fn set_preserve_png_transparency(&mut self, value: bool) -> &mut Self {
        self.preserve_png_transparency = value;
        self
    }

    pub fn max_width(&self) -> Option<u32> {
        self.max_width
    }

    pub fn max_height(&self) -> Option<u32> {
        self.max_height
    }

    pub fn preserve_aspect_ratio(&self) -> bool {
        self.preserve_aspect_ratio
    }

    pub fn preserve_png_transparency(&self) -> bool {
        self.preserve_png_transparency
    }

    /// Target size for `image`, without touching its pixels.
    pub fn target_dimensions(&self, image: &ImageAsset) -> Result<(u32, u32), ImageError> {
        if self.max_width.is_none() && self.max_height.is_none() {
            return Err(ImageError::MissingDimension);
        }
        calculate_resize_dimensions(
            image.aspect_ratio()?,
            self.max_width,
            self.max_height,
            self.preserve_aspect_ratio,
        )
    }
}

impl Transformation for Resize {
    fn name(&self) -> &str {
        "Resize"
    }

    fn apply(&self, image: &ImageAsset) -> Result<PixelBuffer, ImageError> {
        let (width, height) = self.target_dimensions(image)?;
        let params = ResampleParams {
            width,
            height,
            preserve_alpha: image.kind() == ImageKind::Png && self.preserve_png_transparency,
        };
        debug!(
            path = %image.path().display(),
            width,
            height,
            preserve_alpha = params.preserve_alpha,
            "resizing"
        );

        let source = image.pixel_buffer()?;
        Ok(image.backend().resample(source, &params)?)
    }
}
