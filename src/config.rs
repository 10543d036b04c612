//! Configuration module.
//!
//! Loads default resize and output settings from a TOML file so callers can
//! keep them out of code.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! # max_width = 800               # Target width bound (omit for none)
//! # max_height = 600              # Target height bound (omit for none)
//! preserve_aspect_ratio = true    # Derive the other edge from the aspect ratio
//! preserve_png_transparency = true
//!
//! [output]
//! compression = 0                 # JPEG quality (0 = 100) or PNG zlib level; ignored for GIF
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! `output.compression` is validated against the JPEG range (0–100) because
//! one value serves every format. PNG output caps it at zlib level 9 and logs
//! a warning, so a PNG-only config should stay within 0–9. Pass the section
//! to [`ImageAsset::save_with_config`](crate::ImageAsset::save_with_config).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManipulationConfig {
    /// Resize transformation settings.
    pub resize: ResizeConfig,
    /// Encoder settings for saved files.
    pub output: OutputConfig,
}

impl ManipulationConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.max_width == Some(0) || self.resize.max_height == Some(0) {
            return Err(ConfigError::Validation(
                "resize.max_width and resize.max_height must be greater than 0".into(),
            ));
        }
        if self.output.compression > 100 {
            return Err(ConfigError::Validation(
                "output.compression must be 0-100".into(),
            ));
        }
        Ok(())
    }
}

/// Resize transformation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub preserve_aspect_ratio: bool,
    /// Keep the alpha channel when resizing PNG sources.
    pub preserve_png_transparency: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            preserve_aspect_ratio: true,
            preserve_png_transparency: true,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub compression: u32,
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<ManipulationConfig, ConfigError> {
    let config: ManipulationConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, or defaults if the file does not exist.
pub fn load_config(path: &Path) -> Result<ManipulationConfig, ConfigError> {
    if !path.exists() {
        return Ok(ManipulationConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# image-manipulation configuration
# All options are optional - defaults shown below

[resize]
# Target bounds in pixels. Set at least one before resizing.
# With preserve_aspect_ratio = true set exactly one of them.
# max_width = 800
# max_height = 600

# Derive the unset edge from the image's aspect ratio
preserve_aspect_ratio = true

# Keep the alpha channel when resizing PNG files
preserve_png_transparency = true

[output]
# JPEG: quality 1-100 (0 means 100)
# PNG:  zlib level 0-9 (0 means no compression, values above 9 act as 9)
# GIF:  ignored
compression = 0
"#
}
