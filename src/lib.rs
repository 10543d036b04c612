//! # Image Manipulation
//!
//! A small object model over the `image` crate: open a GIF, JPEG or PNG file,
//! read its metadata lazily, register transformations, apply them, and save
//! the result in the original format.
//!
//! ```no_run
//! use image_manipulation::{ImageAsset, Resize};
//! use std::sync::Arc;
//!
//! let mut asset = ImageAsset::open("photos/dawn.jpg")?;
//! println!("{}x{} {}", asset.width()?, asset.height()?, asset.mime_type());
//!
//! let mut resize = Resize::new();
//! resize.set_max_width(200)?;
//! asset.add_transformation(Arc::new(resize));
//!
//! let report = asset.apply_transformations()?;
//! if report.get("Resize") == Some(true) {
//!     asset.save_transformed_file("photos/dawn-200.jpg", 0)?;
//! }
//! # Ok::<(), image_manipulation::ImageError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`asset`] | [`ImageAsset`]: validated path, lazy metadata, transformation registry |
//! | [`transform`] | [`Transformation`] trait, [`Resize`], [`TransformationReport`] |
//! | [`mime`] | GIF / JPEG / PNG MIME classification |
//! | [`imaging`] | Backend trait, `image`-crate backend, pure dimension math |
//! | [`config`] | TOML defaults for resize and output settings |
//! | [`error`] | [`ImageError`] taxonomy |
//!
//! # Design Decisions
//!
//! ## Transformations Read the Original
//!
//! Each transformation reads the asset's original decoded pixels. Applying
//! several transformations does not chain them; the asset keeps the output
//! of the last one that succeeded.
//!
//! ## Explicit Image Parameter
//!
//! [`Transformation::apply`] receives the asset as an argument instead of
//! holding a reference to it. A configured transformation is therefore
//! stateless and can be shared across assets and threads behind an `Arc`.
//!
//! ## Swappable Backend
//!
//! All file and pixel work goes through [`imaging::ImageBackend`]. The
//! default [`imaging::RustBackend`] uses the `image` crate; tests plug in a
//! recording mock to count probes and inspect encoder settings.
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber.

pub mod asset;
pub mod config;
pub mod error;
pub mod imaging;
pub mod mime;
mod path_parts;
pub mod transform;

pub use asset::ImageAsset;
pub use error::{ErrorCategory, ImageError};
pub use mime::{ImageKind, is_kind, is_valid_image_kind};
pub use transform::{Resize, Transformation, TransformationReport};

#[cfg(test)]
pub(crate) mod test_helpers;
