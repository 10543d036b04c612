//! Image processing — pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **File probe** | `image::guess_format` on the file header |
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` |
//! | **Resample** | `image::imageops::resize` (Lanczos3) |
//! | **Encode** | JPEG / PNG / GIF encoders from `image::codecs` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encode/resample operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, FileProbe, ImageBackend, PixelBuffer};
pub use calculations::{calculate_aspect_ratio, calculate_resize_dimensions};
pub use params::{EncodeParams, PngCompression, Quality, ResampleParams};
pub use rust_backend::RustBackend;
