//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::error::ImageError;

/// Ratio of the longer edge to the shorter edge, always `>= 1.0`.
///
/// # Examples
/// ```
/// # use image_manipulation::imaging::calculate_aspect_ratio;
/// assert_eq!(calculate_aspect_ratio(500, 300), 500.0 / 300.0);
/// assert_eq!(calculate_aspect_ratio(300, 500), 500.0 / 300.0);
/// assert_eq!(calculate_aspect_ratio(100, 100), 1.0);
/// ```
pub fn calculate_aspect_ratio(width: u32, height: u32) -> f64 {
    if width > height {
        width as f64 / height as f64
    } else if height > width {
        height as f64 / width as f64
    } else {
        1.0
    }
}

/// Calculate resize target dimensions from optional bounds.
///
/// Rules are evaluated in order, the first match wins:
///
/// 1. Only `max_height`, preserving ratio → `(round(max_height * ratio), max_height)`
/// 2. Only `max_width`, preserving ratio → `(max_width, round(max_width * ratio))`
/// 3. Not preserving ratio → `(max_width, max_height)`, both required
/// 4. Both bounds while preserving ratio → [`ImageError::UnsupportedCombination`]
///
/// A derived edge that does not fit in a `u32` is an
/// [`ImageError::InvalidConfiguration`].
///
/// `aspect_ratio` is the longer/shorter ratio from [`calculate_aspect_ratio`],
/// so it is multiplied in regardless of orientation. A landscape image
/// bounded by width therefore grows taller, not shorter.
///
/// # Examples
/// ```
/// # use image_manipulation::imaging::calculate_resize_dimensions;
/// let ratio = 500.0 / 300.0;
/// assert_eq!(calculate_resize_dimensions(ratio, Some(200), None, true).unwrap(), (200, 333));
/// assert_eq!(calculate_resize_dimensions(ratio, None, Some(300), true).unwrap(), (500, 300));
/// ```
pub fn calculate_resize_dimensions(
    aspect_ratio: f64,
    max_width: Option<u32>,
    max_height: Option<u32>,
    preserve_aspect_ratio: bool,
) -> Result<(u32, u32), ImageError> {
    if max_width.is_none() && max_height.is_none() {
        return Err(ImageError::MissingDimension);
    }

    let (width, height) = match (max_width, max_height, preserve_aspect_ratio) {
        (None, Some(h), true) => (h as f64 * aspect_ratio, h as f64),
        (Some(w), None, true) => (w as f64, w as f64 * aspect_ratio),
        (Some(w), Some(h), false) => (w as f64, h as f64),
        (_, _, false) => {
            return Err(ImageError::InvalidConfiguration(
                "both max width and max height are required when the aspect ratio is not preserved"
                    .into(),
            ));
        }
        _ => return Err(ImageError::UnsupportedCombination),
    };

    // f64::round rounds half away from zero
    Ok((to_edge(width)?, to_edge(height)?))
}

/// Round an edge length and convert it without saturating.
fn to_edge(length: f64) -> Result<u32, ImageError> {
    let rounded = length.round();
    if !rounded.is_finite() || rounded > u32::MAX as f64 {
        return Err(ImageError::InvalidConfiguration(format!(
            "target edge {rounded} exceeds the maximum of {} pixels",
            u32::MAX
        )));
    }
    Ok(rounded as u32)
}
