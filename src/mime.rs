//! MIME type classification for the three supported raster formats.
//!
//! Matching is case-insensitive and works on the exact strings below; there
//! is no parameter parsing (`image/png; charset=...` is not an image type).
//!
//! | Kind | Accepted MIME types |
//! |------|---------------------|
//! | GIF  | `image/gif` |
//! | JPEG | `image/jpeg`, `image/jpg`, `image/pjpeg` |
//! | PNG  | `image/png` |

use image::ImageFormat;
use std::fmt;

const GIF_TYPES: &[&str] = &["image/gif"];
const JPEG_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/pjpeg"];
const PNG_TYPES: &[&str] = &["image/png"];

/// One of the recognized raster formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Gif,
    Jpeg,
    Png,
}

impl ImageKind {
    pub const ALL: [ImageKind; 3] = [ImageKind::Gif, ImageKind::Jpeg, ImageKind::Png];

    /// MIME strings that identify this kind.
    pub fn mime_types(self) -> &'static [&'static str] {
        match self {
            ImageKind::Gif => GIF_TYPES,
            ImageKind::Jpeg => JPEG_TYPES,
            ImageKind::Png => PNG_TYPES,
        }
    }

    /// Classify a MIME string, or `None` if it is not a recognized image type.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| is_kind(mime_type, *kind))
    }

    /// The codec format used to decode and encode this kind.
    pub fn image_format(self) -> ImageFormat {
        match self {
            ImageKind::Gif => ImageFormat::Gif,
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Gif => "gif",
            ImageKind::Jpeg => "jpeg",
            ImageKind::Png => "png",
        };
        f.write_str(name)
    }
}

/// True if `mime_type` is any recognized image type.
pub fn is_valid_image_kind(mime_type: &str) -> bool {
    ImageKind::from_mime(mime_type).is_some()
}

/// True if `mime_type` belongs to `kind`.
pub fn is_kind(mime_type: &str, kind: ImageKind) -> bool {
    kind.mime_types()
        .iter()
        .any(|known| known.eq_ignore_ascii_case(mime_type))
}
