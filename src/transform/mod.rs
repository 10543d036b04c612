//! Transformations applied to an [`ImageAsset`].
//!
//! A transformation reads the asset's metadata and original pixels and
//! produces a new pixel buffer. The asset is passed explicitly to
//! [`Transformation::apply`]; a transformation holds no reference to any
//! asset, so one configured instance can be shared (`Arc`) across assets and
//! threads.

mod resize;

pub use resize::Resize;

use crate::asset::ImageAsset;
use crate::error::ImageError;
use crate::imaging::PixelBuffer;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An operation that derives a new pixel buffer from an image.
pub trait Transformation: Send + Sync {
    /// Human-friendly name, used as the key in a [`TransformationReport`].
    fn name(&self) -> &str;

    /// Produce the transformed pixels.
    ///
    /// Caller errors (see [`ImageError::category`]) abort
    /// [`ImageAsset::apply_transformations`]; processing errors are recorded
    /// as a failed entry.
    fn apply(&self, image: &ImageAsset) -> Result<PixelBuffer, ImageError>;
}

/// Per-name success flags from one `apply_transformations` call.
///
/// Keys keep first-insertion order. Recording the same name again overwrites
/// the value in place, so two transformations named `"Resize"` yield a single
/// entry holding the later result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationReport {
    entries: Vec<(String, bool)>,
}

impl TransformationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, success: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = success,
            None => self.entries.push((name, success)),
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, success)| *success)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(name, success)| (name.as_str(), *success))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every recorded transformation succeeded (vacuously for none).
    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|(_, success)| *success)
    }
}

impl Serialize for TransformationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, success) in &self.entries {
            map.serialize_entry(name, success)?;
        }
        map.end()
    }
}
