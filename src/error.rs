//! Error taxonomy for assets and transformations.
//!
//! Errors fall into two categories:
//! - **Caller errors**: misuse detected at the call site (bad path, bad
//!   configuration, saving before transforming). Always returned to the
//!   caller, never swallowed.
//! - **Processing errors**: the backend failed to decode, resample, or encode.
//!   Inside [`ImageAsset::apply_transformations`](crate::ImageAsset::apply_transformations)
//!   these become a `false` entry in the report instead of an error.

use crate::imaging::BackendError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    CallerError,
    ProcessingError,
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Resize needs a max width or a max height")]
    MissingDimension,
    #[error("Use case not covered: max width and max height together with a preserved aspect ratio")]
    UnsupportedCombination,
    #[error("No transformed image data; apply a transformation first")]
    NoTransformedData,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ImageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImageError::Backend(_) => ErrorCategory::ProcessingError,
            _ => ErrorCategory::CallerError,
        }
    }

    pub fn is_caller_error(&self) -> bool {
        self.category() == ErrorCategory::CallerError
    }
}
