//! View-specific error types

use thiserror::Error;

use crate::image::ImageError;

/// Errors for directory scanning and image moves
#[derive(Debug, Error)]
pub enum ViewError {
    /// No valid directory is currently selected
    #[error("no directory is currently selected")]
    NoDirectory,

    /// The image handle does not belong to the current working set
    #[error("image is not part of the current working set")]
    UnknownImage,

    /// Move collision search exhausted without finding a free name
    #[error("gave up moving '{name}' after {attempts} collision attempts")]
    MoveFailed { name: String, attempts: usize },

    /// A rename triggered by a tag operation failed
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Filesystem move failed for a non-collision reason
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
