//! Image-specific error types
//!
//! Failures of the rename engine and of constructing a tagged file from a
//! directory entry. Collision resolution itself is never an error; only an
//! exhausted disambiguator search or a real I/O failure surfaces here.

use thiserror::Error;

use crate::naming::NamingError;

/// Errors for tagged-file construction and the rename engine
#[derive(Debug, Error)]
pub enum ImageError {
    /// Filename violates the suffix grammar
    #[error(transparent)]
    Name(#[from] NamingError),

    /// Path has no UTF-8 file name component
    #[error("path has no usable file name: {0}")]
    UnusableName(String),

    /// Path has no parent directory to rename within
    #[error("path has no parent directory: {0}")]
    NoParent(String),

    /// Disambiguator search exhausted without finding a free name
    #[error("gave up renaming to '{name}' after {attempts} collision attempts")]
    RenameFailed { name: String, attempts: usize },

    /// Filesystem rename failed for a non-collision reason
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
