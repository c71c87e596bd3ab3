//! Naming-specific error types
//!
//! Errors raised while parsing encoded filenames or validating tag names.
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Errors for the filename suffix grammar and tag-name validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// File name has no `.`-delimited extension
    #[error("file name has no extension: {0}")]
    MissingExtension(String),

    /// Tag names must be non-empty
    #[error("tag name is empty")]
    EmptyTagName,

    /// Tag names must not contain the encoding delimiter
    #[error("tag name '{0}' contains the reserved delimiter ' @'")]
    ReservedDelimiter(String),

    /// A leading dot would be ambiguous with the extension separator
    #[error("tag name '{0}' starts with '.'")]
    LeadingDot(String),
}
