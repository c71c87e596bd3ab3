//! Nametag - tag images by writing the tags into their filenames
//!
//! This library encodes human-readable tags directly into image filenames
//! (`Photo @Red @Outdoor.jpg`) and keeps an in-memory working set in lockstep
//! with the directory on disk. The filename is the persisted state: tag
//! membership is always derivable by rescanning, and there is no database.

use thiserror::Error;

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod image;
pub mod naming;
pub mod output;
pub mod tags;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum NametagError {
    /// Filename grammar or tag-name validation error
    #[error("Naming error: {0}")]
    NamingError(#[from] naming::NamingError),
    /// Rename engine or tagged-file construction error
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
    /// Directory scan or move error
    #[error("View error: {0}")]
    ViewError(#[from] view::ViewError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
