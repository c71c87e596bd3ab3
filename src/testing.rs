//! Testing utilities for nametag
//!
//! Helpers for building temporary directory trees of fake image files.
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

/// Create a unique temporary directory for one test
///
/// # Panics
/// Panics if the directory cannot be created.
#[must_use]
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Create a fake image file with the given name inside `dir`
///
/// The content is irrelevant: image classification is by extension, and the
/// rename engine only ever moves the file.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn image_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not really pixels").expect("failed to write test image");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_file_lands_in_the_given_directory() {
        let dir = temp_dir();
        let path = image_file(dir.path(), "x.jpg");
        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), dir.path());
    }
}
