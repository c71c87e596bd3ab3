//! Output formatting for CLI display
//!
//! Small helpers for rendering images, subdirectories, and tags on the
//! terminal. Quiet mode strips decoration down to machine-friendly lines.

use colored::Colorize;
use std::path::Path;

use crate::image::TaggedFile;
use crate::tags::TagRegistry;

/// Format one working-set image with its tags for display
#[must_use]
pub fn image_line(image: &TaggedFile, registry: &TagRegistry, quiet: bool) -> String {
    if quiet {
        return image.path().display().to_string();
    }
    let file_name = format!("{}{}", image.name(), image.extension());
    let tags = image.tag_names(registry);
    if tags.is_empty() {
        format!("  {file_name} (no tags)")
    } else {
        format!("  {} [{}]", file_name, tags.join(", "))
    }
}

/// Format one subdirectory entry for display
#[must_use]
pub fn directory_line(path: &Path, quiet: bool) -> String {
    if quiet {
        return path.display().to_string();
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    format!("  {}/", name.blue())
}

/// Format a tag with its usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {} (used by {count} image(s))", tag.green())
    }
}
