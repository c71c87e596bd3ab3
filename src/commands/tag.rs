//! Tag and untag commands

use std::path::Path;

use crate::NametagError;
use crate::audit::RenameAudit;
use crate::naming;
use crate::tags::TagRegistry;
use crate::view::DirectoryView;

type Result<T> = std::result::Result<T, NametagError>;

/// Execute the tag command - apply tags to an image in order.
///
/// Each tag is validated against the suffix grammar, resolved through the
/// registry (created on first reference), and assigned; every assignment
/// renames the backing file.
///
/// # Errors
/// Returns an error if no tags are given, a tag name is invalid, the file is
/// not in the working set, or a rename fails.
pub fn execute(
    view: &mut DirectoryView,
    registry: &mut TagRegistry,
    audit: &dyn RenameAudit,
    file: &Path,
    tags: &[String],
    quiet: bool,
) -> Result<()> {
    if tags.is_empty() {
        return Err(NametagError::InvalidInput("No tags provided".into()));
    }
    for name in tags {
        naming::validate_tag_name(name)?;
    }

    let id = super::resolve_image(view, file)?;
    for name in tags {
        let tag = registry.get_or_create(name);
        let image = view
            .image_mut(id)
            .ok_or_else(|| NametagError::InvalidInput("Image left the working set".into()))?;
        image.assign_tag(tag, registry, audit)?;
    }

    if !quiet
        && let Some(image) = view.image(id)
    {
        println!(
            "Tagged {} with: {} -> {}{}",
            file.display(),
            tags.join(", "),
            image.name(),
            image.extension()
        );
    }
    Ok(())
}

/// Execute the untag command - remove tags from an image.
///
/// Removing a tag the image does not carry is a no-op; with `all` every
/// assigned tag is removed.
///
/// # Errors
/// Returns an error if neither tags nor `--all` are given, the file is not
/// in the working set, or a rename fails.
pub fn untag(
    view: &mut DirectoryView,
    registry: &mut TagRegistry,
    audit: &dyn RenameAudit,
    file: &Path,
    tags: &[String],
    all: bool,
    quiet: bool,
) -> Result<()> {
    if tags.is_empty() && !all {
        return Err(NametagError::InvalidInput(
            "No tags provided. Pass tag names or --all to remove all tags".into(),
        ));
    }

    let id = super::resolve_image(view, file)?;
    let to_remove = if all {
        view.image(id)
            .map(|image| image.assigned_tags().to_vec())
            .unwrap_or_default()
    } else {
        tags.iter()
            .filter_map(|name| registry.find(name))
            .collect()
    };

    for tag in to_remove {
        let image = view
            .image_mut(id)
            .ok_or_else(|| NametagError::InvalidInput("Image left the working set".into()))?;
        image.remove_tag(tag, registry, audit)?;
    }

    if !quiet
        && let Some(image) = view.image(id)
    {
        println!(
            "Untagged {} -> {}{}",
            file.display(),
            image.name(),
            image.extension()
        );
    }
    Ok(())
}
