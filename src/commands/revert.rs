//! History and revert commands

use std::path::Path;

use crate::NametagError;
use crate::audit::RenameAudit;
use crate::tags::TagRegistry;
use crate::view::DirectoryView;

type Result<T> = std::result::Result<T, NametagError>;

/// Execute the history command - print every name the image has held
///
/// # Errors
/// Returns an error if the file is not in the working set.
pub fn history(view: &DirectoryView, file: &Path) -> Result<()> {
    let id = super::resolve_image(view, file)?;
    if let Some(image) = view.image(id) {
        for name in image.rename_history() {
            println!("{name}{}", image.extension());
        }
    }
    Ok(())
}

/// Execute the revert command - roll an image back to a previous name.
///
/// A name the image has never held leaves everything unchanged.
///
/// # Errors
/// Returns an error if the file is not in the working set or the rename
/// fails.
pub fn execute(
    view: &mut DirectoryView,
    registry: &mut TagRegistry,
    audit: &dyn RenameAudit,
    file: &Path,
    name: &str,
    quiet: bool,
) -> Result<()> {
    let id = super::resolve_image(view, file)?;
    let image = view
        .image_mut(id)
        .ok_or_else(|| NametagError::InvalidInput("Image left the working set".into()))?;
    image.revert(name, registry, audit)?;

    if !quiet
        && let Some(image) = view.image(id)
    {
        println!("Now named {}{}", image.name(), image.extension());
    }
    Ok(())
}
