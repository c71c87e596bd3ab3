//! Move command: relocate an image to another directory

use std::path::Path;

use crate::NametagError;
use crate::tags::TagRegistry;
use crate::view::{DirectoryView, MoveOutcome};

type Result<T> = std::result::Result<T, NametagError>;

/// Execute the mv command.
///
/// The tag suffix travels with the file; a collision at the destination is
/// resolved with the space-padded counter. Depending on the view mode and
/// the destination, the image either stays in the working set or is evicted.
///
/// # Errors
/// Returns an error if the file is not in the working set, the destination
/// is not a directory, or the move fails.
pub fn execute(
    view: &mut DirectoryView,
    registry: &mut TagRegistry,
    file: &Path,
    destination: &Path,
    quiet: bool,
) -> Result<()> {
    let id = super::resolve_image(view, file)?;
    let destination = destination.canonicalize().map_err(|e| {
        NametagError::InvalidInput(format!(
            "Cannot access destination '{}': {}",
            destination.display(),
            e
        ))
    })?;
    if !destination.is_dir() {
        return Err(NametagError::InvalidInput(format!(
            "'{}' is not a directory",
            destination.display()
        )));
    }

    let outcome = view.move_image(id, &destination, registry)?;
    if !quiet {
        match outcome {
            MoveOutcome::SameDirectory => {
                println!("'{}' is already in that directory", file.display());
            }
            MoveOutcome::Retained => {
                println!(
                    "Moved {} into {} (still in view)",
                    file.display(),
                    destination.display()
                );
            }
            MoveOutcome::Evicted => {
                println!("Moved {} out to {}", file.display(), destination.display());
            }
        }
    }
    Ok(())
}
