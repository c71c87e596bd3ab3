//! List command: show the working set of the current directory

use crate::NametagError;
use crate::output;
use crate::tags::TagRegistry;
use crate::view::DirectoryView;

type Result<T> = std::result::Result<T, NametagError>;

/// Execute the list command.
///
/// Prints subdirectories (tree mode) and images of the current directory,
/// optionally restricted to images carrying one tag.
///
/// # Errors
/// Returns `NametagError::InvalidInput` if no valid directory is selected.
pub fn execute(
    view: &DirectoryView,
    registry: &TagRegistry,
    tag_filter: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let Some(dir) = view.current_dir() else {
        return Err(NametagError::InvalidInput(
            "No valid directory selected".into(),
        ));
    };
    if !quiet {
        println!("{} ({} mode)", dir.display(), view.mode());
    }

    for subdir in view.subdirectories() {
        println!("{}", output::directory_line(subdir, quiet));
    }

    match tag_filter {
        Some(name) => {
            let members = registry.search(name);
            for id in members {
                if let Some(image) = view.image(id) {
                    println!("{}", output::image_line(image, registry, quiet));
                }
            }
        }
        None => {
            for image in view.images() {
                println!("{}", output::image_line(image, registry, quiet));
            }
        }
    }
    Ok(())
}
