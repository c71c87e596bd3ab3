//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and executes the operation against the directory view and registry.

use std::path::Path;

use crate::NametagError;
use crate::tags::ImageId;
use crate::view::DirectoryView;

pub mod list;
pub mod mv;
pub mod revert;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use list::execute as list;
pub use mv::execute as mv;
pub use revert::execute as revert;
pub use revert::history;
pub use tag::execute as tag;
pub use tag::untag;
pub use tags::delete as delete_tag;
pub use tags::execute as tags;

/// Resolve a user-supplied path to an image in the current working set
///
/// # Errors
/// Returns `NametagError::InvalidInput` if the path cannot be accessed or
/// does not back any image in the view.
pub(crate) fn resolve_image(view: &DirectoryView, file: &Path) -> Result<ImageId, NametagError> {
    let path = file.canonicalize().map_err(|e| {
        NametagError::InvalidInput(format!("Cannot access path '{}': {}", file.display(), e))
    })?;
    view.find_by_path(&path).ok_or_else(|| {
        NametagError::InvalidInput(format!(
            "'{}' is not an image in the current directory view",
            file.display()
        ))
    })
}
