//! Tags listing and tag deletion commands

use crate::NametagError;
use crate::audit::RenameAudit;
use crate::output;
use crate::tags::TagRegistry;
use crate::view::DirectoryView;

type Result<T> = std::result::Result<T, NametagError>;

/// Execute the tags command - list every known tag with its usage count
pub fn execute(registry: &TagRegistry, quiet: bool) {
    if registry.is_empty() {
        if !quiet {
            println!("No tags known");
        }
        return;
    }
    for (_, tag) in registry.iter() {
        println!(
            "{}",
            output::tag_with_count(tag.name(), tag.images().len(), quiet)
        );
    }
}

/// Execute the rm-tag command - delete a tag everywhere.
///
/// Every image carrying the tag is renamed on disk; the tag is then dropped
/// from the registry.
///
/// # Errors
/// Returns an error if the tag is unknown or one of the cascading renames
/// fails.
pub fn delete(
    view: &mut DirectoryView,
    registry: &mut TagRegistry,
    audit: &dyn RenameAudit,
    name: &str,
    quiet: bool,
) -> Result<()> {
    let Some(tag) = registry.find(name) else {
        return Err(NametagError::InvalidInput(format!("Unknown tag '{name}'")));
    };
    let member_count = registry.get(tag).map(|t| t.images().len()).unwrap_or(0);

    view.delete_tag(tag, registry, audit)?;

    if !quiet {
        println!("Deleted tag '{name}' from {member_count} image(s)");
    }
    Ok(())
}
