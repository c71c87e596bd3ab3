//! Tagged files and the rename engine
//!
//! A [`TaggedFile`] is one image's tag-derived identity, rebuilt from its
//! filename on every scan: the filename is the persisted state. Mutating the
//! assigned tags regenerates the encoded name, renames the backing file on
//! disk (resolving collisions with the numeric disambiguator), reports the
//! change to the audit collaborator, and records the new name in the rename
//! history.
//!
//! Every mutation keeps both sides of the tag↔image relation in step: the
//! ordered tag list here and the image set inside each [`Tag`] are updated
//! together, and rolled back together if the filesystem rename fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::audit::RenameAudit;
use crate::naming::{
    self, MAX_COLLISION_ATTEMPTS, TAG_DELIMITER, compose_name, rename_candidate,
};
use crate::tags::{ImageId, TagId, TagRegistry};

pub mod error;

pub use error::ImageError;

/// One image file and its tag-derived state
#[derive(Debug, Clone)]
pub struct TaggedFile {
    id: ImageId,
    /// Name portion before any tag suffix, fixed at construction
    original_base: String,
    /// Current full base name including tag suffix, no extension
    current_name: String,
    /// Extension with leading dot, e.g. `.jpg`
    extension: String,
    /// Current location of the backing file
    path: PathBuf,
    /// Assigned tags in application order, no duplicates
    assigned_tags: Vec<TagId>,
    /// Every distinct base name this file has held, oldest first
    rename_history: Vec<String>,
}

impl TaggedFile {
    /// Build a tagged file from a filesystem entry.
    ///
    /// A pre-existing tag suffix is parsed, each tag resolved through the
    /// registry (creating it on first reference), and this file registered in
    /// each tag's image set. The history is seeded with the current name.
    ///
    /// # Errors
    /// Returns `ImageError` if the path has no UTF-8 file name or the name
    /// has no extension.
    pub fn from_path(
        id: ImageId,
        path: &Path,
        registry: &mut TagRegistry,
    ) -> Result<Self, ImageError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ImageError::UnusableName(path.display().to_string()))?;
        let parsed = naming::parse_file_name(file_name)?;
        // Keep the on-disk stem verbatim so current_name never drifts from
        // the filesystem, even for degenerate suffixes.
        let current_name = file_name[..file_name.len() - parsed.extension.len()].to_string();

        let mut assigned_tags = Vec::with_capacity(parsed.tag_names.len());
        for name in &parsed.tag_names {
            let tag = registry.get_or_create(name);
            if !assigned_tags.contains(&tag) {
                assigned_tags.push(tag);
            }
            registry.attach(tag, id);
        }

        Ok(Self {
            id,
            original_base: parsed.base,
            rename_history: vec![current_name.clone()],
            current_name,
            extension: parsed.extension,
            path: path.to_path_buf(),
            assigned_tags,
        })
    }

    #[must_use]
    pub const fn id(&self) -> ImageId {
        self.id
    }

    /// Current full base name, tag suffix included, extension excluded
    #[must_use]
    pub fn name(&self) -> &str {
        &self.current_name
    }

    /// Base name without any tag suffix
    #[must_use]
    pub fn original_base(&self) -> &str {
        &self.original_base
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assigned tags in application order
    #[must_use]
    pub fn assigned_tags(&self) -> &[TagId] {
        &self.assigned_tags
    }

    /// Every distinct name this file has held, oldest first
    #[must_use]
    pub fn rename_history(&self) -> &[String] {
        &self.rename_history
    }

    /// Names of the assigned tags, in application order
    #[must_use]
    pub fn tag_names(&self, registry: &TagRegistry) -> Vec<String> {
        self.assigned_tags
            .iter()
            .filter_map(|id| registry.get(*id))
            .map(|tag| tag.name().to_string())
            .collect()
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Append a tag and rename the backing file to match.
    ///
    /// A tag already present (by identity) is a no-op: no rename, no history
    /// entry. On a rename failure the tag mutation is rolled back so the
    /// in-memory model and the filesystem never diverge.
    ///
    /// # Errors
    /// Returns `ImageError` if the rename fails or the collision search is
    /// exhausted.
    pub fn assign_tag(
        &mut self,
        tag: TagId,
        registry: &mut TagRegistry,
        audit: &dyn RenameAudit,
    ) -> Result<(), ImageError> {
        if self.assigned_tags.contains(&tag) {
            return Ok(());
        }
        self.assigned_tags.push(tag);
        registry.attach(tag, self.id);

        if let Err(e) = self.rename_to_match_tags(registry, audit) {
            self.assigned_tags.pop();
            registry.detach(tag, self.id);
            return Err(e);
        }
        Ok(())
    }

    /// Remove a tag and rename the backing file to match.
    ///
    /// Membership is governed by identity, not name: a distinct tag that
    /// happens to share the name is not present here, so removing it is a
    /// no-op.
    ///
    /// # Errors
    /// Returns `ImageError` if the rename fails or the collision search is
    /// exhausted.
    pub fn remove_tag(
        &mut self,
        tag: TagId,
        registry: &mut TagRegistry,
        audit: &dyn RenameAudit,
    ) -> Result<(), ImageError> {
        let Some(position) = self.assigned_tags.iter().position(|t| *t == tag) else {
            return Ok(());
        };
        self.assigned_tags.remove(position);
        registry.detach(tag, self.id);

        if let Err(e) = self.rename_to_match_tags(registry, audit) {
            self.assigned_tags.insert(position, tag);
            registry.attach(tag, self.id);
            return Err(e);
        }
        Ok(())
    }

    /// Revert to a name this file has held before.
    ///
    /// A name not in the history is a no-op. Otherwise the historical tag
    /// suffix is re-parsed and each tag resolved through the registry, which
    /// recreates a tag that has since been deleted. The assigned list is
    /// replaced wholesale, both relation sides reconciled, and the rename
    /// engine run; reverting to a name that already exists in the history
    /// never appends a duplicate entry.
    ///
    /// # Errors
    /// Returns `ImageError` if the rename fails or the collision search is
    /// exhausted.
    pub fn revert(
        &mut self,
        old_name: &str,
        registry: &mut TagRegistry,
        audit: &dyn RenameAudit,
    ) -> Result<(), ImageError> {
        if !self.rename_history.iter().any(|n| n == old_name) {
            return Ok(());
        }

        let suffix = &old_name[self.original_base.len()..];
        let mut reverted_tags: Vec<TagId> = Vec::new();
        for name in suffix.split(TAG_DELIMITER).skip(1) {
            let tag = registry.get_or_create(name);
            if !reverted_tags.contains(&tag) {
                reverted_tags.push(tag);
            }
        }

        let previous = std::mem::replace(&mut self.assigned_tags, reverted_tags);
        for tag in &self.assigned_tags {
            if !previous.contains(tag) {
                registry.attach(*tag, self.id);
            }
        }
        for tag in &previous {
            if !self.assigned_tags.contains(tag) {
                registry.detach(*tag, self.id);
            }
        }

        if let Err(e) = self.rename_to_match_tags(registry, audit) {
            for tag in &self.assigned_tags {
                if !previous.contains(tag) {
                    registry.detach(*tag, self.id);
                }
            }
            for tag in &previous {
                if !self.assigned_tags.contains(tag) {
                    registry.attach(*tag, self.id);
                }
            }
            self.assigned_tags = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Rename the backing file so its name encodes the assigned tags.
    ///
    /// Probes `generated`, `generated(1)`, `generated(2)`, ... until a free
    /// path accepts the rename, bounded by [`MAX_COLLISION_ATTEMPTS`]. A
    /// non-collision I/O failure surfaces immediately instead of consuming
    /// the remaining attempts. Regenerating the current name is a no-op with
    /// no filesystem call and no audit record.
    fn rename_to_match_tags(
        &mut self,
        registry: &TagRegistry,
        audit: &dyn RenameAudit,
    ) -> Result<(), ImageError> {
        let names = self.tag_names(registry);
        let generated = compose_name(&self.original_base, names.iter().map(String::as_str));
        if generated == self.current_name {
            return Ok(());
        }

        let directory = self
            .path
            .parent()
            .ok_or_else(|| ImageError::NoParent(self.path.display().to_string()))?
            .to_path_buf();

        for attempt in 0..MAX_COLLISION_ATTEMPTS {
            let candidate = rename_candidate(&generated, attempt);
            let target = directory.join(format!("{candidate}{}", self.extension));
            if target.exists() {
                continue;
            }
            match fs::rename(&self.path, &target) {
                Ok(()) => {
                    // Best-effort: a failed audit write never rolls back the
                    // rename that has already happened.
                    let _ = audit.record(&self.current_name, &candidate, &self.extension);
                    self.path = target;
                    self.current_name = candidate;
                    if !self.rename_history.iter().any(|n| n == &self.current_name) {
                        self.rename_history.push(self.current_name.clone());
                    }
                    return Ok(());
                }
                // Lost the race for the name; keep probing.
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(ImageError::Io(e)),
            }
        }

        Err(ImageError::RenameFailed {
            name: generated,
            attempts: MAX_COLLISION_ATTEMPTS,
        })
    }
}
