//! Directory view: the working set of tagged files
//!
//! The view owns the "current directory" cursor and the view mode, scans the
//! filesystem to (re)build the working set, and performs moves. Tagged-file
//! instances are never reused across rescans: every `set_directory` or view
//! mode change throws the working set away, clears every tag's image set, and
//! rebuilds both from the filenames on disk.
//!
//! Two view modes exist: `Tree` lists immediate subdirectories plus the
//! images of one directory; `Recursive` flattens the whole subtree into one
//! image list and records no subdirectory entries.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::audit::RenameAudit;
use crate::image::TaggedFile;
use crate::naming::{
    self, ExtensionClassifier, ImageClassifier, MAX_COLLISION_ATTEMPTS,
};
use crate::tags::{ImageId, TagId, TagRegistry};

pub mod error;

pub use error::ViewError;

/// How the working set is built from the current directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Immediate subdirectories and this directory's images only
    #[default]
    Tree,
    /// Every image under the subtree, flattened; no subdirectory entries
    Recursive,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Recursive => write!(f, "recursive"),
        }
    }
}

/// What happened to the working set after a successful or skipped move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Destination equals the current directory; nothing was done
    SameDirectory,
    /// File moved within the recursive subtree and stays in the working set
    Retained,
    /// File left the working set; its tag memberships were dropped
    Evicted,
}

/// Scans a directory tree and owns the resulting working set
pub struct DirectoryView {
    current_dir: Option<PathBuf>,
    mode: ViewMode,
    subdirectories: Vec<PathBuf>,
    images: BTreeMap<ImageId, TaggedFile>,
    next_image: u64,
    classifier: Box<dyn ImageClassifier>,
    /// Directories at or above this path force `Tree` mode, guarding against
    /// an accidental recursive scan near the filesystem root.
    anchor: PathBuf,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_dir: None,
            mode: ViewMode::default(),
            subdirectories: Vec::new(),
            images: BTreeMap::new(),
            next_image: 0,
            classifier: Box::new(ExtensionClassifier),
            anchor: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
        }
    }

    /// Start in the given view mode (before the first scan)
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the image-classification policy
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn ImageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the anchor directory for the recursive-scan guard
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl AsRef<Path>) -> Self {
        self.anchor = anchor.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Immediate child directories; populated in `Tree` mode only
    #[must_use]
    pub fn subdirectories(&self) -> &[PathBuf] {
        &self.subdirectories
    }

    /// Working set in stable (discovery) order
    pub fn images(&self) -> impl Iterator<Item = &TaggedFile> {
        self.images.values()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn image(&self, id: ImageId) -> Option<&TaggedFile> {
        self.images.get(&id)
    }

    #[must_use]
    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut TaggedFile> {
        self.images.get_mut(&id)
    }

    /// Find the working-set entry backed by `path`
    #[must_use]
    pub fn find_by_path(&self, path: &Path) -> Option<ImageId> {
        self.images
            .values()
            .find(|image| image.path() == path)
            .map(TaggedFile::id)
    }

    /// Point the view at a directory and rebuild the working set.
    ///
    /// An invalid path degrades to an empty state with no current directory;
    /// it is never an error. Every known tag's image set is cleared first,
    /// since the association state is rebuilt from scratch by the scan. A
    /// directory at or above the anchor forces `Tree` mode.
    pub fn set_directory(&mut self, path: &Path, registry: &mut TagRegistry) {
        self.subdirectories.clear();
        self.images.clear();
        registry.reset_images();

        if !path.is_dir() {
            self.current_dir = None;
            return;
        }

        if self.anchor.ancestors().any(|ancestor| ancestor == path) {
            self.mode = ViewMode::Tree;
        }
        self.current_dir = Some(path.to_path_buf());
        self.scan(&path.to_path_buf(), registry);
    }

    /// Change the view mode and rescan with full reset semantics
    pub fn set_view_mode(&mut self, mode: ViewMode, registry: &mut TagRegistry) {
        self.mode = mode;
        if let Some(dir) = self.current_dir.clone() {
            self.set_directory(&dir, registry);
        }
    }

    /// Enumerate one directory, recursing only in `Recursive` mode.
    ///
    /// Hidden entries and entries without a UTF-8 name are skipped, as are
    /// files whose names cannot be parsed. Entries are visited in name order
    /// so the working set is deterministic. Unreadable directories contribute
    /// nothing.
    fn scan(&mut self, dir: &Path, registry: &mut TagRegistry) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                match self.mode {
                    ViewMode::Recursive => self.scan(&path, registry),
                    ViewMode::Tree => self.subdirectories.push(path),
                }
            } else if self.classifier.is_image(&path) {
                let id = ImageId(self.next_image);
                self.next_image += 1;
                if let Ok(image) = TaggedFile::from_path(id, &path, registry) {
                    self.images.insert(id, image);
                }
            }
        }
    }

    /// Move an image to another directory.
    ///
    /// The destination name keeps the tag-suffix-and-extension portion of the
    /// current name; collisions are resolved with the space-padded counter
    /// after the un-tagged base name (a scheme distinct from the rename
    /// engine's). After a successful move the image either stays in the
    /// working set (recursive mode, destination inside the current subtree,
    /// backing path updated) or is evicted along with all its tag
    /// memberships. On failure no state changes.
    ///
    /// # Errors
    /// Returns `ViewError` if no directory is selected, the handle is
    /// unknown, the collision search is exhausted, or the filesystem rename
    /// fails.
    pub fn move_image(
        &mut self,
        id: ImageId,
        destination: &Path,
        registry: &mut TagRegistry,
    ) -> Result<MoveOutcome, ViewError> {
        let current_dir = self.current_dir.clone().ok_or(ViewError::NoDirectory)?;
        let image = self.images.get(&id).ok_or(ViewError::UnknownImage)?;
        if destination == current_dir {
            return Ok(MoveOutcome::SameDirectory);
        }

        let name = image.name().to_string();
        let base = image.original_base().to_string();
        let extension = image.extension().to_string();
        let source = image.path().to_path_buf();
        let suffix_and_ext = match name.find('@') {
            Some(at) if at > 0 => format!("{}{extension}", &name[at..]),
            _ => extension.clone(),
        };

        let mut moved_to: Option<PathBuf> = None;
        for attempt in 0..MAX_COLLISION_ATTEMPTS {
            let candidate =
                naming::move_candidate(&name, &base, &suffix_and_ext, &extension, attempt);
            let target = destination.join(candidate);
            if target.exists() {
                continue;
            }
            match fs::rename(&source, &target) {
                Ok(()) => {
                    moved_to = Some(target);
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(ViewError::Io(e)),
            }
        }
        let Some(target) = moved_to else {
            return Err(ViewError::MoveFailed {
                name,
                attempts: MAX_COLLISION_ATTEMPTS,
            });
        };

        let retained =
            self.mode == ViewMode::Recursive && target.starts_with(&current_dir);
        if retained {
            if let Some(image) = self.images.get_mut(&id) {
                image.set_path(target);
            }
            Ok(MoveOutcome::Retained)
        } else {
            if let Some(image) = self.images.remove(&id) {
                for tag in image.assigned_tags() {
                    registry.detach(*tag, id);
                }
            }
            Ok(MoveOutcome::Evicted)
        }
    }

    /// Delete a tag everywhere: the cascade behind registry deletion.
    ///
    /// Iterates over a snapshot of the tag's membership (removal mutates the
    /// set), removes the tag from each file (renaming it on disk), then drops
    /// the tag from the registry.
    ///
    /// # Errors
    /// Returns `ViewError` if one of the cascading renames fails; already
    /// processed files keep their new names.
    pub fn delete_tag(
        &mut self,
        tag: TagId,
        registry: &mut TagRegistry,
        audit: &dyn RenameAudit,
    ) -> Result<(), ViewError> {
        let members: Vec<ImageId> = registry
            .get(tag)
            .map(|t| t.images().iter().copied().collect())
            .unwrap_or_default();

        for id in members {
            match self.images.get_mut(&id) {
                Some(image) => image.remove_tag(tag, registry, audit)?,
                // Stale handle: drop the association without touching disk.
                None => registry.detach(tag, id),
            }
        }
        registry.remove_entry(tag);
        Ok(())
    }
}
