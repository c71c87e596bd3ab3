//! Tag identities and the tag registry
//!
//! A [`Tag`] is an identity-bearing value: two tags with equal names are not
//! interchangeable. Identity lives in the [`TagId`] handle, never in the name.
//! The by-name lookup on [`TagRegistry`] is the only place names act as keys,
//! and it always resolves to the first tag registered under that name.
//!
//! The registry is an explicitly owned context object passed to every
//! component that resolves tags; there is no global state. Tag↔image
//! associations are held as opaque [`ImageId`] handles so the relation graph
//! stays acyclic.

use std::collections::BTreeSet;

/// Opaque handle identifying a tag for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(u64);

/// Opaque handle identifying an image within the current working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub(crate) u64);

/// One tag: an immutable name plus the images currently carrying it
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    images: BTreeSet<ImageId>,
}

impl Tag {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), images: BTreeSet::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Images currently carrying this tag, in stable (handle) order
    #[must_use]
    pub const fn images(&self) -> &BTreeSet<ImageId> {
        &self.images
    }

    #[must_use]
    pub fn contains(&self, image: ImageId) -> bool {
        self.images.contains(&image)
    }
}

/// Process-wide mapping from tag handle to tag, scoped to the session
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: std::collections::BTreeMap<TagId, Tag>,
    next_id: u64,
}

impl TagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh tag, even if one with the same name already exists.
    ///
    /// By-name lookup keeps resolving to the earliest tag with the name, so a
    /// later duplicate is a distinct identity that shares nothing with it.
    pub fn create(&mut self, name: &str) -> TagId {
        let id = TagId(self.next_id);
        self.next_id += 1;
        self.tags.insert(id, Tag::new(name));
        id
    }

    /// Return the tag registered under `name`, creating it on first reference.
    pub fn get_or_create(&mut self, name: &str) -> TagId {
        match self.find(name) {
            Some(id) => id,
            None => self.create(name),
        }
    }

    /// Earliest tag registered under `name`, if any
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TagId> {
        self.tags
            .iter()
            .find(|(_, tag)| tag.name == name)
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    /// Record that `image` carries `tag`. No-op for a stale tag handle.
    pub fn attach(&mut self, tag: TagId, image: ImageId) {
        if let Some(entry) = self.tags.get_mut(&tag) {
            entry.images.insert(image);
        }
    }

    /// Record that `image` no longer carries `tag`. No-op if absent.
    pub fn detach(&mut self, tag: TagId, image: ImageId) {
        if let Some(entry) = self.tags.get_mut(&tag) {
            entry.images.remove(&image);
        }
    }

    /// Drop a tag from the registry without touching any image.
    ///
    /// The cascade over tagged files lives in `DirectoryView::delete_tag`;
    /// this is its final step.
    pub fn remove_entry(&mut self, tag: TagId) -> Option<Tag> {
        self.tags.remove(&tag)
    }

    /// Clear every tag's image set ahead of a rescan.
    ///
    /// Associations are always rebuilt from the filenames on disk.
    pub fn reset_images(&mut self) {
        for tag in self.tags.values_mut() {
            tag.images.clear();
        }
    }

    /// Iterate over all tags in handle order
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &Tag)> {
        self.tags.iter().map(|(id, tag)| (*id, tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Images carrying the tag registered under `name`; empty for unknown names
    #[must_use]
    pub fn search(&self, name: &str) -> Vec<ImageId> {
        self.find(name)
            .and_then(|id| self.tags.get(&id))
            .map(|tag| tag.images.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Tags not yet present in `assigned`, in handle order
    #[must_use]
    pub fn available_tags(&self, assigned: &[TagId]) -> Vec<TagId> {
        self.tags
            .keys()
            .filter(|id| !assigned.contains(id))
            .copied()
            .collect()
    }

    /// Pre-seed tags from the `@`-delimited persisted list.
    ///
    /// Malformed input (no `@` at all) is a no-op; duplicate names collapse
    /// onto one tag. Only tag existence is restored here, never associations.
    pub fn configure_from_list(&mut self, text: &str) {
        if !text.contains('@') {
            return;
        }
        for name in text.split('@').filter(|n| !n.is_empty()) {
            self.get_or_create(name);
        }
    }

    /// Serialize all known tag names as an `@`-delimited list.
    ///
    /// Inverse of [`Self::configure_from_list`]; used only for persistence.
    #[must_use]
    pub fn serialize_list(&self) -> String {
        let mut out = String::new();
        for tag in self.tags.values() {
            out.push('@');
            out.push_str(&tag.name);
        }
        out
    }
}
