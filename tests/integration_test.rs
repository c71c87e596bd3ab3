//! Integration tests for nametag
//!
//! These tests verify end-to-end flows against real temporary directories:
//! scan, tag, rescan, revert, tag deletion, and moves. The filename is the
//! only persisted state, so every flow is checked both in memory and on disk.

use std::fs;
use std::path::{Path, PathBuf};

use nametag::audit::MemoryAudit;
use nametag::tags::TagRegistry;
use nametag::view::{DirectoryView, MoveOutcome, ViewMode};

/// Helper to create a fake image file
fn image_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"pixels").unwrap();
    path
}

fn names(view: &DirectoryView) -> Vec<String> {
    view.images().map(|i| i.name().to_string()).collect()
}

#[test]
fn tagging_survives_a_rescan_because_the_filename_is_the_state() {
    let dir = tempfile::tempdir().unwrap();
    image_file(dir.path(), "Photo.jpg");

    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new();
    let audit = MemoryAudit::new();
    view.set_directory(dir.path(), &mut registry);

    let id = view.find_by_path(&dir.path().join("Photo.jpg")).unwrap();
    let red = registry.get_or_create("Red");
    let outdoor = registry.get_or_create("Outdoor");
    view.image_mut(id)
        .unwrap()
        .assign_tag(red, &mut registry, &audit)
        .unwrap();
    view.image_mut(id)
        .unwrap()
        .assign_tag(outdoor, &mut registry, &audit)
        .unwrap();

    assert!(dir.path().join("Photo @Red @Outdoor.jpg").exists());

    // A fresh session rebuilds the same state from the filename alone.
    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new();
    view.set_directory(dir.path(), &mut registry);

    assert_eq!(names(&view), ["Photo @Red @Outdoor"]);
    let rescanned = view.images().next().unwrap();
    assert_eq!(rescanned.original_base(), "Photo");
    assert_eq!(rescanned.tag_names(&registry), ["Red", "Outdoor"]);

    let red = registry.find("Red").unwrap();
    assert!(registry.get(red).unwrap().contains(rescanned.id()));
}

#[test]
fn untagging_restores_the_original_name_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    image_file(dir.path(), "Photo @Red.jpg");

    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new();
    let audit = MemoryAudit::new();
    view.set_directory(dir.path(), &mut registry);

    let id = view.find_by_path(&dir.path().join("Photo @Red.jpg")).unwrap();
    let red = registry.find("Red").unwrap();
    view.image_mut(id)
        .unwrap()
        .remove_tag(red, &mut registry, &audit)
        .unwrap();

    assert!(dir.path().join("Photo.jpg").exists());
    assert!(!dir.path().join("Photo @Red.jpg").exists());
    assert!(registry.get(red).unwrap().images().is_empty());
}

#[test]
fn deleting_a_tag_renames_every_carrier_in_the_working_set() {
    let dir = tempfile::tempdir().unwrap();
    image_file(dir.path(), "a @Trip.jpg");
    image_file(dir.path(), "b @Trip @Sea.png");
    image_file(dir.path(), "c.bmp");

    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new();
    let audit = MemoryAudit::new();
    view.set_directory(dir.path(), &mut registry);

    let trip = registry.find("Trip").unwrap();
    view.delete_tag(trip, &mut registry, &audit).unwrap();

    assert!(dir.path().join("a.jpg").exists());
    assert!(dir.path().join("b @Sea.png").exists());
    assert!(dir.path().join("c.bmp").exists());
    assert!(registry.find("Trip").is_none());
    assert!(registry.find("Sea").is_some());

    // Renames were reported to the audit collaborator.
    let renamed: Vec<String> = audit.records().iter().map(|r| r.renamed.clone()).collect();
    assert_eq!(renamed, ["a", "b @Sea"]);
}

#[test]
fn recursive_move_outside_the_tree_evicts_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    image_file(&nested, "deep @Red.jpg");

    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new().with_mode(ViewMode::Recursive);
    view.set_directory(dir.path(), &mut registry);

    let id = view.find_by_path(&nested.join("deep @Red.jpg")).unwrap();
    let red = registry.find("Red").unwrap();

    let outcome = view
        .move_image(id, elsewhere.path(), &mut registry)
        .unwrap();

    assert_eq!(outcome, MoveOutcome::Evicted);
    assert_eq!(view.image_count(), 0);
    assert!(registry.get(red).unwrap().images().is_empty());
    assert!(elsewhere.path().join("deep @Red.jpg").exists());
}

#[test]
fn tag_assignment_collision_and_later_revert_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    image_file(dir.path(), "Photo.jpg");
    // Occupy the name the rename engine will generate first.
    image_file(dir.path(), "Photo @Red.jpg");

    let mut registry = TagRegistry::new();
    let mut view = DirectoryView::new();
    let audit = MemoryAudit::new();
    view.set_directory(dir.path(), &mut registry);

    let id = view.find_by_path(&dir.path().join("Photo.jpg")).unwrap();
    let red = registry.find("Red").unwrap();
    view.image_mut(id)
        .unwrap()
        .assign_tag(red, &mut registry, &audit)
        .unwrap();
    assert!(dir.path().join("Photo @Red(1).jpg").exists());

    let image = view.image_mut(id).unwrap();
    image.revert("Photo", &mut registry, &audit).unwrap();
    assert_eq!(image.name(), "Photo");
    assert!(dir.path().join("Photo.jpg").exists());
    assert_eq!(image.rename_history(), ["Photo", "Photo @Red(1)"]);
}

#[test]
fn config_tag_list_preseeds_a_fresh_registry() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut registry = TagRegistry::new();
    registry.get_or_create("Red");
    registry.get_or_create("Sea");

    let config = nametag::config::NametagConfig {
        directory: None,
        view_mode: ViewMode::Tree,
        tag_list: registry.serialize_list(),
    };
    config.save_to(&config_path).unwrap();

    let loaded = nametag::config::NametagConfig::load_from(&config_path).unwrap();
    let mut fresh = TagRegistry::new();
    fresh.configure_from_list(&loaded.tag_list);

    // Tag existence is restored; associations only ever come from a scan.
    assert!(fresh.find("Red").is_some());
    assert!(fresh.find("Sea").is_some());
    assert!(fresh.search("Red").is_empty());
}
