//! Filename suffix grammar and collision naming
//!
//! Tags are persisted by encoding them into the filename itself:
//! `<base>[ @<tag1>][ @<tag2>]...<ext>`. This module owns that grammar
//! (parsing and composing must round-trip bit-exactly), the two numeric
//! disambiguator schemes used to resolve filename collisions, and the
//! policy that decides whether a file counts as an image.
//!
//! The two collision schemes are deliberately distinct and must stay that way:
//! - rename scheme: `Photo @Red(1).jpg` — counter directly after the full
//!   generated name
//! - move scheme: `Photo (1) @Red.jpg` — space-padded counter after the
//!   un-tagged base name

use std::path::Path;

pub mod error;

pub use error::NamingError;

/// Delimiter introducing each encoded tag in a filename
pub const TAG_DELIMITER: &str = " @";

/// Extensions recognized as images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "tif", "jpg", "jpeg", "bmp"];

/// Upper bound on the numeric-disambiguator search during renames and moves.
///
/// The collision search is a deterministic naming policy, not a retry loop;
/// exhausting it surfaces an explicit error instead of looping forever.
pub const MAX_COLLISION_ATTEMPTS: usize = 512;

/// A filename decomposed according to the suffix grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Name portion before any tag suffix
    pub base: String,
    /// Encoded tag names, in suffix order
    pub tag_names: Vec<String>,
    /// Extension including the leading dot, e.g. `.jpg`
    pub extension: String,
}

/// Parse a filename into base name, encoded tags, and extension.
///
/// The extension is the last `.`-delimited suffix; everything from the first
/// `" @"` up to the extension is the tag suffix.
///
/// # Errors
/// Returns `NamingError::MissingExtension` if the filename contains no `.`.
pub fn parse_file_name(file_name: &str) -> Result<ParsedName, NamingError> {
    let ext_idx = file_name
        .rfind('.')
        .ok_or_else(|| NamingError::MissingExtension(file_name.to_string()))?;
    let stem = &file_name[..ext_idx];
    let extension = file_name[ext_idx..].to_string();

    match stem.find(TAG_DELIMITER) {
        Some(tag_idx) => {
            let base = stem[..tag_idx].to_string();
            // The suffix starts with the delimiter, so the first split element
            // is empty and skipped.
            let tag_names = stem[tag_idx..]
                .split(TAG_DELIMITER)
                .skip(1)
                .map(str::to_string)
                .collect();
            Ok(ParsedName { base, tag_names, extension })
        }
        None => Ok(ParsedName {
            base: stem.to_string(),
            tag_names: Vec::new(),
            extension,
        }),
    }
}

/// Compose a base name and tag names back into an encoded name (no extension).
///
/// Exact inverse of [`parse_file_name`] over the stem portion.
#[must_use]
pub fn compose_name<'a, I>(base: &str, tag_names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut name = String::from(base);
    for tag in tag_names {
        name.push_str(TAG_DELIMITER);
        name.push_str(tag);
    }
    name
}

/// Validate a user-supplied tag name against the suffix grammar.
///
/// Names parsed back from disk are accepted as-is; this check guards the
/// user-facing entry points.
///
/// # Errors
/// * `NamingError::EmptyTagName` for the empty string
/// * `NamingError::ReservedDelimiter` if the name contains `" @"`
/// * `NamingError::LeadingDot` if the name starts with `.`
pub fn validate_tag_name(name: &str) -> Result<(), NamingError> {
    if name.is_empty() {
        return Err(NamingError::EmptyTagName);
    }
    if name.contains(TAG_DELIMITER) {
        return Err(NamingError::ReservedDelimiter(name.to_string()));
    }
    if name.starts_with('.') {
        return Err(NamingError::LeadingDot(name.to_string()));
    }
    Ok(())
}

/// Candidate name for the rename collision scheme.
///
/// Attempt 0 is the generated name itself; attempt n appends `(n)` directly
/// after it.
#[must_use]
pub fn rename_candidate(generated: &str, attempt: usize) -> String {
    if attempt == 0 {
        generated.to_string()
    } else {
        format!("{generated}({attempt})")
    }
}

/// Candidate file name for the move collision scheme.
///
/// Attempt 0 keeps the current name; attempt n rebuilds the name as
/// `<untagged base> (n) <suffix><ext>` where `suffix_and_ext` is the portion
/// of the current name from the first `@` plus the extension (or just the
/// extension for an untagged file).
#[must_use]
pub fn move_candidate(
    current_name: &str,
    untagged_base: &str,
    suffix_and_ext: &str,
    extension: &str,
    attempt: usize,
) -> String {
    if attempt == 0 {
        format!("{current_name}{extension}")
    } else {
        format!("{untagged_base} ({attempt}) {suffix_and_ext}")
    }
}

/// Policy deciding whether a directory entry counts as an image.
///
/// Injected into the directory view so scan behavior is testable without
/// real image files.
pub trait ImageClassifier {
    fn is_image(&self, path: &Path) -> bool;
}

/// Default classifier: a static table of recognized extensions
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionClassifier;

impl ImageClassifier for ExtensionClassifier {
    fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_untagged_name() {
        let parsed = parse_file_name("Photo.jpg").unwrap();
        assert_eq!(parsed.base, "Photo");
        assert!(parsed.tag_names.is_empty());
        assert_eq!(parsed.extension, ".jpg");
    }

    #[test]
    fn parse_tagged_name() {
        let parsed = parse_file_name("Photo @Red @Outdoor.jpg").unwrap();
        assert_eq!(parsed.base, "Photo");
        assert_eq!(parsed.tag_names, vec!["Red", "Outdoor"]);
        assert_eq!(parsed.extension, ".jpg");
    }

    #[test]
    fn parse_uses_last_dot_for_extension() {
        let parsed = parse_file_name("archive.2024 @Keep.tar.gz").unwrap();
        assert_eq!(parsed.base, "archive.2024");
        assert_eq!(parsed.tag_names, vec!["Keep.tar"]);
        assert_eq!(parsed.extension, ".gz");
    }

    #[test]
    fn parse_rejects_missing_extension() {
        assert_eq!(
            parse_file_name("Photo"),
            Err(NamingError::MissingExtension("Photo".into()))
        );
    }

    #[test]
    fn compose_round_trips_parse() {
        for name in ["Photo.jpg", "Photo @Red.jpg", "a b @x y @z w.png"] {
            let parsed = parse_file_name(name).unwrap();
            let stem = compose_name(
                &parsed.base,
                parsed.tag_names.iter().map(String::as_str),
            );
            assert_eq!(format!("{stem}{}", parsed.extension), name);
        }
    }

    #[test]
    fn validate_rejects_bad_names() {
        assert_eq!(validate_tag_name(""), Err(NamingError::EmptyTagName));
        assert_eq!(
            validate_tag_name("a @b"),
            Err(NamingError::ReservedDelimiter("a @b".into()))
        );
        assert_eq!(
            validate_tag_name(".hidden"),
            Err(NamingError::LeadingDot(".hidden".into()))
        );
        assert!(validate_tag_name("Outdoor").is_ok());
        assert!(validate_tag_name("two words").is_ok());
    }

    #[test]
    fn rename_candidates_count_up_after_the_plain_name() {
        assert_eq!(rename_candidate("Photo @Red", 0), "Photo @Red");
        assert_eq!(rename_candidate("Photo @Red", 1), "Photo @Red(1)");
        assert_eq!(rename_candidate("Photo @Red", 12), "Photo @Red(12)");
    }

    #[test]
    fn move_candidates_pad_the_counter_after_the_base() {
        assert_eq!(
            move_candidate("Photo @Red", "Photo", "@Red.jpg", ".jpg", 0),
            "Photo @Red.jpg"
        );
        assert_eq!(
            move_candidate("Photo @Red", "Photo", "@Red.jpg", ".jpg", 2),
            "Photo (2) @Red.jpg"
        );
        // Untagged files keep only the extension after the counter.
        assert_eq!(
            move_candidate("Photo", "Photo", ".jpg", ".jpg", 1),
            "Photo (1) .jpg"
        );
    }

    #[test]
    fn classifier_matches_known_extensions_case_insensitively() {
        let c = ExtensionClassifier;
        assert!(c.is_image(&PathBuf::from("a.jpg")));
        assert!(c.is_image(&PathBuf::from("a.JPEG")));
        assert!(c.is_image(&PathBuf::from("a.Png")));
        assert!(!c.is_image(&PathBuf::from("a.txt")));
        assert!(!c.is_image(&PathBuf::from("noext")));
    }
}
