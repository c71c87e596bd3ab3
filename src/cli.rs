//! Command-line interface definitions and parsing
//!
//! Defines the complete CLI structure for nametag using the `clap` crate.
//! Every subcommand operates against the directory view built at startup
//! from the configured (or `--dir`-overridden) directory.
//!
//! # Commands
//!
//! - **list**: show subdirectories and images of the current directory (default)
//! - **tag** / **untag**: add or remove tags on an image, renaming its file
//! - **tags**: list all known tags with usage counts
//! - **rm-tag**: delete a tag everywhere, renaming every file carrying it
//! - **mv**: move an image to another directory
//! - **history** / **revert**: inspect and roll back an image's rename history

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::view::ViewMode;

/// Tag images by writing the tags straight into their filenames
#[derive(Debug, Parser)]
#[command(name = "nametag", version, about)]
pub struct Cli {
    /// Suppress informational output (only print results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory to operate on (overrides the configured directory)
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// View mode to use and persist (overrides the configured mode)
    #[arg(short = 'm', long, global = true, value_enum)]
    pub mode: Option<ViewMode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List subdirectories and images of the current directory
    #[command(visible_alias = "ls")]
    List {
        /// Only show images carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Flatten the whole subtree into one image list
        #[arg(short, long)]
        recursive: bool,
    },

    /// Add tags to an image, renaming its file
    #[command(visible_alias = "t")]
    Tag {
        /// Image file to tag
        file: PathBuf,
        /// Tags to apply, in order
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Remove tags from an image, renaming its file
    #[command(visible_alias = "u")]
    Untag {
        /// Image file to untag
        file: PathBuf,
        /// Tags to remove
        tags: Vec<String>,
        /// Remove every assigned tag
        #[arg(long)]
        all: bool,
    },

    /// List all known tags with usage counts
    Tags,

    /// Delete a tag everywhere, renaming every file carrying it
    #[command(name = "rm-tag")]
    RmTag {
        /// Name of the tag to delete
        name: String,
    },

    /// Move an image to another directory
    Mv {
        /// Image file to move
        file: PathBuf,
        /// Destination directory
        destination: PathBuf,
    },

    /// Show every name an image has held this session
    History {
        /// Image file to inspect
        file: PathBuf,
    },

    /// Revert an image to a name it has held before
    Revert {
        /// Image file to revert
        file: PathBuf,
        /// Previous base name (no extension) to revert to
        name: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// View mode for this invocation.
    ///
    /// `list --recursive` wins for the one run, then an explicit `--mode`,
    /// then the configured mode.
    #[must_use]
    pub fn effective_mode(&self, configured: ViewMode) -> ViewMode {
        match &self.command {
            Some(Commands::List { recursive: true, .. }) => ViewMode::Recursive,
            _ => self.mode.unwrap_or(configured),
        }
    }

    /// Mode to write back to the configuration on exit.
    ///
    /// Only an explicit `--mode` changes the stored mode; a one-shot
    /// `--recursive` listing is ephemeral.
    #[must_use]
    pub fn persisted_mode(&self, configured: ViewMode) -> ViewMode {
        self.mode.unwrap_or(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_optional_and_defaults_apply() {
        let cli = Cli::try_parse_from(["nametag"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn tag_requires_at_least_one_tag() {
        assert!(Cli::try_parse_from(["nametag", "tag", "a.jpg"]).is_err());
        let cli = Cli::try_parse_from(["nametag", "tag", "a.jpg", "Red", "Blue"]).unwrap();
        match cli.command {
            Some(Commands::Tag { file, tags }) => {
                assert_eq!(file, PathBuf::from("a.jpg"));
                assert_eq!(tags, ["Red", "Blue"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_accepts_tag_filter_and_recursive_flag() {
        let cli = Cli::try_parse_from(["nametag", "ls", "-t", "Red", "-r"]).unwrap();
        match cli.command {
            Some(Commands::List { tag, recursive }) => {
                assert_eq!(tag.as_deref(), Some("Red"));
                assert!(recursive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::try_parse_from(["nametag", "tags", "-q", "-d", "/pics"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.dir, Some(PathBuf::from("/pics")));
    }

    #[test]
    fn recursive_listing_is_ephemeral_but_explicit_mode_persists() {
        let cli = Cli::try_parse_from(["nametag", "ls", "-r"]).unwrap();
        assert_eq!(cli.effective_mode(ViewMode::Tree), ViewMode::Recursive);
        assert_eq!(cli.persisted_mode(ViewMode::Tree), ViewMode::Tree);

        let cli = Cli::try_parse_from(["nametag", "-m", "recursive"]).unwrap();
        assert_eq!(cli.effective_mode(ViewMode::Tree), ViewMode::Recursive);
        assert_eq!(cli.persisted_mode(ViewMode::Tree), ViewMode::Recursive);
    }

    #[test]
    fn mode_accepts_the_lowercase_variant_names() {
        let cli = Cli::try_parse_from(["nametag", "-m", "recursive"]).unwrap();
        assert_eq!(cli.mode, Some(ViewMode::Recursive));
        assert!(Cli::try_parse_from(["nametag", "-m", "sideways"]).is_err());
    }
}
