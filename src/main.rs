//! Nametag CLI application entry point
//!
//! Command-line front end for the filename tagging system. On startup the
//! configured tag list pre-seeds the registry, the configured (or
//! `--dir`-overridden) directory is scanned into a working set, and the
//! requested command runs against it. On exit the current directory, view
//! mode, and tag list are written back to the configuration file.
//!
//! # Usage
//!
//! ```bash
//! # List the configured directory (default command)
//! nametag
//! nametag ls -t Red
//!
//! # Tag an image (renames the file on disk)
//! nametag tag Photo.jpg Red Outdoor
//!
//! # Remove tags
//! nametag untag "Photo @Red @Outdoor.jpg" Red
//! nametag untag "Photo @Outdoor.jpg" --all
//!
//! # Delete a tag from every image
//! nametag rm-tag Outdoor
//!
//! # Move an image elsewhere, tags travelling with it
//! nametag mv "Photo @Red.jpg" ~/sorted
//! ```
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/nametag/config.toml` on Linux); renames are appended to a log
//! under the user's local data directory.

use std::path::Path;

use colored::Colorize;

use nametag::{
    NametagError,
    audit::FileAudit,
    cli::{Cli, Commands},
    commands,
    config::NametagConfig,
    tags::TagRegistry,
    view::DirectoryView,
};

type Result<T> = std::result::Result<T, NametagError>;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let mut config = NametagConfig::load()?;

    let mut registry = TagRegistry::new();
    registry.configure_from_list(&config.tag_list);

    let mode = cli.effective_mode(config.view_mode);
    let persist_mode = cli.persisted_mode(config.view_mode);
    let dir = cli
        .dir
        .clone()
        .or_else(|| config.directory.clone())
        .or_else(dirs::home_dir)
        .ok_or_else(|| NametagError::InvalidInput("No directory to open".into()))?;
    let dir = dir.canonicalize().unwrap_or(dir);

    let mut view = DirectoryView::new().with_mode(mode);
    view.set_directory(&dir, &mut registry);

    let audit = FileAudit::new(FileAudit::default_path());
    let quiet = cli.quiet;

    match cli.command.unwrap_or(Commands::List { tag: None, recursive: false }) {
        Commands::List { tag, .. } => {
            commands::list(&view, &registry, tag.as_deref(), quiet)?;
        }
        Commands::Tag { file, tags } => {
            commands::tag(&mut view, &mut registry, &audit, &file, &tags, quiet)?;
        }
        Commands::Untag { file, tags, all } => {
            commands::untag(&mut view, &mut registry, &audit, &file, &tags, all, quiet)?;
        }
        Commands::Tags => commands::tags(&registry, quiet),
        Commands::RmTag { name } => {
            commands::delete_tag(&mut view, &mut registry, &audit, &name, quiet)?;
        }
        Commands::Mv { file, destination } => {
            commands::mv(&mut view, &mut registry, &file, &destination, quiet)?;
        }
        Commands::History { file } => commands::history(&view, &file)?,
        Commands::Revert { file, name } => {
            commands::revert(&mut view, &mut registry, &audit, &file, &name, quiet)?;
        }
    }

    config.directory = view.current_dir().map(Path::to_path_buf);
    config.view_mode = persist_mode;
    config.tag_list = registry.serialize_list();
    config.save()?;

    Ok(())
}
