//! Rename-audit collaborator
//!
//! Every successful rename is reported as `(previous base name, new base
//! name, extension)`. Persisting the record is best-effort: call sites
//! swallow the error, and a failed write never rolls back the rename that
//! triggered it.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sink for rename records
pub trait RenameAudit {
    /// Record one rename. Failures are tolerated by callers.
    ///
    /// # Errors
    /// Returns an `io::Error` if the record cannot be persisted.
    fn record(&self, previous: &str, renamed: &str, extension: &str) -> io::Result<()>;
}

/// Appends one timestamped line per rename to a log file
#[derive(Debug, Clone)]
pub struct FileAudit {
    path: PathBuf,
}

impl FileAudit {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Default log location under the user's local data directory
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("nametag").join("rename.log"))
            .unwrap_or_else(|| PathBuf::from("nametag-rename.log"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenameAudit for FileAudit {
    fn record(&self, previous: &str, renamed: &str, extension: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} From: {previous}{extension} -> To: {renamed}{extension}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

/// One recorded rename, as seen by the audit collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub previous: String,
    pub renamed: String,
    pub extension: String,
}

/// In-memory sink for tests and embedders that do their own persistence
#[derive(Debug, Default)]
pub struct MemoryAudit {
    records: RefCell<Vec<AuditRecord>>,
}

impl MemoryAudit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.borrow().clone()
    }
}

impl RenameAudit for MemoryAudit {
    fn record(&self, previous: &str, renamed: &str, extension: &str) -> io::Result<()> {
        self.records.borrow_mut().push(AuditRecord {
            previous: previous.to_string(),
            renamed: renamed.to_string(),
            extension: extension.to_string(),
        });
        Ok(())
    }
}

/// Sink that discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudit;

impl RenameAudit for NullAudit {
    fn record(&self, _previous: &str, _renamed: &str, _extension: &str) -> io::Result<()> {
        Ok(())
    }
}
