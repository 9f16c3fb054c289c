//! Append-only experiment log (CSV)
//!
//! The log file is the only state shared across sessions. Appends are
//! single bounded writes with no lock: concurrent sessions may interleave
//! rows at the OS level, an accepted limitation of this design. Rows are
//! never rewritten or deleted.

use super::{analyzer, AbTestReport, ExperimentLogEntry};
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Handle to the append-only CSV log of session summaries.
pub struct ExperimentLog {
    path: PathBuf,
}

impl ExperimentLog {
    /// Create a handle to the log at `path`.
    ///
    /// The file is not touched until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append exactly one row.
    ///
    /// A missing file is created and receives the header row
    /// (`group,interactions,time_spent_seconds`) before the first data row;
    /// an existing file gets the data row only. Existing rows are never
    /// rewritten.
    ///
    /// # Errors
    /// Returns [`Error::Log`] if the file cannot be opened or written.
    pub fn append(&self, entry: &ExperimentLogEntry) -> Result<()> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::Log(format!("failed to open {}: {e}", self.path.display()))
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer
            .serialize(entry)
            .map_err(|e| Error::Log(format!("failed to append entry: {e}")))?;
        writer
            .flush()
            .map_err(|e| Error::Log(format!("failed to flush log: {e}")))?;

        tracing::info!(
            variant = %entry.variant(),
            interactions = entry.interaction_count(),
            "logged session"
        );
        Ok(())
    }

    /// All persisted entries in append order.
    ///
    /// A missing file reads as zero entries, not an error. A row that fails
    /// to parse is skipped with a warning so the rest of the log still
    /// loads; an existing file that cannot be opened or read is an error.
    ///
    /// # Errors
    /// Returns [`Error::Log`] if an existing file cannot be opened or read.
    pub fn read_entries(&self) -> Result<Vec<ExperimentLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            Error::Log(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let mut entries = Vec::new();
        for row in reader.deserialize::<ExperimentLogEntry>() {
            match row {
                Ok(entry) => entries.push(entry),
                // An I/O failure repeats on every subsequent read; abort
                // instead of skipping
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(Error::Log(format!(
                        "failed to read {}: {e}",
                        self.path.display()
                    )));
                }
                Err(e) => tracing::warn!(error = %e, "skipping malformed log row"),
            }
        }
        Ok(entries)
    }

    /// Reload the log and summarize it per group.
    ///
    /// # Errors
    /// Returns [`Error::Log`] if an existing log file cannot be opened.
    pub fn analyze(&self) -> Result<AbTestReport> {
        let entries = self.read_entries()?;
        tracing::debug!(rows = entries.len(), "analyzing experiment log");
        Ok(analyzer::analyze_entries(&entries))
    }
}
