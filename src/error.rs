//! Error types for Puntual
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Puntual error types
#[derive(Error, Debug)]
pub enum Error {
    /// Delay dataset could not be loaded
    #[error("Load error: {0}")]
    Load(String),

    /// Dataset is missing a required column
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A row in the dataset failed validation
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line number in the source file (header is line 1)
        line: usize,
        /// What made the row unusable
        reason: String,
    },

    /// Experiment log could not be written or read
    #[error("Log error: {0}")]
    Log(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
