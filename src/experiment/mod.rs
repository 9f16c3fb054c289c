//! A/B Experiment Instrumentation
//!
//! This module carries the A/B-test side of the dashboard: the per-session
//! variant, the append-only results log, and the analyzer that reloads the
//! log and runs the significance test.
//!
//! ## Schema Overview
//!
//! ```text
//! Variant (drawn per session)
//!     │ log action
//!     ▼
//! ExperimentLogEntry ──append──> ExperimentLog (CSV, header on creation)
//!                                     │ analyze
//!                                     ▼
//!                               AbTestReport (VariantSummary per group
//!                                             + optional Welch t-test)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use puntual::experiment::{ExperimentLog, ExperimentLogEntry, Variant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let log = ExperimentLog::new(dir.path().join("ab_test_results.csv"));
//!
//! // One row per explicit log action
//! log.append(&ExperimentLogEntry::new(Variant::A, 3, 41.27))?;
//! log.append(&ExperimentLogEntry::new(Variant::B, 9, 12.5))?;
//!
//! // Reload and summarize
//! let report = log.analyze()?;
//! assert_eq!(report.summaries().len(), 2);
//! assert!(report.t_test().is_none()); // one row per group: test skipped
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod log;
mod log_entry;
mod variant;

pub use analyzer::{
    analyze_entries, AbTestReport, Significance, VariantSummary, SIGNIFICANCE_LEVEL,
};
pub use log::ExperimentLog;
pub use log_entry::ExperimentLogEntry;
pub use variant::{ChartKind, Variant};
