//! Experiment log entry - one appended summary row

use super::Variant;
use serde::{Deserialize, Serialize};

/// One summary row of the append-only experiment log.
///
/// Serialized field names match the on-disk log header
/// (`group,interactions,time_spent_seconds`). Entries are created on the
/// explicit log action, appended, and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentLogEntry {
    #[serde(rename = "group")]
    variant: Variant,
    #[serde(rename = "interactions")]
    interaction_count: u64,
    #[serde(rename = "time_spent_seconds")]
    elapsed_seconds: f64,
}

impl ExperimentLogEntry {
    /// Create a new log entry.
    #[must_use]
    pub const fn new(variant: Variant, interaction_count: u64, elapsed_seconds: f64) -> Self {
        Self {
            variant,
            interaction_count,
            elapsed_seconds,
        }
    }

    /// The session's experiment group.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Filter selections recorded during the session.
    #[must_use]
    pub const fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    /// Session duration in seconds at log time.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}
