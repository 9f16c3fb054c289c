//! Experiment analyzer - per-group summaries and the significance test

use super::{ExperimentLogEntry, Variant};
use crate::stats::{self, TTestResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-sided significance threshold for the interaction-count test
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Verdict of the significance test at [`SIGNIFICANCE_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Significance {
    /// p-value under the threshold
    Significant,
    /// p-value at or over the threshold
    NotSignificant,
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Significant => {
                write!(f, "Significant difference between groups (p < 0.05).")
            }
            Self::NotSignificant => {
                write!(f, "No significant difference between groups (p >= 0.05).")
            }
        }
    }
}

/// Per-group summary derived from the persisted log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    variant: Variant,
    mean_interactions: f64,
    mean_elapsed_seconds: f64,
    sample_count: usize,
}

impl VariantSummary {
    /// The summarized group.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Mean interaction count, rounded to two decimals.
    #[must_use]
    pub const fn mean_interactions(&self) -> f64 {
        self.mean_interactions
    }

    /// Mean time spent in seconds, rounded to two decimals.
    #[must_use]
    pub const fn mean_elapsed_seconds(&self) -> f64 {
        self.mean_elapsed_seconds
    }

    /// Number of logged rows for the group.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Analyzer output: group summaries plus the optional significance test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbTestReport {
    summaries: Vec<VariantSummary>,
    t_test: Option<TTestResult>,
}

impl AbTestReport {
    /// Group summaries, ordered A then B; absent groups are omitted.
    #[must_use]
    pub fn summaries(&self) -> &[VariantSummary] {
        &self.summaries
    }

    /// Summary for one group, if the log holds any of its rows.
    #[must_use]
    pub fn summary_for(&self, variant: Variant) -> Option<&VariantSummary> {
        self.summaries.iter().find(|s| s.variant == variant)
    }

    /// Welch t-test over interaction counts; `None` when either group has
    /// fewer than 2 rows.
    #[must_use]
    pub const fn t_test(&self) -> Option<TTestResult> {
        self.t_test
    }

    /// Significance verdict, `None` when the test was skipped.
    #[must_use]
    pub fn significance(&self) -> Option<Significance> {
        self.t_test.map(|t| {
            if t.p_value < SIGNIFICANCE_LEVEL {
                Significance::Significant
            } else {
                Significance::NotSignificant
            }
        })
    }

    /// Whether the log held no entries at all ("no data available").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Summarize log entries per group.
///
/// Means are rounded to two decimals. The Welch t-test runs over the raw
/// interaction counts (not the rounded means) and only when both groups
/// carry at least 2 rows; otherwise the report holds summaries alone.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze_entries(entries: &[ExperimentLogEntry]) -> AbTestReport {
    let mut summaries = Vec::new();
    let mut interactions_by_group = Vec::new();

    for variant in [Variant::A, Variant::B] {
        let group: Vec<&ExperimentLogEntry> =
            entries.iter().filter(|e| e.variant() == variant).collect();
        let interactions: Vec<f64> = group
            .iter()
            .map(|e| e.interaction_count() as f64)
            .collect();

        if !group.is_empty() {
            let elapsed: Vec<f64> = group.iter().map(|e| e.elapsed_seconds()).collect();
            summaries.push(VariantSummary {
                variant,
                mean_interactions: stats::round2(stats::mean(&interactions).unwrap_or(0.0)),
                mean_elapsed_seconds: stats::round2(stats::mean(&elapsed).unwrap_or(0.0)),
                sample_count: group.len(),
            });
        }
        interactions_by_group.push(interactions);
    }

    // welch_t_test itself skips groups under 2 samples
    let t_test = stats::welch_t_test(&interactions_by_group[0], &interactions_by_group[1]);

    AbTestReport { summaries, t_test }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(variant: Variant, interactions: u64, elapsed: f64) -> ExperimentLogEntry {
        ExperimentLogEntry::new(variant, interactions, elapsed)
    }

    #[test]
    fn test_analyze_empty_log() {
        let report = analyze_entries(&[]);
        assert!(report.is_empty());
        assert!(report.summaries().is_empty());
        assert!(report.t_test().is_none());
        assert!(report.significance().is_none());
    }

    #[test]
    fn test_analyze_two_by_two_runs_test() {
        let entries = vec![
            entry(Variant::A, 2, 10.0),
            entry(Variant::B, 10, 30.0),
            entry(Variant::A, 4, 20.0),
            entry(Variant::B, 12, 40.0),
        ];

        let report = analyze_entries(&entries);
        assert_eq!(report.summaries().len(), 2);

        let a = report.summary_for(Variant::A).unwrap();
        assert!((a.mean_interactions() - 3.0).abs() < 1e-9);
        assert!((a.mean_elapsed_seconds() - 15.0).abs() < 1e-9);
        assert_eq!(a.sample_count(), 2);

        let b = report.summary_for(Variant::B).unwrap();
        assert!((b.mean_interactions() - 11.0).abs() < 1e-9);
        assert_eq!(b.sample_count(), 2);

        let t = report.t_test().unwrap();
        assert!(t.p_value < 0.05);
        assert_eq!(report.significance(), Some(Significance::Significant));
    }

    #[test]
    fn test_analyze_single_entry_group_skips_test() {
        let entries = vec![
            entry(Variant::A, 2, 10.0),
            entry(Variant::A, 4, 20.0),
            entry(Variant::B, 10, 30.0),
        ];

        let report = analyze_entries(&entries);
        assert_eq!(report.summaries().len(), 2);
        assert!(report.t_test().is_none());
        assert!(report.significance().is_none());
    }

    #[test]
    fn test_analyze_orders_summaries_a_then_b() {
        let entries = vec![
            entry(Variant::B, 1, 1.0),
            entry(Variant::A, 1, 1.0),
        ];

        let report = analyze_entries(&entries);
        assert_eq!(report.summaries()[0].variant(), Variant::A);
        assert_eq!(report.summaries()[1].variant(), Variant::B);
    }

    #[test]
    fn test_analyze_omits_absent_group() {
        let entries = vec![entry(Variant::B, 5, 2.0), entry(Variant::B, 7, 4.0)];

        let report = analyze_entries(&entries);
        assert_eq!(report.summaries().len(), 1);
        assert_eq!(report.summaries()[0].variant(), Variant::B);
        assert!(report.summary_for(Variant::A).is_none());
        assert!(report.t_test().is_none());
    }

    #[test]
    fn test_analyze_rounds_means_to_two_decimals() {
        let entries = vec![
            entry(Variant::A, 1, 10.0),
            entry(Variant::A, 2, 10.25),
            entry(Variant::B, 1, 1.0),
        ];

        let report = analyze_entries(&entries);
        let a = report.summary_for(Variant::A).unwrap();
        // (10.0 + 10.25) / 2 = 10.125, half rounds away from zero
        assert!((a.mean_elapsed_seconds() - 10.13).abs() < 1e-9);
        assert!((a.mean_interactions() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_close_groups_not_significant() {
        let entries = vec![
            entry(Variant::A, 5, 1.0),
            entry(Variant::A, 6, 1.0),
            entry(Variant::B, 5, 1.0),
            entry(Variant::B, 7, 1.0),
        ];

        let report = analyze_entries(&entries);
        assert_eq!(report.significance(), Some(Significance::NotSignificant));
    }

    #[test]
    fn test_constant_separated_groups_significant() {
        // Every A session logged 2 interactions, every B session 12: no
        // within-group variance, maximal between-group separation
        let entries = vec![
            entry(Variant::A, 2, 1.0),
            entry(Variant::A, 2, 1.0),
            entry(Variant::B, 12, 1.0),
            entry(Variant::B, 12, 1.0),
        ];

        let report = analyze_entries(&entries);
        let t = report.t_test().unwrap();
        assert_eq!(t.t_statistic, f64::NEG_INFINITY);
        assert_eq!(t.p_value, 0.0);
        assert_eq!(report.significance(), Some(Significance::Significant));
    }

    #[test]
    fn test_significance_display_strings() {
        assert_eq!(
            Significance::Significant.to_string(),
            "Significant difference between groups (p < 0.05)."
        );
        assert_eq!(
            Significance::NotSignificant.to_string(),
            "No significant difference between groups (p >= 0.05)."
        );
    }

    #[test]
    fn test_report_serde_round_trip() {
        let entries = vec![
            entry(Variant::A, 2, 10.0),
            entry(Variant::A, 4, 20.0),
            entry(Variant::B, 10, 30.0),
            entry(Variant::B, 12, 40.0),
        ];
        let report = analyze_entries(&entries);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: AbTestReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
