//! Dashboard session context
//!
//! One [`Session`] owns everything scoped to a single user visit: the
//! delay table (loaded exactly once at build time), the drawn experiment
//! variant, the interaction counter, and the start-of-session clock. There
//! is no process-wide state; independent sessions never share anything
//! except the append-only log file.
//!
//! ```rust
//! use puntual::{Session, Variant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let data = dir.path().join("train_delays.csv");
//! std::fs::write(
//!     &data,
//!     "date,station,city,route,delay_minutes\n\
//!      2024-03-01,Hauptbahnhof,Berlin,ICE-1,3.0\n",
//! )?;
//!
//! let mut session = Session::builder()
//!     .data_path(&data)
//!     .log_path(dir.path().join("ab_test_results.csv"))
//!     .variant(Variant::A) // tests pin the draw; production omits this
//!     .build()?;
//!
//! session.record_interaction();
//! let entry = session.log_session()?;
//! assert_eq!(entry.interaction_count(), 1);
//! # Ok(())
//! # }
//! ```

use crate::aggregate::{self, DelayBoxStats, HistogramBin, RouteReliability, StationAggregate};
use crate::experiment::{
    AbTestReport, ChartKind, ExperimentLog, ExperimentLogEntry, Variant,
};
use crate::stats;
use crate::storage::{DelayRecord, DelayTable};
use crate::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Default delay dataset path
pub const DEFAULT_DATA_PATH: &str = "train_delays.csv";

/// Default experiment log path
pub const DEFAULT_LOG_PATH: &str = "ab_test_results.csv";

/// One user session of the dashboard.
pub struct Session {
    table: DelayTable,
    log: ExperimentLog,
    variant: Variant,
    interactions: u64,
    started_at: Instant,
}

impl Session {
    /// Create a session builder with the default file paths.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// The experiment group drawn for this session. Constant for the
    /// session lifetime; repeated reads return the same value.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Chart style this session renders, decided by the variant.
    #[must_use]
    pub const fn chart_kind(&self) -> ChartKind {
        self.variant.chart_kind()
    }

    /// Record one user interaction (one distinct filter selection).
    pub fn record_interaction(&mut self) {
        self.interactions += 1;
    }

    /// Interactions recorded so far. Monotonically nondecreasing.
    #[must_use]
    pub const fn interactions(&self) -> u64 {
        self.interactions
    }

    /// Seconds since the session started, unrounded.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// All loaded delay records.
    #[must_use]
    pub fn records(&self) -> &[DelayRecord] {
        self.table.records()
    }

    /// Distinct cities for the filter control, sorted.
    #[must_use]
    pub fn cities(&self) -> Vec<String> {
        self.table.cities()
    }

    /// Records under the current city filter (`None` = all).
    #[must_use]
    pub fn records_for_city(&self, city: Option<&str>) -> Vec<DelayRecord> {
        self.table.records_for_city(city)
    }

    /// Mean delay per (station, city).
    #[must_use]
    pub fn station_delays(&self) -> Vec<StationAggregate> {
        aggregate::station_delays(self.table.records())
    }

    /// Route reliability table, best routes first.
    #[must_use]
    pub fn route_reliability(&self) -> Vec<RouteReliability> {
        aggregate::route_reliability(self.table.records())
    }

    /// Histogram of the delays under a city filter (variant A's chart).
    #[must_use]
    pub fn delay_histogram(&self, city: Option<&str>, bins: usize) -> Vec<HistogramBin> {
        aggregate::delay_histogram(&self.table.records_for_city(city), bins)
    }

    /// Box statistics of the delays under a city filter (variant B's chart).
    #[must_use]
    pub fn delay_box_stats(&self, city: Option<&str>) -> Option<DelayBoxStats> {
        aggregate::delay_box_stats(&self.table.records_for_city(city))
    }

    /// Handle to the experiment log this session appends to.
    #[must_use]
    pub const fn log(&self) -> &ExperimentLog {
        &self.log
    }

    /// Append one summary row for this session to the experiment log.
    ///
    /// Each explicit invocation writes exactly one row carrying the
    /// session's fixed group, the current interaction count, and the
    /// elapsed seconds rounded to two decimals. Counters are not reset;
    /// logging twice reflects the state at each call.
    ///
    /// # Errors
    /// Returns [`crate::Error::Log`] if the append fails.
    pub fn log_session(&self) -> Result<ExperimentLogEntry> {
        let entry = ExperimentLogEntry::new(
            self.variant,
            self.interactions,
            stats::round2(self.elapsed_seconds()),
        );
        self.log.append(&entry)?;
        Ok(entry)
    }

    /// Reload the experiment log and produce the A/B report.
    ///
    /// # Errors
    /// Returns [`crate::Error::Log`] if an existing log cannot be read.
    pub fn analyze(&self) -> Result<AbTestReport> {
        self.log.analyze()
    }
}

/// Builder for [`Session`].
#[derive(Debug)]
pub struct SessionBuilder {
    data_path: PathBuf,
    log_path: PathBuf,
    variant: Option<Variant>,
}

impl SessionBuilder {
    /// Create a builder with the default file paths and a random variant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            variant: None,
        }
    }

    /// Set the delay dataset path.
    #[must_use]
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the experiment log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Pin the variant instead of drawing one (used by tests).
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Load the dataset and start the session.
    ///
    /// The table is parsed here, once; the session never re-reads it. The
    /// variant draw and the start-of-session clock are captured here too.
    ///
    /// # Errors
    /// Returns the loader's error if the dataset is missing or malformed
    /// (fatal to the session, per the dashboard's error policy).
    pub fn build(self) -> Result<Session> {
        let table = DelayTable::load_csv(&self.data_path)?;
        let variant = self
            .variant
            .unwrap_or_else(|| Variant::draw(&mut rand::thread_rng()));

        tracing::info!(
            variant = %variant,
            rows = table.len(),
            data = %self.data_path.display(),
            "session started"
        );

        Ok(Session {
            table,
            log: ExperimentLog::new(self.log_path),
            variant,
            interactions: 0,
            started_at: Instant::now(),
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
