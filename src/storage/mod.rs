//! Delay dataset storage (CSV)
//!
//! **Load-Once Design** (Single-Session Pattern):
//! - Puntual serves one dashboard session per dataset load
//! - Read pattern: parse the full CSV once, aggregate in memory
//! - NOT suitable for: streaming feeds, incremental row updates
//!
//! Toyota Way Principles:
//! - Poka-Yoke: row validation rejects malformed delays at the door
//! - Muda elimination: one pass over the file, filters reuse the loaded rows

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Delays below this many minutes count as on time
pub const ON_TIME_THRESHOLD_MINUTES: f64 = 5.0;

/// Columns every delay dataset must carry
const REQUIRED_COLUMNS: [&str; 5] = ["date", "station", "city", "route", "delay_minutes"];

/// One observed train arrival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayRecord {
    date: NaiveDate,
    station: String,
    city: String,
    route: String,
    delay_minutes: f64,
}

impl DelayRecord {
    /// Create a new delay record
    #[must_use]
    pub fn new(
        date: NaiveDate,
        station: impl Into<String>,
        city: impl Into<String>,
        route: impl Into<String>,
        delay_minutes: f64,
    ) -> Self {
        Self {
            date,
            station: station.into(),
            city: city.into(),
            route: route.into(),
            delay_minutes,
        }
    }

    /// Service date of the arrival
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Station name
    #[must_use]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// City the station belongs to
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Route identifier
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Observed delay in minutes
    #[must_use]
    pub const fn delay_minutes(&self) -> f64 {
        self.delay_minutes
    }

    /// Whether this arrival counts as on time
    /// (strictly under [`ON_TIME_THRESHOLD_MINUTES`])
    #[must_use]
    pub fn is_on_time(&self) -> bool {
        self.delay_minutes < ON_TIME_THRESHOLD_MINUTES
    }
}

/// In-memory delay dataset for one dashboard session
#[derive(Debug)]
pub struct DelayTable {
    records: Vec<DelayRecord>,
}

impl DelayTable {
    /// Create a table from existing records
    ///
    /// Useful for testing and benchmarking
    #[must_use]
    pub fn new(records: Vec<DelayRecord>) -> Self {
        Self { records }
    }

    /// Load a delay dataset from a CSV file
    ///
    /// The header row must name every required column (`date`, `station`,
    /// `city`, `route`, `delay_minutes`). A header-only file yields an
    /// empty table. Any unparsable or negative delay row aborts the load
    /// with its 1-based line number (the header is line 1).
    ///
    /// # Errors
    /// Returns [`Error::Load`] if the file cannot be opened,
    /// [`Error::MissingColumn`] for an incomplete header, and
    /// [`Error::InvalidRecord`] for a row that fails validation.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::Load(format!(
                "failed to open {}: {e}",
                path.as_ref().display()
            ))
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| Error::Load(format!("failed to read header row: {e}")))?
            .clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::MissingColumn(required.to_string()));
            }
        }

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<DelayRecord>().enumerate() {
            // Header occupies line 1, first record starts at line 2
            let line = idx + 2;
            let record = row.map_err(|e| Error::InvalidRecord {
                line,
                reason: e.to_string(),
            })?;
            if !record.delay_minutes.is_finite() {
                return Err(Error::InvalidRecord {
                    line,
                    reason: "delay_minutes is not a finite number".to_string(),
                });
            }
            if record.delay_minutes < 0.0 {
                return Err(Error::InvalidRecord {
                    line,
                    reason: format!("negative delay_minutes: {}", record.delay_minutes),
                });
            }
            records.push(record);
        }

        tracing::debug!(rows = records.len(), "loaded delay dataset");
        Ok(Self { records })
    }

    /// All loaded records
    #[must_use]
    pub fn records(&self) -> &[DelayRecord] {
        &self.records
    }

    /// Number of loaded records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct cities in the dataset, sorted ascending
    #[must_use]
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self.records.iter().map(|r| r.city.clone()).collect();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Records for one city, or the whole dataset when `city` is `None`
    #[must_use]
    pub fn records_for_city(&self, city: Option<&str>) -> Vec<DelayRecord> {
        match city {
            Some(name) => self
                .records
                .iter()
                .filter(|r| r.city == name)
                .cloned()
                .collect(),
            None => self.records.clone(),
        }
    }
}
