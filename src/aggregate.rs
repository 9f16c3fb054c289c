//! Grouped aggregations over the delay dataset
//!
//! Pure functions: each takes the loaded records and returns derived rows,
//! nothing is cached or mutated. Grouping is single-pass with `HashMap`
//! accumulators; ordering guarantees live in each function's contract.

use crate::stats::{percentile, round1};
use crate::storage::DelayRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default bin count for the delay histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Mean delays above this many minutes band as [`DelaySeverity::Moderate`]
pub const MODERATE_DELAY_MINUTES: f64 = 5.0;

/// Mean delays above this many minutes band as [`DelaySeverity::Major`]
pub const MAJOR_DELAY_MINUTES: f64 = 10.0;

/// Severity band for a station's mean delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelaySeverity {
    /// Mean delay at or under 5 minutes
    Minor,
    /// Mean delay over 5 and at most 10 minutes
    Moderate,
    /// Mean delay over 10 minutes
    Major,
}

/// Mean delay for one (station, city) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationAggregate {
    station: String,
    city: String,
    mean_delay: f64,
}

impl StationAggregate {
    /// Create a station aggregate
    ///
    /// Useful for testing and benchmarking
    #[must_use]
    pub fn new(station: impl Into<String>, city: impl Into<String>, mean_delay: f64) -> Self {
        Self {
            station: station.into(),
            city: city.into(),
            mean_delay,
        }
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

    /// Arithmetic mean of the station's observed delays
    #[must_use]
    pub const fn mean_delay(&self) -> f64 {
        self.mean_delay
    }

    /// Severity band of the mean delay
    #[must_use]
    pub fn severity(&self) -> DelaySeverity {
        if self.mean_delay > MAJOR_DELAY_MINUTES {
            DelaySeverity::Major
        } else if self.mean_delay > MODERATE_DELAY_MINUTES {
            DelaySeverity::Moderate
        } else {
            DelaySeverity::Minor
        }
    }
}

/// On-time performance for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReliability {
    route: String,
    total_trips: u64,
    on_time_count: u64,
    reliability_score: f64,
}

impl RouteReliability {
    /// Route identifier
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Number of recorded trips on the route
    #[must_use]
    pub const fn total_trips(&self) -> u64 {
        self.total_trips
    }

    /// Trips that arrived on time
    #[must_use]
    pub const fn on_time_count(&self) -> u64 {
        self.on_time_count
    }

    /// Percentage of on-time trips, rounded to one decimal
    #[must_use]
    pub const fn reliability_score(&self) -> f64 {
        self.reliability_score
    }
}

/// One equal-width bin of the delay histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge in minutes
    pub lower: f64,
    /// Upper edge in minutes (inclusive for the last bin)
    pub upper: f64,
    /// Records falling in the bin
    pub count: u64,
}

/// Five-number summary of the observed delays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayBoxStats {
    /// Smallest observed delay
    pub min: f64,
    /// First quartile (linearly interpolated)
    pub q1: f64,
    /// Median delay
    pub median: f64,
    /// Third quartile (linearly interpolated)
    pub q3: f64,
    /// Largest observed delay
    pub max: f64,
}

/// Mean delay per (station, city) pair, sorted by (station, city).
///
/// The grouping is logically an unordered set; the sort exists so repeated
/// renders and tests see one canonical order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn station_delays(records: &[DelayRecord]) -> Vec<StationAggregate> {
    let mut sums: HashMap<(String, String), (f64, u64)> = HashMap::new();
    for record in records {
        let entry = sums
            .entry((record.station().to_string(), record.city().to_string()))
            .or_insert((0.0, 0));
        entry.0 += record.delay_minutes();
        entry.1 += 1;
    }

    let mut aggregates: Vec<StationAggregate> = sums
        .into_iter()
        .map(|((station, city), (sum, count))| StationAggregate {
            station,
            city,
            mean_delay: sum / count as f64,
        })
        .collect();
    aggregates.sort_by(|a, b| {
        (a.station.as_str(), a.city.as_str()).cmp(&(b.station.as_str(), b.city.as_str()))
    });
    aggregates
}

/// On-time reliability per route, sorted descending by score.
///
/// Ties keep first-appearance order (stable sort over an insertion-ordered
/// accumulator). Every group comes from at least one input row, so
/// `total_trips > 0` holds structurally; the assertion documents it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn route_reliability(records: &[DelayRecord]) -> Vec<RouteReliability> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (u64, u64)> = HashMap::new();
    for record in records {
        if !counts.contains_key(record.route()) {
            order.push(record.route().to_string());
        }
        let entry = counts.entry(record.route().to_string()).or_insert((0, 0));
        entry.0 += 1;
        if record.is_on_time() {
            entry.1 += 1;
        }
    }

    let mut rows: Vec<RouteReliability> = order
        .into_iter()
        .map(|route| {
            let (total_trips, on_time_count) = counts[&route];
            debug_assert!(total_trips > 0, "route groups derive from input rows");
            let reliability_score = round1(100.0 * on_time_count as f64 / total_trips as f64);
            RouteReliability {
                route,
                total_trips,
                on_time_count,
                reliability_score,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.reliability_score.total_cmp(&a.reliability_score));
    rows
}

/// Equal-width histogram of the observed delays.
///
/// The range spans [min, max] of the data and the max value lands in the
/// last bin. Empty input or `bins == 0` yields an empty Vec; a degenerate
/// range (all delays equal) collapses to a single bin holding everything.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn delay_histogram(records: &[DelayRecord], bins: usize) -> Vec<HistogramBin> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        min = min.min(record.delay_minutes());
        max = max.max(record.delay_minutes());
    }

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: records.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for record in records {
        let idx = (((record.delay_minutes() - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Five-number summary of the observed delays; `None` on empty input.
#[must_use]
pub fn delay_box_stats(records: &[DelayRecord]) -> Option<DelayBoxStats> {
    if records.is_empty() {
        return None;
    }
    let mut delays: Vec<f64> = records.iter().map(DelayRecord::delay_minutes).collect();
    delays.sort_by(f64::total_cmp);

    Some(DelayBoxStats {
        min: delays[0],
        q1: percentile(&delays, 25.0)?,
        median: percentile(&delays, 50.0)?,
        q3: percentile(&delays, 75.0)?,
        max: delays[delays.len() - 1],
    })
}
