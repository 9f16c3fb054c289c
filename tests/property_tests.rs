//! Comprehensive property-based tests for puntual
//!
//! - Test mathematical invariants of the grouped aggregations
//! - Test ordering and rounding contracts
//! - Run with ProptestConfig::with_cases(100)
//! - Must complete in <30 seconds for pre-commit hook

use chrono::NaiveDate;
use proptest::prelude::*;
use puntual::aggregate::{delay_histogram, route_reliability, station_delays};
use puntual::stats::{round1, welch_t_test};
use puntual::storage::DelayRecord;
use std::collections::HashSet;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

const STATIONS: [&str; 3] = ["Hauptbahnhof", "Zoo Station", "Südbahnhof"];
const CITIES: [&str; 3] = ["Berlin", "Munich", "Hamburg"];
const ROUTES: [&str; 4] = ["ICE-1", "ICE-2", "RE-7", "S-3"];

/// Generate one delay record over a small station/route vocabulary so
/// groups actually collide
fn arb_record() -> impl Strategy<Value = DelayRecord> {
    (0..3usize, 0..3usize, 0..4usize, 1u32..28, 0.0f64..60.0).prop_map(
        |(station, city, route, day, delay)| {
            DelayRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                STATIONS[station],
                CITIES[city],
                ROUTES[route],
                delay,
            )
        },
    )
}

fn arb_records() -> impl Strategy<Value = Vec<DelayRecord>> {
    proptest::collection::vec(arb_record(), 0..120)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Route Reliability Properties
    // ========================================================================

    /// Property: each route's total_trips equals its record count in the
    /// input, and on-time counts never exceed the dataset size
    #[test]
    fn prop_route_totals_match_input(records in arb_records()) {
        let rows = route_reliability(&records);

        let mut on_time_sum: usize = 0;
        for row in &rows {
            let input_count = records
                .iter()
                .filter(|r| r.route() == row.route())
                .count();
            prop_assert_eq!(row.total_trips(), input_count as u64);
            prop_assert!(row.on_time_count() <= row.total_trips());
            on_time_sum += usize::try_from(row.on_time_count()).unwrap();
        }
        prop_assert!(on_time_sum <= records.len());
    }

    /// Property: reliability_score is in [0, 100] and equals
    /// round1(100 * on_time / total) exactly
    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn prop_reliability_score_bounds_and_rounding(records in arb_records()) {
        for row in route_reliability(&records) {
            prop_assert!(row.reliability_score() >= 0.0);
            prop_assert!(row.reliability_score() <= 100.0);

            let expected = round1(
                100.0 * row.on_time_count() as f64 / row.total_trips() as f64,
            );
            prop_assert_eq!(row.reliability_score(), expected);
        }
    }

    /// Property: output is sorted descending by reliability_score
    #[test]
    fn prop_reliability_sorted_descending(records in arb_records()) {
        let rows = route_reliability(&records);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].reliability_score() >= pair[1].reliability_score());
        }
    }

    // ========================================================================
    // Station Aggregate Properties
    // ========================================================================

    /// Property: one aggregate per distinct (station, city) pair, in
    /// strictly ascending key order
    #[test]
    fn prop_station_aggregates_cover_distinct_pairs(records in arb_records()) {
        let aggregates = station_delays(&records);

        let distinct: HashSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.station(), r.city()))
            .collect();
        prop_assert_eq!(aggregates.len(), distinct.len());

        for pair in aggregates.windows(2) {
            let left = (pair[0].station(), pair[0].city());
            let right = (pair[1].station(), pair[1].city());
            prop_assert!(left < right);
        }
    }

    /// Property: station means stay within the observed delay range
    #[test]
    fn prop_station_means_within_observed_range(
        records in proptest::collection::vec(arb_record(), 1..120)
    ) {
        let min = records
            .iter()
            .map(DelayRecord::delay_minutes)
            .fold(f64::INFINITY, f64::min);
        let max = records
            .iter()
            .map(DelayRecord::delay_minutes)
            .fold(f64::NEG_INFINITY, f64::max);

        for aggregate in station_delays(&records) {
            prop_assert!(aggregate.mean_delay() >= min - 1e-9);
            prop_assert!(aggregate.mean_delay() <= max + 1e-9);
        }
    }

    // ========================================================================
    // Histogram Properties
    // ========================================================================

    /// Property: histogram bins partition the dataset (counts sum to the
    /// record count, nothing falls outside)
    #[test]
    fn prop_histogram_preserves_record_count(
        records in arb_records(),
        bins in 1usize..40,
    ) {
        let histogram = delay_histogram(&records, bins);
        let counted: u64 = histogram.iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, records.len() as u64);
    }

    // ========================================================================
    // Welch t-test Properties
    // ========================================================================

    /// Property: swapping groups flips the sign of t and keeps the p-value
    /// (including the diverging statistic of constant, separated groups)
    #[test]
    fn prop_welch_symmetric_under_group_swap(
        a in proptest::collection::vec(0.0f64..50.0, 2..20),
        b in proptest::collection::vec(0.0f64..50.0, 2..20),
    ) {
        let ab = welch_t_test(&a, &b).unwrap();
        let ba = welch_t_test(&b, &a).unwrap();

        if ab.t_statistic.is_finite() {
            prop_assert!((ab.t_statistic + ba.t_statistic).abs() < 1e-9);
        } else {
            prop_assert_eq!(ab.t_statistic, -ba.t_statistic);
        }
        prop_assert!((ab.p_value - ba.p_value).abs() < 1e-9);
        prop_assert!(ab.p_value >= 0.0);
        prop_assert!(ab.p_value <= 1.0);
    }
}
