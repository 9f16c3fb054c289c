//! Dashboard Session Example
//!
//! End-to-end walkthrough: synthesize a delay dataset, run instrumented
//! sessions against it, then replay the experiment log through the
//! analyzer.
//!
//! Run with: cargo run --example dashboard_session
//! (set RUST_LOG=debug for the library's tracing output)

use anyhow::Result;
use chrono::NaiveDate;
use puntual::aggregate::DEFAULT_HISTOGRAM_BINS;
use puntual::experiment::ChartKind;
use puntual::sentiment::{word_frequencies, MOCK_POSTS};
use puntual::storage::DelayRecord;
use puntual::{Session, Variant};
use std::path::Path;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn write_sample_dataset(path: &Path) -> Result<()> {
    let stations = [
        ("Hauptbahnhof", "Berlin"),
        ("Zoo Station", "Berlin"),
        ("Hauptbahnhof", "Munich"),
        ("Südbahnhof", "Munich"),
        ("Hauptbahnhof", "Hamburg"),
        ("Südbahnhof", "Hamburg"),
    ];
    let routes = ["ICE-1", "ICE-2", "RE-7", "S-3"];

    let mut writer = csv::Writer::from_path(path)?;
    for day in 1..=14u32 {
        for (i, (station, city)) in stations.iter().enumerate() {
            // A deterministic mix of punctual and late arrivals
            let delay = f64::from((day + u32::try_from(i)?) % 9) * 1.8;
            writer.serialize(DelayRecord::new(
                NaiveDate::from_ymd_opt(2024, 3, day).ok_or_else(|| {
                    anyhow::anyhow!("invalid sample date")
                })?,
                *station,
                *city,
                routes[(i + day as usize) % routes.len()],
                delay,
            ))?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn run_visit(data: &Path, log: &Path, variant: Variant, interactions: u64) -> Result<()> {
    let mut session = Session::builder()
        .data_path(data)
        .log_path(log)
        .variant(variant)
        .build()?;
    for _ in 0..interactions {
        session.record_interaction();
    }
    session.log_session()?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    println!("=== Train-Delay Dashboard Session ===\n");

    let dir = tempfile::tempdir()?;
    let data_path = dir.path().join("train_delays.csv");
    let log_path = dir.path().join("ab_test_results.csv");

    // 1. Synthesize a delay dataset
    println!("1. Writing sample dataset...");
    write_sample_dataset(&data_path)?;

    // 2. Start a session: one load, one variant draw
    println!("2. Starting session...");
    let mut session = Session::builder()
        .data_path(&data_path)
        .log_path(&log_path)
        .build()?;
    println!(
        "   Loaded {} records, assigned variant {}\n",
        session.records().len(),
        session.variant()
    );

    // 3. Station delay table (drives the map)
    println!("3. Mean delay by station:");
    for aggregate in session.station_delays() {
        println!(
            "   {:<14} {:<8} {:>5.1} min  {:?}",
            aggregate.station(),
            aggregate.city(),
            aggregate.mean_delay(),
            aggregate.severity()
        );
    }

    // 4. Route reliability, best first
    println!("\n4. Route reliability:");
    for row in session.route_reliability() {
        println!(
            "   {:<6} {:>5.1}%  ({}/{} on time)",
            row.route(),
            row.reliability_score(),
            row.on_time_count(),
            row.total_trips()
        );
    }

    // 5. Filter to one city and render the variant's chart data
    println!("\n5. Filtering to Berlin (one interaction)...");
    session.record_interaction();
    match session.chart_kind() {
        ChartKind::Histogram => {
            println!("   Variant A sees a histogram:");
            for bin in session.delay_histogram(Some("Berlin"), DEFAULT_HISTOGRAM_BINS) {
                if bin.count > 0 {
                    println!("   [{:>5.2}, {:>5.2}) {:>3} rows", bin.lower, bin.upper, bin.count);
                }
            }
        }
        ChartKind::BoxPlot => {
            if let Some(stats) = session.delay_box_stats(Some("Berlin")) {
                println!("   Variant B sees a box plot:");
                println!(
                    "   min {:.1} | q1 {:.1} | median {:.1} | q3 {:.1} | max {:.1}",
                    stats.min, stats.q1, stats.median, stats.q3, stats.max
                );
            }
        }
    }

    // 6. Log this session twice (each explicit action appends one row),
    //    then simulate earlier visits from both groups
    println!("\n6. Logging sessions...");
    session.log_session()?;
    session.record_interaction();
    session.log_session()?;
    run_visit(&data_path, &log_path, Variant::A, 2)?;
    run_visit(&data_path, &log_path, Variant::A, 4)?;
    run_visit(&data_path, &log_path, Variant::B, 7)?;
    run_visit(&data_path, &log_path, Variant::B, 11)?;
    println!("   {} rows in the log", session.log().read_entries()?.len());

    // 7. Analyze the experiment log
    println!("\n7. A/B test analysis:");
    let report = session.analyze()?;
    for summary in report.summaries() {
        println!(
            "   Group {}: {:>5.2} mean interactions, {:>7.2}s mean time, n={}",
            summary.variant(),
            summary.mean_interactions(),
            summary.mean_elapsed_seconds(),
            summary.sample_count()
        );
    }
    if let Some(t) = report.t_test() {
        println!(
            "   t = {:.4}, df = {:.2}, p-value = {:.4}",
            t.t_statistic, t.degrees_of_freedom, t.p_value
        );
    }
    match report.significance() {
        Some(verdict) => println!("   {verdict}"),
        None => println!("   Not enough samples for the significance test"),
    }
    println!("\n   Report snapshot: {}", serde_json::to_string_pretty(&report)?);

    // 8. Sentiment word frequencies (feeds the word cloud)
    println!("\n8. Top sentiment tokens:");
    for (token, count) in word_frequencies(&MOCK_POSTS).into_iter().take(5) {
        println!("   {token:<12} x{count}");
    }

    println!("\n=== Session complete ===");
    Ok(())
}
