//! # Puntual: Train-Delay Analytics with A/B Instrumentation
//!
//! **Version**: 0.2.3
//!
//! Puntual is the session core of a train-punctuality dashboard: it loads a
//! delay dataset, computes grouped statistics (station means, route
//! reliability, delay distributions), assigns each session an A/B variant,
//! and appends session summaries to a log that the analyzer later replays
//! through Welch's t-test.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Muda elimination**: the dataset parses once per session; filters reuse it
//! - **Poka-Yoke safety**: row validation rejects malformed delays at load time
//! - **Genchi Genbutsu**: significance comes from the logged rows, not projections
//! - **Jidoka**: analysis degrades to summaries when a group lacks samples
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use puntual::Session;
//!
//! // Load train_delays.csv and draw the session's variant
//! let mut session = Session::builder().build()?;
//!
//! for row in session.route_reliability() {
//!     println!("{}: {:.1}%", row.route(), row.reliability_score());
//! }
//!
//! // One row appended per explicit log action
//! session.record_interaction();
//! session.log_session()?;
//! # Ok::<(), puntual::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod error;
pub mod experiment;
pub mod sentiment;
pub mod session;
pub mod stats;
pub mod storage;

pub use error::{Error, Result};
pub use experiment::Variant;
pub use session::{Session, SessionBuilder, DEFAULT_DATA_PATH, DEFAULT_LOG_PATH};
