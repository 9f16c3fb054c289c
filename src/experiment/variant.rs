//! Experiment variant - per-session A/B group

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which delay-distribution chart a session renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Equal-width histogram of delay minutes
    Histogram,
    /// Five-number box plot of delay minutes
    BoxPlot,
}

/// A/B experiment group.
///
/// Drawn uniformly once per session and fixed for the session lifetime.
/// Serializes as exactly `"A"` or `"B"`, matching the `group` column of
/// the persisted log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Histogram arm
    A,
    /// Box-plot arm
    B,
}

impl Variant {
    /// Draw a variant uniformly at random.
    #[must_use]
    pub fn draw(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Self::A
        } else {
            Self::B
        }
    }

    /// Chart style this variant sees.
    #[must_use]
    pub const fn chart_kind(self) -> ChartKind {
        match self {
            Self::A => ChartKind::Histogram,
            Self::B => ChartKind::BoxPlot,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

impl FromStr for Variant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            other => Err(crate::Error::Log(format!("unknown variant: {other}"))),
        }
    }
}
