//! Descriptive statistics and the Welch two-sample t-test
//!
//! Small, allocation-free helpers shared by the aggregation engine and the
//! experiment analyzer. All functions are total: empty or undersized inputs
//! yield `None` instead of NaN.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a Welch two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// The t statistic (signed; group A minus group B in the numerator).
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (fractional).
    pub degrees_of_freedom: f64,
    /// Two-sided p-value under the Student's t distribution.
    pub p_value: f64,
}

/// Arithmetic mean. `None` when `values` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Sample variance with the n-1 denominator. `None` below 2 observations.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Percentile of an ascending-sorted slice with linear interpolation.
///
/// `p` is clamped to `[0, 100]`. Returns `None` when `sorted` is empty.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 100.0);
    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = index - lower as f64;
    Some(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
}

/// Round to one decimal place, half away from zero.
#[must_use]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Welch two-sample t-test for unequal variances.
///
/// Computes `t = (mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)` with
/// Welch-Satterthwaite degrees of freedom and a two-sided p-value.
/// Returns `None` unless both groups carry at least 2 observations
/// (the sample variance is undefined below that). Constant groups
/// collapse the pooled standard error to zero; rather than dividing by
/// zero, equal means report `t = 0`, pooled degrees of freedom, and
/// `p = 1.0`, while unequal means diverge to `t = ±inf`, `p = 0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn welch_t_test(group_a: &[f64], group_b: &[f64]) -> Option<TTestResult> {
    if group_a.len() < 2 || group_b.len() < 2 {
        return None;
    }
    let n_a = group_a.len() as f64;
    let n_b = group_b.len() as f64;
    // Guards above make these Some.
    let mean_a = mean(group_a)?;
    let mean_b = mean(group_b)?;
    let var_a = sample_variance(group_a)?;
    let var_b = sample_variance(group_b)?;

    // Non-negative by construction; zero only when both groups are constant.
    let se_sq = var_a / n_a + var_b / n_b;
    if se_sq <= 0.0 {
        let degrees_of_freedom = n_a + n_b - 2.0;
        let difference = mean_a - mean_b;
        if difference.abs() > 0.0 {
            // Constant but separated groups: the statistic diverges.
            return Some(TTestResult {
                t_statistic: f64::INFINITY.copysign(difference),
                degrees_of_freedom,
                p_value: 0.0,
            });
        }
        return Some(TTestResult {
            t_statistic: 0.0,
            degrees_of_freedom,
            p_value: 1.0,
        });
    }

    let t_statistic = (mean_a - mean_b) / se_sq.sqrt();
    let degrees_of_freedom = se_sq.powi(2)
        / ((var_a / n_a).powi(2) / (n_a - 1.0) + (var_b / n_b).powi(2) / (n_b - 1.0));
    let p_value = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_or(1.0, |dist| 2.0 * (1.0 - dist.cdf(t_statistic.abs())));

    Some(TTestResult {
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}
