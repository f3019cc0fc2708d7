//! Pearson correlation between the night-futures signal and a next-day
//! outcome, with a two-sided significance test.

use super::MetricKind;
use crate::domain::TradingDayRecord;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance level for `CorrelationSummary::significant`.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub kind: MetricKind,
    pub coefficient: f64,
    pub p_value: f64,
    pub significant: bool,
    pub sample_size: usize,
}

/// Pearson r between `night_futures_foreign` and the `kind` target.
///
/// Returns `None` with fewer than three records or when either side is
/// constant.
pub fn correlation(slice: &[TradingDayRecord], kind: MetricKind) -> Option<CorrelationSummary> {
    let n = slice.len();
    if n < 3 {
        return None;
    }
    let xs: Vec<f64> = slice.iter().map(|r| r.night_futures_foreign).collect();
    let ys: Vec<f64> = slice.iter().map(|r| kind.target(r)).collect();
    let r = pearson(&xs, &ys)?;
    let p_value = two_sided_p_value(r, n)?;

    Some(CorrelationSummary {
        kind,
        coefficient: r,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
        sample_size: n,
    })
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// t = r * sqrt((n - 2) / (1 - r^2)) against Student's t with n - 2 dof.
fn two_sided_p_value(r: f64, n: usize) -> Option<f64> {
    if r.abs() >= 1.0 {
        return Some(0.0);
    }
    let dof = (n - 2) as f64;
    let t = r * (dof / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}
