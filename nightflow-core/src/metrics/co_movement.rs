//! Same-direction (co-movement) probability between the night-futures
//! signal and a next-day outcome.

use super::MetricKind;
use crate::domain::{DateRange, TradingDayRecord, TradingSeries};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agreement count over a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoMovement {
    pub kind: MetricKind,
    /// Records where both signs are strictly positive or strictly negative.
    pub agreeing: usize,
    pub total: usize,
    /// `agreeing / total * 100`.
    pub probability_pct: f64,
}

impl fmt::Display for CoMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}%", self.probability_pct)
    }
}

/// Share of records whose night futures and `kind` target move the same way.
///
/// Zero on either side never agrees. An empty slice has no probability and
/// returns `None`.
pub fn co_movement_probability(slice: &[TradingDayRecord], kind: MetricKind) -> Option<CoMovement> {
    if slice.is_empty() {
        return None;
    }
    let agreeing = slice
        .iter()
        .filter(|r| same_direction(r.night_futures_foreign, kind.target(r)))
        .count();
    let total = slice.len();
    Some(CoMovement {
        kind,
        agreeing,
        total,
        probability_pct: agreeing as f64 / total as f64 * 100.0,
    })
}

fn same_direction(signal: f64, outcome: f64) -> bool {
    (signal > 0.0 && outcome > 0.0) || (signal < 0.0 && outcome < 0.0)
}

/// The three probability statements for one date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceSummary {
    pub range: DateRange,
    pub rows: usize,
    pub futures: Option<CoMovement>,
    pub spot: Option<CoMovement>,
    pub index: Option<CoMovement>,
}

impl SliceSummary {
    pub fn get(&self, kind: MetricKind) -> Option<CoMovement> {
        match kind {
            MetricKind::Futures => self.futures,
            MetricKind::Spot => self.spot,
            MetricKind::Index => self.index,
        }
    }
}

/// Slice `series` to `range` and compute all three co-movement results.
pub fn summarize(series: &TradingSeries, range: DateRange) -> SliceSummary {
    let slice = series.slice(range);
    SliceSummary {
        range,
        rows: slice.len(),
        futures: co_movement_probability(slice, MetricKind::Futures),
        spot: co_movement_probability(slice, MetricKind::Spot),
        index: co_movement_probability(slice, MetricKind::Index),
    }
}
