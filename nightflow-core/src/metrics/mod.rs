//! Derived metrics over date slices of a normalized series.
//!
//! Everything here is a pure function of a `&[TradingDayRecord]` slice; the
//! slice may be empty and may be in any order unless a function says
//! otherwise.

pub mod co_movement;
pub mod comparison;
pub mod correlation;

pub use co_movement::{co_movement_probability, summarize, CoMovement, SliceSummary};
pub use comparison::{comparison_rows, ComparisonRow, PairedValue};
pub use correlation::{correlation, CorrelationSummary};

use crate::domain::TradingDayRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which next-day outcome the night-futures signal is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Next-day regular-session foreign futures.
    Futures,
    /// Next-day regular-session foreign spot.
    Spot,
    /// Next-day index change.
    Index,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Futures, MetricKind::Spot, MetricKind::Index];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Futures => "futures",
            MetricKind::Spot => "spot",
            MetricKind::Index => "index",
        }
    }

    /// The field whose sign is compared with `night_futures_foreign`.
    pub fn target(&self, record: &TradingDayRecord) -> f64 {
        match self {
            MetricKind::Futures => record.next_regular_futures_foreign,
            MetricKind::Spot => record.next_regular_spot_foreign,
            MetricKind::Index => record.index_change_pct,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
