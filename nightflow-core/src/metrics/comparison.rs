//! Per-day comparison rows: the night signal next to its next-day outcome.

use super::MetricKind;
use crate::domain::TradingDayRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The next-day side of a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PairedValue {
    /// Next-day regular-session foreign flow (futures contracts or spot amount).
    Flow { value: f64 },
    /// Next-day index level together with its signed change.
    Index { level: f64, change_pct: f64 },
}

impl PairedValue {
    /// The number whose sign drives display styling.
    pub fn signed_value(&self) -> f64 {
        match self {
            PairedValue::Flow { value } => *value,
            PairedValue::Index { change_pct, .. } => *change_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub night_futures_foreign: f64,
    pub paired: PairedValue,
}

/// One row per record, most recent date first.
///
/// This descending order is for display only; the series itself stays
/// ascending.
pub fn comparison_rows(slice: &[TradingDayRecord], kind: MetricKind) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = slice
        .iter()
        .map(|r| ComparisonRow {
            date: r.date,
            night_futures_foreign: r.night_futures_foreign,
            paired: match kind {
                MetricKind::Futures => PairedValue::Flow {
                    value: r.next_regular_futures_foreign,
                },
                MetricKind::Spot => PairedValue::Flow {
                    value: r.next_regular_spot_foreign,
                },
                MetricKind::Index => PairedValue::Index {
                    level: r.next_index_level,
                    change_pct: r.index_change_pct,
                },
            },
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}
