use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized trading day, before the next-day join.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingDay {
    pub date: NaiveDate,
    /// KOSPI200 index level (points).
    pub index_level: f64,
    /// Foreign net position in the after-hours futures session (contracts).
    pub night_futures_foreign: f64,
    /// Foreign net position in the regular futures session (contracts).
    pub regular_futures_foreign: f64,
    /// Foreign net position in the regular spot session (currency units).
    pub regular_spot_foreign: f64,
}

/// A trading day joined with the following trading day's values.
///
/// Every record in a `TradingSeries` has a successor; the last normalized day
/// never becomes a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingDayRecord {
    pub date: NaiveDate,
    pub index_level: f64,
    pub night_futures_foreign: f64,
    pub regular_futures_foreign: f64,
    pub regular_spot_foreign: f64,
    pub next_index_level: f64,
    pub next_regular_futures_foreign: f64,
    pub next_regular_spot_foreign: f64,
    /// (next - current) / current * 100, rounded to 2 decimals.
    pub index_change_pct: f64,
}

impl TradingDayRecord {
    /// The base values of this record, without the next-day join.
    pub fn day(&self) -> TradingDay {
        TradingDay {
            date: self.date,
            index_level: self.index_level,
            night_futures_foreign: self.night_futures_foreign,
            regular_futures_foreign: self.regular_futures_foreign,
            regular_spot_foreign: self.regular_spot_foreign,
        }
    }
}
