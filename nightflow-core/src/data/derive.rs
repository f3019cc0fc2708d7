//! Next-day join: pair each trading day with its chronological successor.

use super::error::LoadError;
use crate::domain::{TradingDay, TradingDayRecord};

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `current` to `next`, rounded to 2 decimals.
///
/// A zero base level has no defined change and is reported as a
/// computation error rather than an infinite value.
pub fn change_pct(current: f64, next: f64) -> Result<f64, LoadError> {
    if current == 0.0 {
        return Err(LoadError::Computation(
            "index level is zero; percentage change is undefined".into(),
        ));
    }
    let pct = round2((next - current) / current * 100.0);
    if !pct.is_finite() {
        return Err(LoadError::Computation(format!(
            "percentage change from {current} to {next} is not finite"
        )));
    }
    Ok(pct)
}

/// Join every day with the following one and drop the last day.
///
/// `days` must be date-ascending. The output has `days.len() - 1` records
/// (zero for fewer than two days).
pub fn derive_next_day(days: &[TradingDay]) -> Result<Vec<TradingDayRecord>, LoadError> {
    days.windows(2)
        .map(|pair| {
            let (today, next) = (pair[0], pair[1]);
            let index_change_pct = change_pct(today.index_level, next.index_level).map_err(
                |e| match e {
                    LoadError::Computation(msg) => {
                        LoadError::Computation(format!("{}: {msg}", today.date))
                    }
                    other => other,
                },
            )?;
            Ok(TradingDayRecord {
                date: today.date,
                index_level: today.index_level,
                night_futures_foreign: today.night_futures_foreign,
                regular_futures_foreign: today.regular_futures_foreign,
                regular_spot_foreign: today.regular_spot_foreign,
                next_index_level: next.index_level,
                next_regular_futures_foreign: next.regular_futures_foreign,
                next_regular_spot_foreign: next.regular_spot_foreign,
                index_change_pct,
            })
        })
        .collect()
}
