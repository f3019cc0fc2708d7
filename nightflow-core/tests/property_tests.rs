//! Property tests for series invariants.
//!
//! Uses proptest to verify:
//! 1. Ordering: the series is strictly ascending with no duplicate dates
//! 2. Shift: every record's next-day fields equal its successor's values
//! 3. Change: level × (1 + change/100) reproduces the next level
//! 4. Length: records = surviving rows − 1
//! 5. Co-movement: undefined when empty, invariant to slice order

use chrono::NaiveDate;
use nightflow_core::data::derive::derive_next_day;
use nightflow_core::data::Ingestor;
use nightflow_core::domain::{TradingDay, TradingDayRecord};
use nightflow_core::metrics::{co_movement_probability, MetricKind};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_level() -> impl Strategy<Value = f64> {
    (50.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_flow() -> impl Strategy<Value = f64> {
    (-5000i32..5000).prop_map(f64::from)
}

/// (day offset, index, night, futures, spot). Offsets may repeat and come in
/// any order, like a hand-edited export.
fn arb_row() -> impl Strategy<Value = (u16, f64, f64, f64, f64)> {
    (0u16..60, arb_level(), arb_flow(), arb_flow(), arb_flow())
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn to_csv(rows: &[(u16, f64, f64, f64, f64)]) -> String {
    let mut csv = String::from("date,index,night,futures,spot\n");
    for (offset, index, night, futures, spot) in rows {
        let date = base_date() + chrono::Duration::days(i64::from(*offset));
        csv.push_str(&format!("{date},{index:.2},{night},{futures},{spot}\n"));
    }
    csv
}

fn arb_record() -> impl Strategy<Value = TradingDayRecord> {
    (0u16..365, arb_level(), arb_flow(), arb_flow(), arb_flow(), -5.0..5.0_f64).prop_map(
        |(offset, level, night, futures, spot, change)| TradingDayRecord {
            date: base_date() + chrono::Duration::days(i64::from(offset)),
            index_level: level,
            night_futures_foreign: night,
            regular_futures_foreign: 0.0,
            regular_spot_foreign: 0.0,
            next_index_level: level,
            next_regular_futures_foreign: futures,
            next_regular_spot_foreign: spot,
            index_change_pct: (change * 100.0).round() / 100.0,
        },
    )
}

// ── 1. Ordering ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn series_is_strictly_ascending(rows in prop::collection::vec(arb_row(), 1..40)) {
        let series = Ingestor::default()
            .load_bytes("prop", to_csv(&rows).as_bytes())
            .unwrap();
        for pair in series.records().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }
}

// ── 2. Shift ─────────────────────────────────────────────────────────

proptest! {
    /// Next-day fields come from the chronological successor, and the first
    /// row in file order wins for duplicated dates.
    #[test]
    fn next_day_fields_match_successor(rows in prop::collection::vec(arb_row(), 2..40)) {
        let series = Ingestor::default()
            .load_bytes("prop", to_csv(&rows).as_bytes())
            .unwrap();

        let mut expected: BTreeMap<u16, (f64, f64, f64, f64)> = BTreeMap::new();
        for (offset, index, night, futures, spot) in &rows {
            expected.entry(*offset).or_insert((*index, *night, *futures, *spot));
        }
        let days: Vec<_> = expected.values().copied().collect();

        prop_assert_eq!(series.len(), days.len() - 1);
        for (record, (today, next)) in series.records().iter().zip(days.iter().zip(days.iter().skip(1))) {
            prop_assert_eq!(record.index_level, today.0);
            prop_assert_eq!(record.night_futures_foreign, today.1);
            prop_assert_eq!(record.next_index_level, next.0);
            prop_assert_eq!(record.next_regular_futures_foreign, next.2);
            prop_assert_eq!(record.next_regular_spot_foreign, next.3);
        }
    }
}

// ── 3. Change percentage ─────────────────────────────────────────────

proptest! {
    #[test]
    fn change_reproduces_next_level(levels in prop::collection::vec(arb_level(), 2..30)) {
        let days: Vec<TradingDay> = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| TradingDay {
                date: base_date() + chrono::Duration::days(i as i64),
                index_level: level,
                night_futures_foreign: 1.0,
                regular_futures_foreign: 1.0,
                regular_spot_foreign: 1.0,
            })
            .collect();
        let records = derive_next_day(&days).unwrap();

        for r in &records {
            let implied = r.index_level * (1.0 + r.index_change_pct / 100.0);
            // Change is rounded to 0.01%, so allow half of that on the level.
            let tolerance = r.index_level * 0.000_050_1 + 1e-9;
            prop_assert!(
                (implied - r.next_index_level).abs() <= tolerance,
                "implied {} vs next {}", implied, r.next_index_level
            );
            prop_assert_eq!(r.day().date, r.date);
        }
    }
}

// ── 4. Length ────────────────────────────────────────────────────────

proptest! {
    /// Rows with a bad index value are dropped; the rest lose exactly one
    /// record to the shift.
    #[test]
    fn length_is_survivors_minus_one(
        rows in prop::collection::vec(arb_row(), 1..40),
        broken in prop::collection::vec(any::<bool>(), 40),
    ) {
        let mut csv = String::from("date,index,night,futures,spot\n");
        let mut survivors = std::collections::BTreeSet::new();
        for (i, (offset, index, night, futures, spot)) in rows.iter().enumerate() {
            let date = base_date() + chrono::Duration::days(i64::from(*offset));
            if broken[i] {
                csv.push_str(&format!("{date},abc,{night},{futures},{spot}\n"));
            } else {
                survivors.insert(*offset);
                csv.push_str(&format!("{date},{index:.2},{night},{futures},{spot}\n"));
            }
        }

        let result = Ingestor::default().load_bytes("prop", csv.as_bytes());
        if survivors.is_empty() {
            prop_assert!(result.is_err());
        } else {
            let series = result.unwrap();
            prop_assert_eq!(series.len(), survivors.len() - 1);
            prop_assert_eq!(series.report().rows_complete, survivors.len());
        }
    }
}

// ── 5. Co-movement ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn co_movement_ignores_slice_order(
        mut records in prop::collection::vec(arb_record(), 0..50),
        seed in any::<u64>(),
    ) {
        for kind in MetricKind::ALL {
            let before = co_movement_probability(&records, kind);
            prop_assert_eq!(before.is_none(), records.is_empty());

            // Deterministic shuffle driven by the seed.
            let mut state = seed | 1;
            for i in (1..records.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                records.swap(i, (state % (i as u64 + 1)) as usize);
            }

            let after = co_movement_probability(&records, kind);
            prop_assert_eq!(before, after);
            if let Some(c) = after {
                prop_assert!(c.agreeing <= c.total);
                prop_assert!((0.0..=100.0).contains(&c.probability_pct));
            }
        }
    }
}
