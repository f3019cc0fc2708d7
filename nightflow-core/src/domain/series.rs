//! The normalized, immutable trading series and its date slicing.

use super::{DateRange, IngestReport, SourceHash, TradingDayRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-ascending sequence of joined trading-day records.
///
/// Built once per distinct source content and never mutated afterwards;
/// date-range views borrow contiguous sub-slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSeries {
    source_hash: SourceHash,
    source_label: String,
    records: Vec<TradingDayRecord>,
    report: IngestReport,
}

impl TradingSeries {
    /// Wrap already-ordered records.
    ///
    /// Callers outside the ingest pipeline (fixtures, benches) must pass
    /// records sorted by date.
    pub fn from_records(
        source_hash: SourceHash,
        source_label: impl Into<String>,
        records: Vec<TradingDayRecord>,
        report: IngestReport,
    ) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
        Self {
            source_hash,
            source_label: source_label.into(),
            records,
            report,
        }
    }

    pub fn source_hash(&self) -> &SourceHash {
        &self.source_hash
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn records(&self) -> &[TradingDayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// `[first_date, last_date]`, or `None` for an empty series.
    pub fn full_range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.first_date()?, self.last_date()?))
    }

    /// Records whose date falls inside `range` (inclusive), in ascending order.
    pub fn slice(&self, range: DateRange) -> &[TradingDayRecord] {
        if range.is_empty() {
            return &[];
        }
        let lo = self.records.partition_point(|r| r.date < range.start);
        let hi = self.records.partition_point(|r| r.date <= range.end);
        &self.records[lo..hi.max(lo)]
    }
}
