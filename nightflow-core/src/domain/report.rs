use serde::{Deserialize, Serialize};

/// What each ingestion step did to the input.
///
/// Counts are rows, not cells. `rows_complete` is counted after duplicate
/// dates are removed, so `records` (the length of the final series) is always
/// `rows_complete - 1` for a non-empty load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Label of the encoding that decoded the source.
    pub encoding: String,
    /// Data rows read after the header row.
    pub rows_read: usize,
    /// Leading label/blank rows removed before column assignment.
    pub leading_rows_skipped: usize,
    /// Columns found in the source (at least 5 for a successful load).
    pub columns: usize,
    pub dropped_empty_date: usize,
    pub dropped_bad_date: usize,
    pub dropped_incomplete: usize,
    pub duplicate_dates: usize,
    /// Rows that survived every filter, before the last-day trim.
    pub rows_complete: usize,
    pub records: usize,
}

impl IngestReport {
    /// Total rows discarded by pruning and filtering (excludes the last-day trim).
    pub fn rows_dropped(&self) -> usize {
        self.dropped_empty_date
            + self.dropped_bad_date
            + self.dropped_incomplete
            + self.duplicate_dates
    }
}
