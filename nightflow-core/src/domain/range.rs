use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive date bounds. A range whose start is after its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// The part of this range that lies within `bounds`.
    ///
    /// `None` when the two do not overlap, or either is empty. A range that
    /// misses the bounds entirely is never pulled onto a boundary day.
    pub fn clamp_to(&self, bounds: DateRange) -> Option<DateRange> {
        let clamped = DateRange {
            start: self.start.max(bounds.start),
            end: self.end.min(bounds.end),
        };
        (!self.is_empty() && !bounds.is_empty() && !clamped.is_empty()).then_some(clamped)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}
