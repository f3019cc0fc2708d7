//! Assembles everything a rendered report shows for one date range.

use chrono::NaiveDate;
use nightflow_core::domain::{DateRange, TradingSeries};
use nightflow_core::metrics::{
    co_movement_probability, comparison_rows, correlation, CoMovement, ComparisonRow,
    CorrelationSummary, MetricKind,
};
use serde::Serialize;

/// One comparison table with its probability statement.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub kind: MetricKind,
    /// Rows in the slice before `--limit` is applied.
    pub total_rows: usize,
    pub rows: Vec<ComparisonRow>,
    pub co_movement: Option<CoMovement>,
    pub correlation: Option<CorrelationSummary>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self.kind {
            MetricKind::Futures => "Night futures vs next-day regular futures (foreign)",
            MetricKind::Spot => "Night futures vs next-day regular spot (foreign)",
            MetricKind::Index => "Night futures vs next-day index",
        }
    }

    pub fn paired_header(&self) -> &'static str {
        match self.kind {
            MetricKind::Futures => "Next-day futures",
            MetricKind::Spot => "Next-day spot",
            MetricKind::Index => "Next-day index",
        }
    }

    /// Rows hidden by the row limit.
    pub fn truncated(&self) -> usize {
        self.total_rows - self.rows.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub source_hash: String,
    /// `None` when the series has no records to slice.
    pub range: Option<DateRange>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn build(series: &TradingSeries, range: Option<DateRange>, limit: Option<usize>) -> Self {
        let slice = range.map(|r| series.slice(r)).unwrap_or_default();
        let sections = MetricKind::ALL
            .iter()
            .map(|&kind| {
                let mut rows = comparison_rows(slice, kind);
                let total_rows = rows.len();
                if let Some(n) = limit {
                    rows.truncate(n);
                }
                Section {
                    kind,
                    total_rows,
                    rows,
                    co_movement: co_movement_probability(slice, kind),
                    correlation: correlation(slice, kind),
                }
            })
            .collect();

        Report {
            source: series.source_label().to_string(),
            source_hash: series.source_hash().to_string(),
            range,
            sections,
        }
    }
}

/// Requested bounds, with a missing start or end taken from the series' own
/// range.
///
/// A request that overlaps the series is trimmed to it. One that misses the
/// series entirely is returned as asked and slices to nothing. Returns `None`
/// for an empty series.
pub fn resolve_range(
    bounds: Option<DateRange>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<DateRange> {
    let bounds = bounds?;
    let requested = DateRange::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end));
    Some(requested.clamp_to(bounds).unwrap_or(requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightflow_core::data::Ingestor;

    const CSV: &str = "\
date,k200,night,futures,spot
2024-01-02,100.00,50,30,20
2024-01-03,101.00,-40,-10,5
2024-01-04,99.00,20,15,-10
2024-01-05,100.00,10,5,5
";

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series() -> TradingSeries {
        Ingestor::default().load_bytes("report.csv", CSV.as_bytes()).unwrap()
    }

    #[test]
    fn range_defaults_to_series_bounds() {
        let s = series();
        let r = resolve_range(s.full_range(), None, None).unwrap();
        assert_eq!(r, DateRange::new(d("2024-01-02"), d("2024-01-04")));
    }

    #[test]
    fn requested_range_is_clamped() {
        let s = series();
        let r = resolve_range(s.full_range(), Some(d("2023-06-01")), Some(d("2024-01-03"))).unwrap();
        assert_eq!(r, DateRange::new(d("2024-01-02"), d("2024-01-03")));
        assert!(resolve_range(None, Some(d("2024-01-01")), None).is_none());
    }

    #[test]
    fn range_outside_series_stays_outside() {
        let s = series();
        let r = resolve_range(s.full_range(), Some(d("2025-05-01")), Some(d("2025-06-01"))).unwrap();
        assert_eq!(r, DateRange::new(d("2025-05-01"), d("2025-06-01")));

        let report = Report::build(&s, Some(r), None);
        for section in &report.sections {
            assert!(section.rows.is_empty());
            assert_eq!(section.total_rows, 0);
            assert!(section.co_movement.is_none());
            assert!(section.correlation.is_none());
        }

        // Only an end before the series starts.
        let early = resolve_range(s.full_range(), None, Some(d("2023-12-31"))).unwrap();
        assert!(early.is_empty());
        assert!(s.slice(early).is_empty());
    }

    #[test]
    fn report_has_three_sections_newest_first() {
        let s = series();
        let report = Report::build(&s, s.full_range(), None);

        assert_eq!(report.sections.len(), 3);
        let futures = &report.sections[0];
        assert_eq!(futures.kind, MetricKind::Futures);
        assert_eq!(futures.rows.len(), 3);
        assert_eq!(futures.rows[0].date, d("2024-01-04"));
        // 01-02: +50/-10 no, 01-03: -40/+15 no, 01-04: +20/+5 yes
        let c = futures.co_movement.unwrap();
        assert_eq!((c.agreeing, c.total), (1, 3));
    }

    #[test]
    fn limit_truncates_rows_but_not_metrics() {
        let s = series();
        let report = Report::build(&s, s.full_range(), Some(1));
        let spot = &report.sections[1];
        assert_eq!(spot.rows.len(), 1);
        assert_eq!(spot.total_rows, 3);
        assert_eq!(spot.truncated(), 2);
        assert_eq!(spot.co_movement.unwrap().total, 3);
    }

    #[test]
    fn missing_range_gives_undefined_metrics() {
        let s = series();
        let report = Report::build(&s, None, None);
        for section in &report.sections {
            assert!(section.rows.is_empty());
            assert!(section.co_movement.is_none());
            assert!(section.correlation.is_none());
        }
    }
}
