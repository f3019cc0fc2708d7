//! Column assignment, date/number coercion, filtering and ordering.
//!
//! Turns the text rows left after leading-row detection into date-ascending
//! `TradingDay`s. Cells that fail to parse become nulls and the whole row is
//! dropped; nothing is imputed.

use super::error::LoadError;
use super::header::is_missing;
use crate::config::IngestConfig;
use crate::domain::{IngestReport, TradingDay};
use chrono::{NaiveDate, NaiveDateTime};

/// Minimum number of positional columns: date, index, night futures,
/// regular futures, regular spot.
pub const REQUIRED_COLUMNS: usize = 5;

/// Semantic names given to the first five columns, in order.
pub const COLUMN_NAMES: [&str; REQUIRED_COLUMNS] = [
    "date",
    "index_level",
    "night_futures_foreign",
    "regular_futures_foreign",
    "regular_spot_foreign",
];

/// A row after date parsing, with each numeric cell possibly null.
struct DatedRow {
    date: NaiveDate,
    values: [Option<f64>; 4],
}

/// Run column assignment through sorting on `rows`.
///
/// `columns` is the table width reported by the decoder.
pub fn normalize_rows(
    rows: &[Vec<String>],
    columns: usize,
    config: &IngestConfig,
    report: &mut IngestReport,
) -> Result<Vec<TradingDay>, LoadError> {
    if columns < REQUIRED_COLUMNS {
        return Err(LoadError::Schema {
            found: columns,
            required: REQUIRED_COLUMNS,
        });
    }

    // Row pruning: empty date cell.
    let with_date: Vec<&Vec<String>> = rows
        .iter()
        .filter(|row| !is_missing(cell(row, 0), &config.missing_tokens))
        .collect();
    report.dropped_empty_date = rows.len() - with_date.len();

    // Date parsing.
    let dated: Vec<(NaiveDate, &Vec<String>)> = with_date
        .iter()
        .filter_map(|row| parse_date(cell(row, 0), &config.date_formats).map(|d| (d, *row)))
        .collect();
    report.dropped_bad_date = with_date.len() - dated.len();
    tracing::debug!(
        empty_date = report.dropped_empty_date,
        bad_date = report.dropped_bad_date,
        "dates parsed"
    );
    if dated.is_empty() {
        return Err(LoadError::NoData {
            stage: "date parsing",
        });
    }

    // Numeric coercion.
    let coerced: Vec<DatedRow> = dated
        .into_iter()
        .map(|(date, row)| DatedRow {
            date,
            values: [1, 2, 3, 4].map(|i| parse_number(cell(row, i), config)),
        })
        .collect();

    // Completeness filter.
    let total = coerced.len();
    let mut days: Vec<TradingDay> = coerced
        .into_iter()
        .filter_map(|row| match row.values {
            [Some(index), Some(night), Some(futures), Some(spot)] => Some(TradingDay {
                date: row.date,
                index_level: index,
                night_futures_foreign: night,
                regular_futures_foreign: futures,
                regular_spot_foreign: spot,
            }),
            _ => None,
        })
        .collect();
    report.dropped_incomplete = total - days.len();
    tracing::debug!(incomplete = report.dropped_incomplete, "numeric columns coerced");
    if days.is_empty() {
        return Err(LoadError::NoData {
            stage: "numeric filtering",
        });
    }

    // Stable sort: ties keep their file order.
    days.sort_by_key(|d| d.date);

    if config.dedupe_dates {
        let before = days.len();
        days.dedup_by_key(|d| d.date);
        report.duplicate_dates = before - days.len();
        tracing::debug!(duplicates = report.duplicate_dates, "duplicate dates collapsed");
    }
    report.rows_complete = days.len();

    Ok(days)
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

/// Parse a date cell by trying each format in turn.
///
/// A trailing `.` (as in `2024.01.02.`) is ignored. Date-time formats keep
/// only the calendar date.
pub fn parse_date(cell: &str, formats: &[String]) -> Option<NaiveDate> {
    let cell = cell.trim();
    let cell = cell.strip_suffix('.').unwrap_or(cell).trim();
    if cell.is_empty() {
        return None;
    }
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(cell, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(cell, fmt).ok().map(|dt| dt.date()))
    })
}

/// Strip separator/quote characters and parse a finite number.
pub fn parse_number(cell: &str, config: &IngestConfig) -> Option<f64> {
    if is_missing(cell, &config.missing_tokens) {
        return None;
    }
    let cleaned: String = cell
        .chars()
        .filter(|c| !config.strip_chars.contains(c))
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn formats() -> Vec<String> {
        IngestConfig::default().date_formats
    }

    #[test]
    fn lenient_dates() {
        let f = formats();
        assert_eq!(parse_date("2024-01-02", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("2024/01/02", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("2024.01.02", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("2024.01.02.", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("20240102", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("01/02/2024", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date("2024년 01월 02일", &f), Some(d("2024-01-02")));
        assert_eq!(parse_date(" 2024-01-02 15:30:00 ", &f), Some(d("2024-01-02")));
    }

    #[test]
    fn unparseable_dates_are_none() {
        let f = formats();
        assert_eq!(parse_date("합계", &f), None);
        assert_eq!(parse_date("2024-13-45", &f), None);
        assert_eq!(parse_date("", &f), None);
    }

    #[test]
    fn numbers_lose_separators_and_quotes() {
        let config = IngestConfig::default();
        assert_eq!(parse_number("\"1,234\"", &config), Some(1234.0));
        assert_eq!(parse_number("-12,345.5", &config), Some(-12345.5));
        assert_eq!(parse_number("+50", &config), Some(50.0));
        assert_eq!(parse_number(" 7 ", &config), Some(7.0));
    }

    #[test]
    fn bad_numbers_are_none() {
        let config = IngestConfig::default();
        assert_eq!(parse_number("abc", &config), None);
        assert_eq!(parse_number("", &config), None);
        assert_eq!(parse_number("NaN", &config), None);
        assert_eq!(parse_number("inf", &config), None);
        assert_eq!(parse_number("-", &config), None);
    }

    #[test]
    fn fewer_than_five_columns_is_schema_error() {
        let rows = vec![row(&["2024-01-02", "1", "2", "3"])];
        let mut report = IngestReport::default();
        let err = normalize_rows(&rows, 4, &IngestConfig::default(), &mut report).unwrap_err();
        assert!(matches!(err, LoadError::Schema { found: 4, required: 5 }));
    }

    #[test]
    fn rows_with_any_bad_cell_are_dropped() {
        let rows = vec![
            row(&["2024-01-02", "100", "50", "30", "20"]),
            row(&["2024-01-03", "abc", "-40", "-10", "5"]),
            row(&["", "101", "1", "1", "1"]),
            row(&["not a date", "101", "1", "1", "1"]),
            row(&["2024-01-04", "99", "20", "", "-10"]),
        ];
        let mut report = IngestReport::default();
        let days = normalize_rows(&rows, 5, &IngestConfig::default(), &mut report).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, d("2024-01-02"));
        assert_eq!(report.dropped_empty_date, 1);
        assert_eq!(report.dropped_bad_date, 1);
        assert_eq!(report.dropped_incomplete, 2);
        assert_eq!(report.rows_complete, 1);
    }

    #[test]
    fn no_parseable_dates_is_no_data() {
        let rows = vec![row(&["x", "1", "1", "1", "1"])];
        let mut report = IngestReport::default();
        let err = normalize_rows(&rows, 5, &IngestConfig::default(), &mut report).unwrap_err();
        assert!(matches!(err, LoadError::NoData { stage: "date parsing" }));
    }

    #[test]
    fn no_complete_rows_is_no_data() {
        let rows = vec![row(&["2024-01-02", "x", "1", "1", "1"])];
        let mut report = IngestReport::default();
        let err = normalize_rows(&rows, 5, &IngestConfig::default(), &mut report).unwrap_err();
        assert!(matches!(err, LoadError::NoData { stage: "numeric filtering" }));
    }

    #[test]
    fn sorted_ascending_and_deduplicated_keeping_first() {
        let rows = vec![
            row(&["2024-01-04", "3", "1", "1", "1"]),
            row(&["2024-01-02", "1", "1", "1", "1"]),
            row(&["2024-01-04", "9", "1", "1", "1"]),
            row(&["2024-01-03", "2", "1", "1", "1"]),
        ];
        let mut report = IngestReport::default();
        let days = normalize_rows(&rows, 5, &IngestConfig::default(), &mut report).unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")]);
        assert_eq!(days[2].index_level, 3.0);
        assert_eq!(report.duplicate_dates, 1);
    }

    #[test]
    fn ties_keep_file_order_without_dedupe() {
        let config = IngestConfig {
            dedupe_dates: false,
            ..IngestConfig::default()
        };
        let rows = vec![
            row(&["2024-01-04", "3", "1", "1", "1"]),
            row(&["2024-01-02", "1", "1", "1", "1"]),
            row(&["2024-01-04", "9", "1", "1", "1"]),
        ];
        let mut report = IngestReport::default();
        let days = normalize_rows(&rows, 5, &config, &mut report).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1].index_level, 3.0);
        assert_eq!(days[2].index_level, 9.0);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = vec![row(&["2024-01-02", "1", "2", "3", "4", "memo"])];
        let mut report = IngestReport::default();
        let days = normalize_rows(&rows, 6, &IngestConfig::default(), &mut report).unwrap();
        assert_eq!(days[0].regular_spot_foreign, 4.0);
    }
}
