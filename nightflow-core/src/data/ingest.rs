//! The ingestion pipeline: decode → leading rows → normalize → next-day join.

use super::decode::decode_table;
use super::derive::derive_next_day;
use super::error::LoadError;
use super::header::skip_leading_rows;
use super::normalize::normalize_rows;
use super::source::Source;
use crate::config::IngestConfig;
use crate::domain::{IngestReport, SourceHash, TradingSeries};

/// Runs the full pipeline for one source under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Read and process `source`.
    pub fn load(&self, source: &Source) -> Result<TradingSeries, LoadError> {
        let bytes = source.read_bytes()?;
        self.load_bytes(&source.label(), &bytes)
    }

    /// Process raw bytes already in memory.
    ///
    /// Deterministic: the same bytes and configuration always produce the same
    /// series.
    pub fn load_bytes(&self, label: &str, bytes: &[u8]) -> Result<TradingSeries, LoadError> {
        let source_hash = SourceHash::from_bytes(bytes);
        let mut report = IngestReport::default();

        let table = decode_table(bytes, &self.config.encodings, self.config.has_header_row)?;
        report.encoding = table.encoding.label().to_string();
        report.columns = table.columns;
        tracing::info!(source = label, encoding = table.encoding.label(), "decoded");

        let (rows, skipped) = skip_leading_rows(
            &table.rows,
            &self.config.leading_rows,
            &self.config.missing_tokens,
        );
        report.leading_rows_skipped = skipped;
        report.rows_read = rows.len();

        let days = normalize_rows(rows, table.columns, &self.config, &mut report)?;

        let dropped = report.rows_dropped();
        if dropped > 0 {
            tracing::warn!(
                source = label,
                empty_date = report.dropped_empty_date,
                bad_date = report.dropped_bad_date,
                incomplete = report.dropped_incomplete,
                duplicate_dates = report.duplicate_dates,
                "dropped {dropped} rows during normalization"
            );
        }

        let records = derive_next_day(&days)?;
        report.records = records.len();
        if records.is_empty() {
            tracing::warn!(source = label, "only one trading day; no next-day records");
        }
        tracing::info!(
            source = label,
            hash = source_hash.short(),
            records = records.len(),
            "series ready"
        );

        Ok(TradingSeries::from_records(source_hash, label, records, report))
    }
}
