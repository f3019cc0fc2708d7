//! NightFlow Core: ingestion, normalization and next-day metrics for foreign
//! investors' night-session futures flows.
//!
//! This crate contains:
//! - Domain types (trading days, joined records, the immutable series)
//! - The ingestion pipeline (encoding fallback, leading-row rules,
//!   normalization, next-day join)
//! - A content-hash memoization cache for normalized series
//! - Metrics over date slices (comparison rows, co-movement probability,
//!   correlation)
//! - Display helpers for renderers (sign → display class, cell text)

pub mod config;
pub mod data;
pub mod display;
pub mod domain;
pub mod metrics;

pub use config::{ConfigError, IngestConfig};
pub use data::{Ingestor, LoadError, SeriesCache, Source};
pub use domain::{DateRange, TradingDayRecord, TradingSeries};
pub use metrics::MetricKind;
