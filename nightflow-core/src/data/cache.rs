//! In-memory memoization of normalized series, keyed by source content and
//! ingestion settings.
//!
//! The cache is an explicit table owned by the caller, not process-wide
//! state. Entries are immutable `Arc<TradingSeries>`; re-slicing a cached
//! series never touches the table.
//!
//! The key pairs the BLAKE3 hash of the raw bytes with the fingerprint of the
//! `IngestConfig` that built the series. The same file content reached
//! through a different path or upload name is a hit; the same content under
//! different settings is a separate entry.

use super::error::LoadError;
use super::ingest::Ingestor;
use super::source::Source;
use crate::domain::{ConfigHash, SourceHash, TradingSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity of one cached series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub source_hash: SourceHash,
    pub config_hash: ConfigHash,
}

impl CacheKey {
    pub fn new(source_hash: SourceHash, config_hash: ConfigHash) -> Self {
        Self {
            source_hash,
            config_hash,
        }
    }
}

/// Summary of one cached series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub source_hash: SourceHash,
    pub config_hash: ConfigHash,
    pub source_label: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub record_count: usize,
    pub cached_at: chrono::NaiveDateTime,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

struct CacheEntry {
    series: Arc<TradingSeries>,
    meta: CacheMeta,
}

/// (content hash, config hash) → normalized series.
#[derive(Default)]
pub struct SeriesCache {
    entries: HashMap<CacheKey, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached series for `source`'s content as `ingestor` would
    /// build it, running the pipeline on a miss.
    ///
    /// Failed loads are not cached; the next request re-runs the pipeline.
    pub fn get_or_load(
        &mut self,
        source: &Source,
        ingestor: &Ingestor,
    ) -> Result<Arc<TradingSeries>, LoadError> {
        let bytes = source.read_bytes()?;
        let key = CacheKey::new(
            SourceHash::from_bytes(&bytes),
            ingestor.config().fingerprint(),
        );

        if let Some(entry) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!(
                hash = key.source_hash.short(),
                config = key.config_hash.short(),
                "series cache hit"
            );
            return Ok(Arc::clone(&entry.series));
        }

        self.misses += 1;
        tracing::debug!(
            hash = key.source_hash.short(),
            config = key.config_hash.short(),
            "series cache miss"
        );
        let series = ingestor.load_bytes(&source.label(), &bytes)?;
        Ok(self.insert(key.config_hash, series))
    }

    /// Store an already-built series under its own source hash and the given
    /// config hash.
    ///
    /// Lets callers seed the table with fixtures without any I/O. Replaces an
    /// existing entry with the same key.
    pub fn insert(
        &mut self,
        config_hash: ConfigHash,
        series: TradingSeries,
    ) -> Arc<TradingSeries> {
        let meta = CacheMeta {
            source_hash: series.source_hash().clone(),
            config_hash,
            source_label: series.source_label().to_string(),
            first_date: series.first_date(),
            last_date: series.last_date(),
            record_count: series.len(),
            cached_at: chrono::Local::now().naive_local(),
        };
        let key = CacheKey::new(meta.source_hash.clone(), meta.config_hash.clone());
        let series = Arc::new(series);
        self.entries.insert(
            key,
            CacheEntry {
                series: Arc::clone(&series),
                meta,
            },
        );
        series
    }

    /// Look up a series without loading anything.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<TradingSeries>> {
        self.entries.get(key).map(|e| Arc::clone(&e.series))
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get_meta(&self, key: &CacheKey) -> Option<&CacheMeta> {
        self.entries.get(key).map(|e| &e.meta)
    }

    /// Metadata for every entry, oldest first.
    pub fn status(&self) -> Vec<CacheMeta> {
        let mut metas: Vec<CacheMeta> = self.entries.values().map(|e| e.meta.clone()).collect();
        metas.sort_by(|a, b| {
            a.cached_at
                .cmp(&b.cached_at)
                .then_with(|| a.source_hash.0.cmp(&b.source_hash.0))
                .then_with(|| a.config_hash.0.cmp(&b.config_hash.0))
        });
        metas
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
