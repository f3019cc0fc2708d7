//! Data ingestion, normalization and caching

pub mod cache;
pub mod decode;
pub mod derive;
pub mod error;
pub mod header;
pub mod ingest;
pub mod normalize;
pub mod source;

pub use cache::{CacheKey, CacheMeta, CacheStats, SeriesCache};
pub use decode::{RawTable, TextEncoding};
pub use error::LoadError;
pub use header::{LeadingRowRule, RowMatcher};
pub use ingest::Ingestor;
pub use source::Source;
