//! Structured error types for ingestion.
//!
//! Every variant is terminal for the request that raised it: the pipeline
//! never hands back a partial series.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate encoding produced delimited text, or the source is absent.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("schema error: expected at least {required} columns, found {found}")]
    Schema { found: usize, required: usize },

    /// Zero usable rows remained after the named pipeline stage.
    #[error("no data: no valid rows remain after {stage}")]
    NoData { stage: &'static str },

    #[error("computation error: {0}")]
    Computation(String),
}

impl LoadError {
    /// Short machine-readable kind, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Encoding(_) => "encoding",
            LoadError::Schema { .. } => "schema",
            LoadError::NoData { .. } => "no_data",
            LoadError::Computation(_) => "computation",
        }
    }
}
