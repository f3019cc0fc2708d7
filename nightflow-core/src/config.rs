//! Ingestion configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) gives the stock
//! pipeline. Example:
//!
//! ```toml
//! encodings = ["cp949", "utf-8"]
//! dedupe_dates = false
//!
//! [[leading_rows]]
//! max_skips = 1
//! matcher = { kind = "first_cell_marker", exact = ["단위"], contains = ["단위"] }
//! ```

use crate::data::decode::TextEncoding;
use crate::data::header::LeadingRowRule;
use crate::domain::ConfigHash;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Candidate encodings, tried in order.
    pub encodings: Vec<TextEncoding>,
    /// Treat the first physical record as the column-header row.
    pub has_header_row: bool,
    /// Rules for dropping banner/spacer rows before the data starts.
    pub leading_rows: Vec<LeadingRowRule>,
    /// Cell values (after trimming) that mean "no value".
    pub missing_tokens: Vec<String>,
    /// `chrono` formats tried in order for the date column.
    pub date_formats: Vec<String>,
    /// Characters removed from numeric cells before parsing.
    pub strip_chars: Vec<char>,
    /// Collapse duplicate dates, keeping the first occurrence.
    pub dedupe_dates: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::default_candidates(),
            has_header_row: true,
            leading_rows: LeadingRowRule::defaults(),
            missing_tokens: ["nan", "NaN", "NA", "N/A", "null", "NULL", "None", "#N/A", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
            date_formats: [
                "%Y-%m-%d",
                "%Y/%m/%d",
                "%Y.%m.%d",
                "%Y%m%d",
                "%m/%d/%Y",
                "%d-%m-%Y",
                "%Y년 %m월 %d일",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y/%m/%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            strip_chars: vec![',', '"'],
            dedupe_dates: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl IngestConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: IngestConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encodings.is_empty() {
            return Err(ConfigError::Invalid("encodings must not be empty".into()));
        }
        if self.date_formats.is_empty() {
            return Err(ConfigError::Invalid("date_formats must not be empty".into()));
        }
        Ok(())
    }

    /// BLAKE3 over the canonical JSON form. Two configs that would ingest
    /// the same bytes differently never share a fingerprint.
    pub fn fingerprint(&self) -> ConfigHash {
        match serde_json::to_vec(self) {
            Ok(json) => ConfigHash::from_bytes(&json),
            // Only maps with non-string keys fail to serialize; the config has none.
            Err(_) => ConfigHash::from_bytes(format!("{self:?}").as_bytes()),
        }
    }
}
