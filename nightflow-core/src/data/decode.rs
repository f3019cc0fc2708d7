//! Encoding fallback and delimited-text parsing.
//!
//! Candidate encodings are tried in order; the first one that decodes the
//! bytes without malformed sequences and parses as CSV wins.

use super::error::LoadError;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A text encoding the decoder may try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "cp949")]
    Cp949,
    #[serde(rename = "euc-kr")]
    EucKr,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TextEncoding {
    /// Default candidate order.
    pub fn default_candidates() -> Vec<TextEncoding> {
        vec![
            TextEncoding::Utf8,
            TextEncoding::Cp949,
            TextEncoding::EucKr,
            TextEncoding::Latin1,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Cp949 => "cp949",
            TextEncoding::EucKr => "euc-kr",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// The `encoding_rs` decoder backing this label.
    ///
    /// WHATWG EUC-KR is the Windows-949 superset, so cp949 and euc-kr share it.
    fn encoding(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Cp949 | TextEncoding::EucKr => encoding_rs::EUC_KR,
            TextEncoding::Latin1 => encoding_rs::WINDOWS_1252,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delimited text before any semantic interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub encoding: TextEncoding,
    /// Header cells, when the first record was consumed as a header row.
    pub header: Option<Vec<String>>,
    /// Column count of the table. Every row has exactly this many cells.
    pub columns: usize,
    pub rows: Vec<Vec<String>>,
}

/// Decode `bytes` with the first working candidate and split into rows.
pub fn decode_table(
    bytes: &[u8],
    candidates: &[TextEncoding],
    has_header_row: bool,
) -> Result<RawTable, LoadError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Encoding("source is empty".into()));
    }

    let mut failures = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        let (text, had_errors) = candidate.encoding().decode_with_bom_removal(bytes);
        if had_errors {
            tracing::debug!(encoding = candidate.label(), "malformed byte sequence");
            failures.push(format!("{candidate}: malformed input"));
            continue;
        }

        match parse_records(&text) {
            Ok(records) if records.is_empty() => {
                failures.push(format!("{candidate}: no records"));
            }
            Ok(records) => {
                tracing::debug!(
                    encoding = candidate.label(),
                    records = records.len(),
                    "decoded source"
                );
                return Ok(into_table(candidate, records, has_header_row));
            }
            Err(e) => {
                tracing::debug!(encoding = candidate.label(), error = %e, "csv parse failed");
                failures.push(format!("{candidate}: {e}"));
            }
        }
    }

    if failures.is_empty() {
        return Err(LoadError::Encoding("no candidate encodings configured".into()));
    }
    Err(LoadError::Encoding(format!(
        "no candidate encoding could read the source ({})",
        failures.join("; ")
    )))
}

fn parse_records(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Records inspected to infer the column count of a header-less file.
const WIDTH_PROBE_ROWS: usize = 10;

fn into_table(
    encoding: TextEncoding,
    mut records: Vec<Vec<String>>,
    has_header_row: bool,
) -> RawTable {
    let header = if has_header_row {
        Some(records.remove(0))
    } else {
        None
    };

    let columns = match &header {
        Some(h) => h.len(),
        None => records
            .iter()
            .take(WIDTH_PROBE_ROWS)
            .map(Vec::len)
            .max()
            .unwrap_or(0),
    };

    for row in &mut records {
        row.resize(columns, String::new());
    }

    RawTable {
        encoding,
        header,
        columns,
        rows: records,
    }
}
