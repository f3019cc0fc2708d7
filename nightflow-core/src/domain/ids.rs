use serde::{Deserialize, Serialize};
use std::fmt;

/// Content hash of a raw input file (BLAKE3 over the undecoded bytes).
///
/// Two sources with identical bytes share a hash regardless of where they
/// came from, which is what the series cache keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceHash(pub String);

impl SourceHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }

    /// First 12 hex characters, for log lines and table headers.
    pub fn short(&self) -> &str {
        short_prefix(&self.0)
    }
}

impl fmt::Display for SourceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of the ingestion settings a series was built with (BLAKE3 over the
/// serialized config).
///
/// The same bytes ingested under two configs can produce different series,
/// so the cache keys on this alongside the [`SourceHash`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }

    pub fn short(&self) -> &str {
        short_prefix(&self.0)
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Up to 12 characters. Hashes built with `from_hash` need not be hex, so
/// the cut lands on a char boundary.
pub fn short_prefix(hash: &str) -> &str {
    match hash.char_indices().nth(12) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}
