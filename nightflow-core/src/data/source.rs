//! Where raw input bytes come from.

use super::error::LoadError;
use std::fmt;
use std::path::PathBuf;

/// An input file on disk, or bytes already in memory (uploads, fixtures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Memory { label: String, bytes: Vec<u8> },
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    pub fn memory(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Source::Memory {
            label: label.into(),
            bytes: bytes.into(),
        }
    }

    /// Human-readable name: the file path or the memory label.
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Memory { label, .. } => label.clone(),
        }
    }

    /// Read the raw, undecoded bytes.
    ///
    /// A missing or unreadable file counts as an encoding failure: nothing
    /// could be decoded from it.
    pub fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::File(path) => std::fs::read(path).map_err(|e| {
                LoadError::Encoding(format!("source '{}' is unavailable: {e}", path.display()))
            }),
            Source::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
