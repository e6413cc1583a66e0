//! The metadata record produced by extraction.
//!
//! A [`Metadata`] value is a plain, immutable description of one file at
//! the moment it was extracted:
//!
//! | Field | Source |
//! |-------|--------|
//! | `file_name` | base name of the path |
//! | `width`, `height` | image header |
//! | `format` | name of the decoder that recognised the header |
//! | `checksum` | SHA-256 of the file's bytes, lowercase hex |
//! | `file_size` | byte length reported by the filesystem |
//!
//! ## Serialization
//!
//! Records serialize to JSON with the field names above, in that order. The
//! compact form is the canonical payload handed to an anchoring backend, so
//! re-extracting an unchanged file yields a byte-identical payload. The
//! artifact written next to a run may be pretty-printed; both forms parse
//! back to the same value.
//!
//! Parsing rejects unknown fields and records that could not have come from
//! an extraction (malformed checksum, empty name or format).

use crate::checksum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name of the metadata artifact.
pub const DEFAULT_ARTIFACT: &str = "metadata.json";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid metadata: {0}")]
    Invalid(String),
}

/// Fingerprint of a single image file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub checksum: String,
    pub file_size: u64,
}

impl Metadata {
    /// Check the invariants every extracted record satisfies.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.file_name.is_empty() {
            return Err(MetadataError::Invalid("file_name is empty".into()));
        }
        if self.format.is_empty() {
            return Err(MetadataError::Invalid("format is empty".into()));
        }
        if !checksum::is_checksum(&self.checksum) {
            return Err(MetadataError::Invalid(format!(
                "checksum must be {} lowercase hex characters, got {:?}",
                checksum::HEX_LEN,
                self.checksum
            )));
        }
        Ok(())
    }

    /// Compact JSON, the canonical anchoring payload.
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a record.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let metadata: Self = serde_json::from_str(json)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Write the record to `dir/name` and return the written path.
    pub fn write_artifact(
        &self,
        dir: &Path,
        name: &str,
        pretty: bool,
    ) -> Result<PathBuf, MetadataError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        let path = dir.join(name);
        std::fs::write(&path, json).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Read a record back from an artifact file.
pub fn read_artifact(path: &Path) -> Result<Metadata, MetadataError> {
    let json = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Metadata::from_json(&json)
}
