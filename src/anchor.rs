//! Anchoring backends.
//!
//! An anchoring backend durably records a payload on behalf of a submitter
//! and can list what it holds. The extractor never talks to one directly:
//! callers serialize a [`Metadata`] record and hand the string to
//! [`AnchorBackend::submit`]. Payloads are opaque to the backend and the
//! backend's receipts are opaque to the core.
//!
//! ## Backends
//!
//! - [`LedgerFile`]: an append-only JSON Lines file, one [`AnchorRecord`]
//!   per line. The record index is its zero-based line number. This is
//!   the backend the CLI uses.
//!
//! Key management, signing and network broadcast belong to whatever
//! concrete ledger sits behind this trait and are not modelled here.

use crate::checksum;
use crate::metadata::{Metadata, MetadataError};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnchorError {
    #[error("IO error on ledger {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Corrupt ledger {path} at line {line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot encode ledger record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Submission rejected: {0}")]
    Rejected(String),
    #[error("Cannot serialize payload: {0}")]
    Payload(#[from] MetadataError),
}

/// A payload as stored by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub index: u64,
    pub creator: String,
    pub payload: String,
}

/// Acknowledgement of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub index: u64,
    pub creator: String,
    /// SHA-256 of the submitted payload, lowercase hex.
    pub payload_digest: String,
}

/// Trait for record-anchoring backends.
pub trait AnchorBackend {
    /// Record `payload` on behalf of `identity`.
    fn submit(&self, identity: &str, payload: &str) -> Result<Receipt, AnchorError>;

    /// Every record held by the backend, oldest first.
    fn list_records(&self) -> Result<Vec<AnchorRecord>, AnchorError>;
}

/// Serialize `metadata` compactly and submit it.
pub fn anchor_metadata(
    backend: &impl AnchorBackend,
    identity: &str,
    metadata: &Metadata,
) -> Result<Receipt, AnchorError> {
    let payload = metadata.to_json()?;
    let receipt = backend.submit(identity, &payload)?;
    log::info!(
        "anchored {} as record {} for {}",
        metadata.file_name,
        receipt.index,
        receipt.creator
    );
    Ok(receipt)
}

fn check_submission(identity: &str, payload: &str) -> Result<(), AnchorError> {
    if identity.trim().is_empty() {
        return Err(AnchorError::Rejected("identity is empty".into()));
    }
    if payload.is_empty() {
        return Err(AnchorError::Rejected("payload is empty".into()));
    }
    Ok(())
}

/// Append-only JSON Lines ledger on the local filesystem.
///
/// Submissions through one `LedgerFile` (and its clones) are serialized, so
/// threads sharing it get distinct indices. The file itself is not locked:
/// only one process may write a given ledger at a time.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
    append: Arc<Mutex<()>>,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> AnchorError {
        AnchorError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AnchorBackend for LedgerFile {
    fn submit(&self, identity: &str, payload: &str) -> Result<Receipt, AnchorError> {
        check_submission(identity, payload)?;

        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.append.lock().unwrap_or_else(|e| e.into_inner());
        let index = self.list_records()?.len() as u64;
        let record = AnchorRecord {
            index,
            creator: identity.to_string(),
            payload: payload.to_string(),
        };
        let line = serde_json::to_string(&record).map_err(AnchorError::Encode)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{line}").map_err(|e| self.io_error(e))?;

        log::debug!("ledger {}: appended record {index}", self.path.display());
        Ok(Receipt {
            index,
            creator: record.creator,
            payload_digest: checksum::checksum_bytes(payload.as_bytes()),
        })
    }

    fn list_records(&self) -> Result<Vec<AnchorRecord>, AnchorError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| AnchorError::Corrupt {
                path: self.path.clone(),
                line: i + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
