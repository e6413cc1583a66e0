//! Metadata extraction.
//!
//! [`MetadataExtractor::extract`] turns a path into a [`Metadata`] record:
//!
//! 1. Open the file and stat it through the open handle (name, size).
//! 2. Read the first [`SNIFF_LEN`] bytes and pick a decoder from the
//!    registry by signature.
//! 3. Rewind and let the decoder read the header for width and height.
//! 4. Hash the file's full content via [`checksum::checksum_file`].
//!
//! Extraction is all-or-nothing: any failure returns an [`ExtractError`]
//! naming the path and cause, never a partially filled record. File handles
//! are scoped to the step that uses them and are closed on every exit path.
//!
//! The extractor holds no per-call state, so one instance can serve many
//! threads at once (see [`crate::batch`]). Extracting a file while another
//! process rewrites it is not synchronised; the record may then mix the
//! two versions.

use crate::checksum::{self, ChecksumError};
use crate::imaging::{DecoderRegistry, SNIFF_LEN};
use crate::metadata::Metadata;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unsupported format for {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },
    #[error("Checksum failed for {path}: {source}")]
    Checksum {
        path: PathBuf,
        #[source]
        source: ChecksumError,
    },
}

impl ExtractError {
    /// The path the failed extraction was given.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path)
            | Self::FileAccess { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::Checksum { path, .. } => path,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    fn access(path: &Path, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }

    fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Builds [`Metadata`] records using an explicit decoder registry.
#[derive(Debug, Default)]
pub struct MetadataExtractor {
    registry: DecoderRegistry,
}

impl MetadataExtractor {
    pub fn new(registry: DecoderRegistry) -> Self {
        Self { registry }
    }

    /// Extractor with the built-in decoders.
    pub fn with_defaults() -> Self {
        Self::new(DecoderRegistry::with_defaults())
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Extract the metadata record for the file at `path`.
    pub fn extract(&self, path: &Path) -> Result<Metadata, ExtractError> {
        let (file_name, file_size, format, width, height) = {
            let file = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
                _ => ExtractError::access(path, e),
            })?;
            let attrs = file.metadata().map_err(|e| ExtractError::access(path, e))?;
            if !attrs.is_file() {
                return Err(ExtractError::access(
                    path,
                    io::Error::other("not a regular file"),
                ));
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ExtractError::access(path, io::Error::other("path has no file name"))
                })?;

            let mut reader = BufReader::new(file);
            let mut prefix = Vec::with_capacity(SNIFF_LEN);
            reader
                .by_ref()
                .take(SNIFF_LEN as u64)
                .read_to_end(&mut prefix)
                .map_err(|e| ExtractError::access(path, e))?;

            let decoder = self.registry.detect(&prefix).ok_or_else(|| {
                ExtractError::unsupported(path, "no registered decoder recognises the header")
            })?;

            reader.rewind().map_err(|e| ExtractError::access(path, e))?;
            let dims = decoder
                .decode_header(&mut reader)
                .map_err(|e| ExtractError::unsupported(path, e.to_string()))?;

            (
                file_name,
                attrs.len(),
                decoder.format_name().to_string(),
                dims.width,
                dims.height,
            )
        };

        let checksum = checksum::checksum_file(path).map_err(|source| ExtractError::Checksum {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!(
            "extracted {} ({format} {width}x{height}, {file_size} bytes, sha256 {checksum})",
            path.display()
        );

        Ok(Metadata {
            file_name,
            width,
            height,
            format,
            checksum,
            file_size,
        })
    }
}

/// Extract with the built-in decoders.
pub fn extract(path: &Path) -> Result<Metadata, ExtractError> {
    MetadataExtractor::with_defaults().extract(path)
}
