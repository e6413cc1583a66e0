//! Directory-wide extraction.
//!
//! Walks a directory tree and extracts every regular file in parallel with
//! [rayon](https://docs.rs/rayon). Each extraction is independent, so a
//! single [`MetadataExtractor`] is shared by all workers.
//!
//! Files no decoder recognises are reported as skipped, never fatal. Any
//! other extraction failure is also reported per file so one unreadable
//! entry does not hide the rest of the tree. Only a failing directory walk
//! aborts the batch.

use crate::extract::MetadataExtractor;
use crate::metadata::Metadata;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A file the batch could not turn into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
    /// True when the file was readable but not a supported image.
    pub unsupported: bool,
}

/// Outcome of a batch extraction, ordered by path.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub extracted: Vec<(PathBuf, Metadata)>,
    pub skipped: Vec<Skipped>,
}

impl BatchReport {
    /// Groups of extracted paths sharing a checksum, for groups of two or
    /// more. Ordered by checksum; paths within a group keep report order.
    pub fn duplicates(&self) -> Vec<(String, Vec<PathBuf>)> {
        let mut by_checksum: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
        for (path, meta) in &self.extracted {
            by_checksum
                .entry(meta.checksum.as_str())
                .or_default()
                .push(path.clone());
        }
        by_checksum
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(checksum, paths)| (checksum.to_string(), paths))
            .collect()
    }
}

/// Extract every file under `root`.
pub fn extract_dir(root: &Path, extractor: &MetadataExtractor) -> Result<BatchReport, BatchError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BatchError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path.clone(), extractor.extract(path)))
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(meta) => report.extracted.push((path, meta)),
            Err(e) => {
                log::debug!("skipping {}: {e}", path.display());
                report.skipped.push(Skipped {
                    unsupported: e.is_unsupported(),
                    reason: e.to_string(),
                    path,
                });
            }
        }
    }
    Ok(report)
}
