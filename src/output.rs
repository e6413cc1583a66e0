//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Extract
//!
//! ```text
//! Metadata
//!     File Name: dataset_example.png
//!     Width: 10 px
//!     Height: 10 px
//!     Format: png
//!     Checksum (SHA256): af1e2f37...
//!     File Size: 238 bytes
//! ```
//!
//! ## Anchor
//!
//! ```text
//! Anchored
//!     Record: 3
//!     Creator: alice
//!     Payload SHA256: 5d41402a...
//! ```
//!
//! ## Ledger
//!
//! ```text
//! Records
//! 000 alice
//!     Payload: {"file_name":"dataset_example.png",...}
//! ```
//!
//! ## Scan
//!
//! ```text
//! Images
//! 001 dataset_example.png (png 10x10, 238 bytes)
//!     Source: 2024/dataset_example.png
//!     Checksum: af1e2f37...
//!
//! Skipped
//!     notes.txt: unsupported format
//!
//! Duplicates
//!     af1e2f37...
//!         a.png
//!         copy-of-a.png
//!
//! Extracted 1 image, skipped 1 file
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::anchor::{AnchorRecord, Receipt};
use crate::batch::BatchReport;
use crate::metadata::Metadata;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count: `1 image`, `2 images`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Show `path` relative to `root` when it lies inside it.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

// ============================================================================
// Extract
// ============================================================================

/// Format a single metadata record.
pub fn format_metadata(meta: &Metadata) -> Vec<String> {
    vec![
        "Metadata".to_string(),
        format!("{}File Name: {}", indent(1), meta.file_name),
        format!("{}Width: {} px", indent(1), meta.width),
        format!("{}Height: {} px", indent(1), meta.height),
        format!("{}Format: {}", indent(1), meta.format),
        format!("{}Checksum (SHA256): {}", indent(1), meta.checksum),
        format!("{}File Size: {} bytes", indent(1), meta.file_size),
    ]
}

pub fn print_metadata(meta: &Metadata) {
    for line in format_metadata(meta) {
        println!("{}", line);
    }
}

// ============================================================================
// Anchor
// ============================================================================

/// Format the receipt of an anchoring submission.
pub fn format_receipt(receipt: &Receipt) -> Vec<String> {
    vec![
        "Anchored".to_string(),
        format!("{}Record: {}", indent(1), receipt.index),
        format!("{}Creator: {}", indent(1), receipt.creator),
        format!("{}Payload SHA256: {}", indent(1), receipt.payload_digest),
    ]
}

pub fn print_receipt(receipt: &Receipt) {
    for line in format_receipt(receipt) {
        println!("{}", line);
    }
}

/// Format every record held by a backend, oldest first.
pub fn format_records(records: &[AnchorRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No records".to_string()];
    }
    let mut lines = vec!["Records".to_string()];
    for record in records {
        lines.push(format!("{} {}", format_index(record.index as usize), record.creator));
        lines.push(format!("{}Payload: {}", indent(1), truncate(&record.payload, 200)));
    }
    lines
}

pub fn print_records(records: &[AnchorRecord]) {
    for line in format_records(records) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format a batch report. Paths are shown relative to `root`.
pub fn format_batch(report: &BatchReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.extracted.is_empty() {
        lines.push("Images".to_string());
        for (i, (path, meta)) in report.extracted.iter().enumerate() {
            lines.push(format!(
                "{} {} ({} {}x{}, {} bytes)",
                format_index(i + 1),
                meta.file_name,
                meta.format,
                meta.width,
                meta.height,
                meta.file_size
            ));
            lines.push(format!("{}Source: {}", indent(1), relative(path, root)));
            lines.push(format!("{}Checksum: {}", indent(1), meta.checksum));
        }
    }

    if !report.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for skipped in &report.skipped {
            let reason = if skipped.unsupported {
                "unsupported format".to_string()
            } else {
                skipped.reason.clone()
            };
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                relative(&skipped.path, root),
                reason
            ));
        }
    }

    let duplicates = report.duplicates();
    if !duplicates.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Duplicates".to_string());
        for (checksum, paths) in &duplicates {
            lines.push(format!("{}{}", indent(1), checksum));
            for path in paths {
                lines.push(format!("{}{}", indent(2), relative(path, root)));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Extracted {}, skipped {}",
        count(report.extracted.len(), "image"),
        count(report.skipped.len(), "file")
    ));
    lines
}

pub fn print_batch(report: &BatchReport, root: &Path) {
    for line in format_batch(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
