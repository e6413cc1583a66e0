//! Header decoder trait and shared types.
//!
//! The [`HeaderDecoder`] trait is the seam between the extractor and the
//! codec libraries. A decoder knows one encoding: how to recognise it from
//! a file prefix and how to read width and height from its header without
//! touching the pixel payload.
//!
//! The production implementation is
//! [`HeaderSizeDecoder`](super::rust_backend::HeaderSizeDecoder), one instance
//! per format, all pure Rust.

use std::io::{BufRead, Seek};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed {format} header: {reason}")]
    Malformed { format: String, reason: String },
}

/// Pixel dimensions read from an image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A seekable, buffered byte source positioned at the start of an image.
pub trait HeaderSource: BufRead + Seek {}

impl<T: BufRead + Seek> HeaderSource for T {}

/// Decoder for a single image encoding.
///
/// `Send + Sync` so one registry can serve extractions on many threads.
pub trait HeaderDecoder: Send + Sync {
    /// Canonical short name of the encoding (`"png"`, `"jpeg"`, ...).
    fn format_name(&self) -> &str;

    /// Whether `prefix` (the first bytes of a file) carries this encoding's
    /// signature.
    fn sniff(&self, prefix: &[u8]) -> bool;

    /// Read dimensions from the header. `source` is positioned at offset 0.
    fn decode_header(&self, source: &mut dyn HeaderSource) -> Result<Dimensions, DecodeError>;
}
