//! Image header decoding in pure Rust.
//!
//! | Concern | Where |
//! |---|---|
//! | **Sniff** | magic bytes in [`signature`] |
//! | **Decode header** | `imagesize::reader_size` via [`HeaderSizeDecoder`] |
//! | **Registry** | [`DecoderRegistry`], built explicitly and passed to the extractor |
//!
//! The module is split into:
//! - **Signature**: Pure prefix checks per format (unit testable)
//! - **Backend**: [`HeaderDecoder`] trait + [`HeaderSizeDecoder`]
//! - **Registry**: Ordered decoder lookup by signature

pub mod backend;
pub mod registry;
pub mod rust_backend;
pub mod signature;

pub use backend::{DecodeError, Dimensions, HeaderDecoder, HeaderSource};
pub use registry::DecoderRegistry;
pub use rust_backend::HeaderSizeDecoder;
pub use signature::SNIFF_LEN;
