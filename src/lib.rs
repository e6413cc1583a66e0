//! # mintdata
//!
//! Turns an image file into a reproducible metadata record and anchors that
//! record with a ledger backend.
//!
//! # Architecture: Extract, Serialize, Anchor
//!
//! ```text
//! 1. Extract    image file  →  Metadata        (header decode + SHA-256)
//! 2. Serialize  Metadata    →  metadata.json   (canonical compact JSON)
//! 3. Anchor     payload     →  Receipt         (opaque backend)
//! ```
//!
//! Only the first step has a correctness contract. A record is fully
//! determined by the file's bytes and name: extracting an unchanged file
//! twice yields byte-identical JSON, and the checksum changes whenever any
//! byte of the file does. Serialization and anchoring consume the record
//! without changing it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`checksum`] | Streaming SHA-256 over file content, lowercase hex |
//! | [`imaging`] | Signature sniffing, header decoders, the decoder registry |
//! | [`metadata`] | The [`Metadata`] record, JSON form, artifact file |
//! | [`extract`] | [`MetadataExtractor`]: path → record, with the error taxonomy |
//! | [`batch`] | Parallel extraction over a directory tree |
//! | [`anchor`] | [`AnchorBackend`](anchor::AnchorBackend) trait and the JSON Lines ledger |
//! | [`config`] | `mintdata.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Decoder Registry
//!
//! Supported formats live in a [`DecoderRegistry`](imaging::DecoderRegistry)
//! that is built at startup and handed to the extractor, instead of being
//! registered globally. Tests register fake decoders without touching any
//! shared state, and the set of supported formats is inspectable at runtime.
//!
//! ## Content, Not Extensions
//!
//! Format is detected from the file's leading bytes. A GIF named `photo.png`
//! is reported as `gif`.
//!
//! ## Header-Only Decoding
//!
//! Width and height come from the image header alone. A file with a valid
//! header and truncated or damaged pixel data still extracts, and its
//! checksum still reflects exactly the bytes on disk.
//!
//! ## Narrow Anchoring Seam
//!
//! The backend sees an identity and an opaque string. Anything a real ledger
//! needs (keys, signing, broadcast) stays behind the trait, so the pipeline
//! is testable with an in-memory stub.

pub mod anchor;
pub mod batch;
pub mod checksum;
pub mod config;
pub mod extract;
pub mod imaging;
pub mod metadata;
pub mod output;

pub use extract::{ExtractError, MetadataExtractor};
pub use metadata::Metadata;

#[cfg(test)]
pub(crate) mod test_helpers;
