//! Explicit decoder registry.
//!
//! Formats are not registered through global state: a [`DecoderRegistry`]
//! is built at startup (usually via [`DecoderRegistry::with_defaults`]) and
//! handed to the extractor. Tests build their own registries with whatever
//! decoders they need.
//!
//! Detection walks decoders in registration order and picks the first whose
//! sniffer accepts the file prefix.

use super::backend::HeaderDecoder;
use super::rust_backend::available_decoders;
use std::fmt;

#[derive(Default)]
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn HeaderDecoder>>,
}

impl DecoderRegistry {
    /// An empty registry; every file is unsupported until decoders are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in PNG, JPEG, GIF, BMP and WebP decoders.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for decoder in available_decoders() {
            registry.register(decoder);
        }
        registry
    }

    /// Append a decoder. Earlier registrations win when sniffers overlap.
    pub fn register(&mut self, decoder: impl HeaderDecoder + 'static) -> &mut Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// The first decoder whose signature matches `prefix`.
    pub fn detect(&self, prefix: &[u8]) -> Option<&dyn HeaderDecoder> {
        self.decoders
            .iter()
            .find(|d| d.sniff(prefix))
            .map(|d| &**d)
    }

    /// Registered format names in registration order.
    pub fn formats(&self) -> Vec<&str> {
        self.decoders.iter().map(|d| d.format_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
