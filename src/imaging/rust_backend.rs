//! Pure Rust header decoding backed by the `imagesize` crate.
//!
//! ## Where the dimensions come from
//!
//! | Format | Sniffer | Header fields read |
//! |---|---|---|
//! | PNG  | [`is_png`]  | IHDR width/height |
//! | JPEG | [`is_jpeg`] | first SOFn segment |
//! | GIF  | [`is_gif`]  | logical screen descriptor |
//! | BMP  | [`is_bmp`]  | DIB header |
//! | WebP | [`is_webp`] | VP8 / VP8L / VP8X chunk header |
//!
//! `imagesize` seeks straight to those fields and stops. Nothing past the
//! header is read, so a file with missing or damaged pixel data still
//! reports its dimensions.

use super::backend::{DecodeError, Dimensions, HeaderDecoder, HeaderSource};
use super::signature::{SNIFF_LEN, Sniffer, is_bmp, is_gif, is_jpeg, is_png, is_webp};
use std::io::{Read, Seek, SeekFrom};

/// Every built-in format, in registration order.
const CANDIDATES: &[(&str, Sniffer)] = &[
    ("png", is_png),
    ("jpeg", is_jpeg),
    ("gif", is_gif),
    ("bmp", is_bmp),
    ("webp", is_webp),
];

/// Header-only decoder for one built-in format.
#[derive(Debug, Clone, Copy)]
pub struct HeaderSizeDecoder {
    name: &'static str,
    sniffer: Sniffer,
}

impl HeaderSizeDecoder {
    pub fn new(name: &'static str, sniffer: Sniffer) -> Self {
        Self { name, sniffer }
    }

    pub fn png() -> Self {
        Self::new("png", is_png)
    }

    pub fn jpeg() -> Self {
        Self::new("jpeg", is_jpeg)
    }

    pub fn gif() -> Self {
        Self::new("gif", is_gif)
    }

    pub fn bmp() -> Self {
        Self::new("bmp", is_bmp)
    }

    pub fn webp() -> Self {
        Self::new("webp", is_webp)
    }

    fn malformed(&self, reason: impl Into<String>) -> DecodeError {
        DecodeError::Malformed {
            format: self.name.to_string(),
            reason: reason.into(),
        }
    }
}

impl HeaderDecoder for HeaderSizeDecoder {
    fn format_name(&self) -> &str {
        self.name
    }

    fn sniff(&self, prefix: &[u8]) -> bool {
        (self.sniffer)(prefix)
    }

    fn decode_header(&self, source: &mut dyn HeaderSource) -> Result<Dimensions, DecodeError> {
        // imagesize detects the format on its own; make sure it is ours.
        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        (&mut *source)
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut prefix)?;
        if !self.sniff(&prefix) {
            return Err(self.malformed("signature does not match"));
        }
        source.seek(SeekFrom::Start(0))?;

        let size =
            imagesize::reader_size(&mut *source).map_err(|e| self.malformed(e.to_string()))?;
        let width = u32::try_from(size.width).map_err(|_| self.malformed("width out of range"))?;
        let height =
            u32::try_from(size.height).map_err(|_| self.malformed("height out of range"))?;
        if width == 0 || height == 0 {
            return Err(self.malformed(format!("zero dimension {width}x{height}")));
        }
        Ok(Dimensions { width, height })
    }
}

/// Decoders for every built-in format.
pub fn available_decoders() -> Vec<HeaderSizeDecoder> {
    CANDIDATES
        .iter()
        .map(|&(name, sniffer)| HeaderSizeDecoder::new(name, sniffer))
        .collect()
}
