//! Magic-byte sniffers for the supported raster encodings.
//!
//! All functions here are pure and work on a prefix of the file. Format is
//! detected from content only; file extensions are never consulted.
//!
//! | Format | Signature |
//! |--------|-----------|
//! | PNG  | `89 50 4E 47 0D 0A 1A 0A` at 0 |
//! | JPEG | `FF D8 FF` at 0 (SOI + first marker) |
//! | GIF  | `GIF87a` or `GIF89a` at 0 |
//! | BMP  | `BM` at 0 |
//! | WebP | `RIFF` at 0 and `WEBP` at 8 |

/// Bytes read from the start of a file before choosing a decoder.
///
/// Long enough for every signature above.
pub const SNIFF_LEN: usize = 16;

/// A signature check over a file prefix.
pub type Sniffer = fn(&[u8]) -> bool;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn is_png(prefix: &[u8]) -> bool {
    prefix.starts_with(PNG_MAGIC)
}

pub fn is_jpeg(prefix: &[u8]) -> bool {
    prefix.starts_with(&[0xFF, 0xD8, 0xFF])
}

pub fn is_gif(prefix: &[u8]) -> bool {
    prefix.starts_with(b"GIF87a") || prefix.starts_with(b"GIF89a")
}

pub fn is_bmp(prefix: &[u8]) -> bool {
    prefix.starts_with(b"BM")
}

pub fn is_webp(prefix: &[u8]) -> bool {
    prefix.len() >= 12 && &prefix[0..4] == b"RIFF" && &prefix[8..12] == b"WEBP"
}
