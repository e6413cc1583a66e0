//! Shared test utilities for the mintdata test suite.
//!
//! Provides fixture lookup and synthetic image writers so tests can create
//! images of any supported format and size on the fly.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = write_test_image(tmp.path(), "tiny.gif", ImageFormat::Gif, 3, 2);
//! let meta = MetadataExtractor::default().extract(&path).unwrap();
//! assert_eq!(meta.format, "gif");
//! ```

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Copy a fixture into a fresh temp directory, keeping its file name.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join(name);
    std::fs::copy(fixture_path(name), &dest).unwrap();
    (tmp, dest)
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Encode a small gradient image in `format` and return the bytes.
///
/// JPEG gets RGB pixels (the encoder rejects alpha); every other format
/// gets RGBA.
pub fn encode_test_image(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img),
        _ => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(img).to_rgba8()),
    };
    let mut bytes = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

/// Write a synthetic image into `dir` under `name` and return its path.
pub fn write_test_image(
    dir: &Path,
    name: &str,
    format: ImageFormat,
    width: u32,
    height: u32,
) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_test_image(format, width, height)).unwrap();
    path
}

/// Cut a baseline JPEG a few bytes into its entropy-coded scan, leaving
/// every header segment up to and including SOS intact.
pub fn truncate_jpeg_scan(jpeg: &[u8]) -> Vec<u8> {
    let sos = jpeg
        .windows(2)
        .position(|w| w == [0xFF, 0xDA])
        .expect("JPEG has no SOS marker");
    let segment_len = u16::from_be_bytes([jpeg[sos + 2], jpeg[sos + 3]]) as usize;
    let cut = sos + 2 + segment_len + 8;
    assert!(cut < jpeg.len(), "JPEG scan too short to truncate");
    jpeg[..cut].to_vec()
}

/// `image` crate format for a built-in format name.
pub fn image_format_for(name: &str) -> ImageFormat {
    match name {
        "png" => ImageFormat::Png,
        "jpeg" => ImageFormat::Jpeg,
        "gif" => ImageFormat::Gif,
        "bmp" => ImageFormat::Bmp,
        "webp" => ImageFormat::WebP,
        other => panic!("no image format for {other}"),
    }
}

// =========================================================================
// Hand-built headers with no pixel payload
// =========================================================================

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= b as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn png_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let crc = crc32(&out[start..]);
    out.extend_from_slice(&crc.to_be_bytes());
}

/// PNG signature, IHDR and IEND. No IDAT.
pub fn minimal_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    png_chunk(&mut out, b"IHDR", &ihdr);
    png_chunk(&mut out, b"IEND", &[]);
    out
}

/// GIF89a header and logical screen descriptor, then the trailer.
pub fn minimal_gif(width: u16, height: u16) -> Vec<u8> {
    let mut out = b"GIF89a".to_vec();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&[0, 0, 0, b';']);
    out
}

/// SOI, a baseline SOF0 for one component, EOI.
pub fn minimal_jpeg(width: u16, height: u16) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x0B, 0x08];
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&[0x01, 0x01, 0x11, 0x00, 0xFF, 0xD9]);
    out
}

/// BITMAPFILEHEADER plus BITMAPINFOHEADER for a 24-bit image, no rows.
pub fn minimal_bmp(width: i32, height: i32) -> Vec<u8> {
    let mut out = b"BM".to_vec();
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0u8; 24]);
    out
}

fn riff_webp(chunk: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut body = b"WEBP".to_vec();
    body.extend_from_slice(chunk);
    body.extend_from_slice(&(data.len() as u32).to_le_bytes());
    body.extend_from_slice(data);
    if data.len() % 2 == 1 {
        body.push(0);
    }
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

/// WebP lossless: VP8L signature byte and the packed size word only.
pub fn minimal_webp_vp8l(width: u32, height: u32) -> Vec<u8> {
    let packed = (width - 1) | ((height - 1) << 14);
    let mut data = vec![0x2F];
    data.extend_from_slice(&packed.to_le_bytes());
    riff_webp(b"VP8L", &data)
}

/// WebP extended: a VP8X chunk with canvas size and no image chunks.
pub fn minimal_webp_vp8x(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0u8; 4];
    data.extend_from_slice(&(width - 1).to_le_bytes()[..3]);
    data.extend_from_slice(&(height - 1).to_le_bytes()[..3]);
    riff_webp(b"VP8X", &data)
}
