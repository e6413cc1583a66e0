//! Content fingerprinting.
//!
//! A checksum is the SHA-256 digest of a file's bytes, encoded as 64
//! lowercase hex characters. It is a pure function of content: the file's
//! name, location, and timestamps never enter the digest, so two
//! byte-identical files always share a checksum and a single changed byte
//! produces a different one.
//!
//! Files are streamed through the hasher in fixed-size chunks until EOF, so
//! memory use is bounded regardless of file size.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Read buffer size for streaming a file into the hasher.
const CHUNK_SIZE: usize = 64 * 1024;

/// Length of a hex-encoded SHA-256 digest.
pub const HEX_LEN: usize = 64;

#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// SHA-256 checksum of a file's contents, as lowercase hex.
pub fn checksum_file(path: &Path) -> Result<String, ChecksumError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ChecksumError::NotFound(path.to_path_buf()),
        _ => ChecksumError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    checksum_reader(file).map_err(|source| ChecksumError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// SHA-256 checksum of everything `reader` yields, read from its current
/// position to EOF.
pub fn checksum_reader(mut reader: impl Read) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 checksum of an in-memory byte slice.
pub fn checksum_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Whether `s` has the shape of a checksum produced by this module.
pub fn is_checksum(s: &str) -> bool {
    s.len() == HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
