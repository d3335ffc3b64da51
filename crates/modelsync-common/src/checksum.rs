//! SHA-256 helpers for asset files
//!
//! Downloads are hashed incrementally with [`StreamingChecksum`] while their
//! chunks are written, so the digest never needs the whole payload in memory.

use crate::error::{ModelsyncError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const READ_BUFFER_SIZE: usize = 8192;

/// Incremental SHA-256 hasher that also counts bytes
#[derive(Default)]
pub struct StreamingChecksum {
    hasher: Sha256,
    bytes: u64,
}

impl StreamingChecksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Number of bytes hashed so far
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Consume the hasher, returning the lowercase hex digest
    pub fn finalize(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Compute the SHA-256 of any readable source
pub fn compute_checksum<R: Read>(reader: &mut R) -> Result<String> {
    let mut checksum = StreamingChecksum::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        checksum.update(&buffer[..bytes_read]);
    }

    Ok(checksum.finalize())
}

/// Compute the SHA-256 of a file
pub fn compute_file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    compute_checksum(&mut file)
}

/// Compare a computed digest against an expected one (case-insensitive hex)
pub fn verify_checksum(actual: &str, expected: &str) -> Result<()> {
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(ModelsyncError::ChecksumMismatch {
            expected: expected.trim().to_lowercase(),
            actual: actual.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_compute_checksum() {
        let mut cursor = Cursor::new(b"hello world");
        assert_eq!(compute_checksum(&mut cursor).unwrap(), HELLO_WORLD);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut checksum = StreamingChecksum::new();
        checksum.update(b"hello");
        checksum.update(b" ");
        checksum.update(b"world");
        assert_eq!(checksum.bytes(), 11);
        assert_eq!(checksum.finalize(), HELLO_WORLD);
    }

    #[test]
    fn test_compute_file_checksum() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"test data").unwrap();
        temp_file.flush().unwrap();

        assert_eq!(
            compute_file_checksum(temp_file.path()).unwrap(),
            "916f0027a575074ce72a331777c3478d6513f786a591bd892da1a577bf2335f9"
        );
    }

    #[test]
    fn test_verify_checksum() {
        assert!(verify_checksum(HELLO_WORLD, &HELLO_WORLD.to_uppercase()).is_ok());

        let err = verify_checksum(HELLO_WORLD, "00ff").unwrap_err();
        assert!(matches!(err, ModelsyncError::ChecksumMismatch { .. }));
    }
}
