//! SHA-256 content hashing for integrity fragments.

use crate::consts::CHUNK_SIZE;
use crate::error::{ErrorKind, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind as IoErrorKind, Read};
use std::path::Path;

/// Hashes the file at `path`, returning 64 lowercase hex characters.
///
/// The file is streamed in [`CHUNK_SIZE`] reads, so memory use doesn't grow
/// with wheel size.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ErrorKind::from_io(e, path))?;
    Ok(sha256_reader(file).map_err(|e| ErrorKind::from_io(e, path))?)
}

/// Hashes everything readable from `reader`.
pub fn sha256_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let bytes = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(bytes) => bytes,
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case(b"", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")]
    #[case(b"abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")]
    fn known_digests(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(sha256_reader(Cursor::new(input)).unwrap(), expected);
    }

    #[test]
    fn spans_multiple_chunks() {
        let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let expected = hex::encode(Sha256::digest(&data));
        assert_eq!(sha256_reader(Cursor::new(&data)).unwrap(), expected);
    }

    #[test]
    fn hashes_file_on_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pkg-1.0-py3-none-any.whl");
        std::fs::write(&path, b"abc").unwrap();
        let digest = sha256_file(&path).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = sha256_file(temp_dir.path().join("gone.whl")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }
}
