//! Hashing utilities

use crate::types::PapercopyError;
use md5::{Digest, Md5};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Content digest used when hashing is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5, the digest existing history stores were written with
    #[default]
    Md5,

    /// BLAKE3
    Blake3,
}

enum Hasher {
    Md5(Md5),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Hasher::Md5(Md5::new()),
            HashAlgorithm::Blake3 => Hasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        match self {
            Hasher::Md5(hasher) => hasher.update(bytes),
            Hasher::Blake3(hasher) => {
                hasher.update(bytes);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Hasher::Md5(hasher) => hex::encode(hasher.finalize()),
            Hasher::Blake3(hasher) => hasher.finalize().to_hex().to_string(),
        }
    }
}

/// Compute the content hash of a file as a lowercase hex string
///
/// The file is streamed in 64KB chunks.
///
/// # Example
/// ```no_run
/// use papercopy::hash::{compute_hash, HashAlgorithm};
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.txt"), HashAlgorithm::Md5)?;
/// # Ok::<(), papercopy::types::PapercopyError>(())
/// ```
pub fn compute_hash(file_path: &Path, algorithm: HashAlgorithm) -> Result<String, PapercopyError> {
    let read_error = |source| PapercopyError::Read {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::open(file_path).map_err(read_error)?;
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(read_error)?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(hasher.finalize_hex())
}
