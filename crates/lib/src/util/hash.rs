//! Content hashing and checksum verification.
//!
//! Artifacts are identified by the lowercase hex SHA-256 of their bytes. The
//! manifest declares the expected digest; casing and surrounding whitespace
//! are not validated at load time, so both sides are normalized before they
//! are compared.

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::consts::CHECKSUM_HEX_LEN;

/// Lowercase hex SHA-256 digest of an artifact's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub String);

impl fmt::Display for ContentHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
  #[error("declared checksum '{0}' is not a {CHECKSUM_HEX_LEN}-character hex SHA-256 digest")]
  Malformed(String),

  #[error("checksum mismatch: expected {expected}, got {actual}")]
  Mismatch { expected: String, actual: String },
}

/// Canonical form of a declared checksum: trimmed and lowercased.
pub fn normalize_checksum(checksum: &str) -> String {
  checksum.trim().to_ascii_lowercase()
}

/// Checks that a declared checksum is a well-formed SHA-256 hex digest.
pub fn validate_checksum(checksum: &str) -> Result<(), ChecksumError> {
  let normalized = normalize_checksum(checksum);
  match hex::decode(&normalized) {
    Ok(bytes) if normalized.len() == CHECKSUM_HEX_LEN && bytes.len() == CHECKSUM_HEX_LEN / 2 => Ok(()),
    _ => Err(ChecksumError::Malformed(checksum.to_string())),
  }
}

/// Hash `data` and compare it against the declared checksum.
pub fn verify_checksum(data: &[u8], expected: &str) -> Result<ContentHash, ChecksumError> {
  validate_checksum(expected)?;
  let expected = normalize_checksum(expected);
  let actual = hash_bytes(data);
  if actual.0 != expected {
    return Err(ChecksumError::Mismatch {
      expected,
      actual: actual.0,
    });
  }
  Ok(actual)
}
