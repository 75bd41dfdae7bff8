//! Shared utilities.
//!
//! Hashing, checksum verification and artifact naming.

pub mod hash;
pub mod naming;

#[cfg(test)]
pub mod testutil;
