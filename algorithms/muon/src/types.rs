//! Shared types used across the Muon library.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failure cases for every operation in the engine.
///
/// Construction errors (`KeyLength`, `Length`) are detected before any
/// cryptographic work. Authentication failures (`Auth`, `Integrity`) mean
/// the produced output must not be treated as valid plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key material was not 16, 24 or 32 bytes long.
    KeyLength(usize),
    /// A buffer violated the operation's sizing contract.
    Length(usize),
    /// GCM tag comparison failed; the deciphered buffer is untrusted.
    Auth,
    /// Key-unwrap integrity check failed; the unwrapped data is untrusted.
    Integrity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyLength(n) => {
                write!(f, "invalid key length {n}, expected 16, 24 or 32 bytes")
            }
            Self::Length(n) => write!(f, "invalid buffer length {n}"),
            Self::Auth => write!(f, "authentication tag mismatch"),
            Self::Integrity => write!(f, "key-wrap integrity check failed"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}
