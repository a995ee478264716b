#![cfg_attr(not(feature = "std"), no_std)]

//! # Muon
//!
//! A compact symmetric-cryptography engine built from scratch:
//! AES-128/192/256 plus three modes on top of the block cipher —
//! direct block application (ECB), GCM authenticated encryption,
//! and NIST key wrapping.

//! # Usage
//! ```rust
//! use muon::{gcm, Aes};
//!
//! // 1. Expand a key once, reuse the context for any number of calls.
//! let ctx = Aes::new(&[0x42; 16])?;
//!
//! // 2. Authenticated encryption
//! let nonce = [0u8; 12];
//! let (ciphertext, tag) = gcm::seal(&ctx, &nonce, b"header", b"payload", 16)?;
//!
//! // 3. Verified decryption
//! let plaintext = gcm::open(&ctx, &nonce, b"header", &ciphertext, &tag)?;
//! assert_eq!(plaintext, b"payload");
//! # Ok::<(), muon::Error>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(feature = "alloc")]
extern crate alloc;

mod cipher;
pub mod ecb;
pub mod gcm;
mod ghash;
mod types;
pub mod wrap;
pub(crate) mod words;

// =============================================================================
// EXPORTS
// =============================================================================

pub use cipher::{Aes, AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, BLOCK_SIZE};
pub use types::Error;
