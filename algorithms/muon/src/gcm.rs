//! Galois/Counter Mode: single-pass authenticated encryption.
//!
//! One shared routine drives both directions. The payload is keystreamed
//! with a big-endian 32-bit counter while the ciphertext side of every
//! chunk is folded into the GHASH state — deciphering hashes its input
//! before the XOR, enciphering hashes its zero-padded output after it.

use crate::cipher::{Aes, BLOCK_SIZE};
use crate::ghash::Ghash;
use crate::types::Error;
use crate::words;
use subtle::ConstantTimeEq;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Nominal nonce size; any other length is routed through GHASH to seed
/// the counter.
pub const NONCE_SIZE: usize = 12;

/// Largest possible authentication tag.
pub const TAG_SIZE: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encipher,
    Decipher,
}

// =============================================================================
// COUNTER AND SUBKEY DERIVATION
// =============================================================================

/// Hash subkey H: the zero block under the forward cipher.
fn hash_subkey(ctx: &Aes) -> [u8; BLOCK_SIZE] {
    let mut h = [0u8; BLOCK_SIZE];
    ctx.encrypt_block(&mut h);
    h
}

/// Initial counter: a 12-byte nonce gets the fixed 0x00000001 suffix; any
/// other length is authenticated-hashed (no AAD) into a 128-bit seed.
fn initial_counter(h: &[u8; BLOCK_SIZE], nonce: &[u8]) -> [u8; BLOCK_SIZE] {
    if nonce.len() == NONCE_SIZE {
        let mut counter = [0u8; BLOCK_SIZE];
        counter[..NONCE_SIZE].copy_from_slice(nonce);
        counter[BLOCK_SIZE - 1] = 1;
        counter
    } else {
        let mut g = Ghash::new(h);
        g.absorb_padded(nonce);
        g.finalize(0, nonce.len())
    }
}

/// Increment the low 32 bits of the counter as a big-endian integer.
fn increment(counter: &mut [u8; BLOCK_SIZE]) {
    let low = u32::from_be_bytes([counter[12], counter[13], counter[14], counter[15]]);
    counter[12..].copy_from_slice(&low.wrapping_add(1).to_be_bytes());
}

// =============================================================================
// SHARED SINGLE-PASS ROUTINE
// =============================================================================

/// Transform `buf` in place and return the full 16-byte tag.
fn crypt(ctx: &Aes, nonce: &[u8], aad: &[u8], buf: &mut [u8], mode: Mode) -> [u8; BLOCK_SIZE] {
    let h = hash_subkey(ctx);
    let icount = initial_counter(&h, nonce);
    let mut counter = icount;

    let mut g = Ghash::new(&h);
    g.absorb_padded(aad);

    for chunk in buf.chunks_mut(BLOCK_SIZE) {
        let n = chunk.len();
        let mut part = [0u8; BLOCK_SIZE];
        part[..n].copy_from_slice(chunk);

        if mode == Mode::Decipher {
            g.absorb(&part);
        }

        increment(&mut counter);
        let mut keystream = counter;
        ctx.encrypt_block(&mut keystream);
        for (p, ks) in part[..n].iter_mut().zip(&keystream[..n]) {
            *p ^= ks;
        }
        chunk.copy_from_slice(&part[..n]);

        if mode == Mode::Encipher {
            // part[n..] is still zero, so a short final chunk is hashed
            // zero-padded.
            g.absorb(&part);
        }
    }

    let mut tag = g.finalize(aad.len(), buf.len());
    let mut sealed_counter = icount;
    ctx.encrypt_block(&mut sealed_counter);
    words::xor_in_place(&mut tag, &sealed_counter);
    tag
}

// =============================================================================
// PUBLIC SURFACE
// =============================================================================

/// Encipher `buf` in place and write the tag prefix into `tag_out`.
///
/// The tag is truncatable: `tag_out` may be anywhere from 0 to 16 bytes
/// and receives the leading bytes of the full tag.
///
/// # Errors
/// Returns [`Error::Length`] when `tag_out` is longer than 16 bytes.
pub fn seal_in_place(
    ctx: &Aes,
    nonce: &[u8],
    aad: &[u8],
    buf: &mut [u8],
    tag_out: &mut [u8],
) -> Result<(), Error> {
    if tag_out.len() > TAG_SIZE {
        return Err(Error::Length(tag_out.len()));
    }
    let tag = crypt(ctx, nonce, aad, buf, Mode::Encipher);
    let n = tag_out.len();
    tag_out.copy_from_slice(&tag[..n]);
    Ok(())
}

/// Decipher `buf` in place and verify `tag` against the computed tag.
///
/// The comparison covers the full supplied tag length in constant time.
/// An empty `tag` authenticates nothing and always passes — caller
/// beware. On [`Error::Auth`] the buffer has already been overwritten
/// with unauthenticated plaintext and must be discarded.
///
/// # Errors
/// Returns [`Error::Length`] when `tag` is longer than 16 bytes, and
/// [`Error::Auth`] when verification fails.
pub fn open_in_place(
    ctx: &Aes,
    nonce: &[u8],
    aad: &[u8],
    buf: &mut [u8],
    tag: &[u8],
) -> Result<(), Error> {
    if tag.len() > TAG_SIZE {
        return Err(Error::Length(tag.len()));
    }
    let computed = crypt(ctx, nonce, aad, buf, Mode::Decipher);
    if bool::from(computed[..tag.len()].ct_eq(tag)) {
        Ok(())
    } else {
        Err(Error::Auth)
    }
}

/// Encipher `plaintext`, returning the ciphertext and a `tag_len`-byte tag.
///
/// # Errors
/// Returns [`Error::Length`] when `tag_len` exceeds 16.
#[cfg(feature = "alloc")]
pub fn seal(
    ctx: &Aes,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    tag_len: usize,
) -> Result<(Vec<u8>, Vec<u8>), Error> {
    if tag_len > TAG_SIZE {
        return Err(Error::Length(tag_len));
    }
    let mut buf = plaintext.to_vec();
    let mut tag = alloc::vec![0u8; tag_len];
    seal_in_place(ctx, nonce, aad, &mut buf, &mut tag)?;
    Ok((buf, tag))
}

/// Decipher `ciphertext` and verify `tag`, returning the plaintext.
///
/// # Errors
/// As [`open_in_place`].
#[cfg(feature = "alloc")]
pub fn open(
    ctx: &Aes,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, Error> {
    let mut buf = ciphertext.to_vec();
    open_in_place(ctx, nonce, aad, &mut buf, tag)?;
    Ok(buf)
}
