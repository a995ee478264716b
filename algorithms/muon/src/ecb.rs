//! Direct block application of the cipher (ECB).
//!
//! Input is processed in consecutive 16-byte chunks. A final partial chunk
//! is zero-padded for the cipher run, but only the original byte count is
//! written back, so output length always equals input length. That makes
//! a trailing partial block a one-way street: deciphering the truncated
//! output does not recover the input. Caller beware — this mode performs
//! no validation and no authentication.

use crate::cipher::{Aes, BLOCK_SIZE};

/// Encipher `input` into `out`; `out` must hold at least `input.len()`
/// bytes and the two buffers must not overlap (use
/// [`encipher_in_place`] for the aliased contract).
pub fn encipher_into(ctx: &Aes, out: &mut [u8], input: &[u8]) {
    debug_assert!(out.len() >= input.len());
    for (oc, ic) in out.chunks_mut(BLOCK_SIZE).zip(input.chunks(BLOCK_SIZE)) {
        let mut s = [0u8; BLOCK_SIZE];
        s[..ic.len()].copy_from_slice(ic);
        ctx.encrypt_block(&mut s);
        oc[..ic.len()].copy_from_slice(&s[..ic.len()]);
    }
}

/// Decipher `input` into `out`; sizing contract as [`encipher_into`].
pub fn decipher_into(ctx: &Aes, out: &mut [u8], input: &[u8]) {
    debug_assert!(out.len() >= input.len());
    for (oc, ic) in out.chunks_mut(BLOCK_SIZE).zip(input.chunks(BLOCK_SIZE)) {
        let mut s = [0u8; BLOCK_SIZE];
        s[..ic.len()].copy_from_slice(ic);
        ctx.decrypt_block(&mut s);
        oc[..ic.len()].copy_from_slice(&s[..ic.len()]);
    }
}

/// Encipher `buf` in place.
pub fn encipher_in_place(ctx: &Aes, buf: &mut [u8]) {
    for chunk in buf.chunks_mut(BLOCK_SIZE) {
        let mut s = [0u8; BLOCK_SIZE];
        s[..chunk.len()].copy_from_slice(chunk);
        ctx.encrypt_block(&mut s);
        chunk.copy_from_slice(&s[..chunk.len()]);
    }
}

/// Decipher `buf` in place.
pub fn decipher_in_place(ctx: &Aes, buf: &mut [u8]) {
    for chunk in buf.chunks_mut(BLOCK_SIZE) {
        let mut s = [0u8; BLOCK_SIZE];
        s[..chunk.len()].copy_from_slice(chunk);
        ctx.decrypt_block(&mut s);
        chunk.copy_from_slice(&s[..chunk.len()]);
    }
}
