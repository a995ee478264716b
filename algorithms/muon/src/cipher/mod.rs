//! AES block cipher: key schedule plus the forward and inverse round
//! transforms.
//!
//! The state is the standard 4x4 byte matrix stored column-major in a
//! 16-byte array (`state[row + 4 * col]`). AddRoundKey, SubBytes and
//! ShiftRows are fused into one per-row pass; MixColumns and its inverse
//! are built from a single GF(2^8) doubling primitive.

mod constants;

use crate::types::Error;
use constants::{GF_POLY, INV_SBOX, RCON, SBOX};

/// Cipher block size in bytes, the same for every key size.
pub const BLOCK_SIZE: usize = 16;

/// Key size for AES-128.
pub const AES128_KEY_SIZE: usize = 16;
/// Key size for AES-192.
pub const AES192_KEY_SIZE: usize = 24;
/// Key size for AES-256.
pub const AES256_KEY_SIZE: usize = 32;

/// Expanded-schedule capacity; the 14-round schedule is the largest.
const SCHEDULE_MAX: usize = 240;

/// Double a GF(2^8) element (multiply by x), reducing by `GF_POLY`.
/// Branchless: `b >> 7` extracts the high bit as 0 or 1.
#[inline]
const fn gf_double(b: u8) -> u8 {
    (b << 1) ^ ((b >> 7) * GF_POLY)
}

// =============================================================================
// CIPHER CONTEXT
// =============================================================================

/// An expanded AES key schedule.
///
/// Immutable once built; a single context may be shared across any number
/// of concurrent block operations.
#[derive(Clone)]
pub struct Aes {
    k: [u8; SCHEDULE_MAX],
    rounds: usize,
}

impl Aes {
    /// Expand `key` into a round-key schedule.
    ///
    /// # Errors
    /// Returns [`Error::KeyLength`] unless the key is 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let (rounds, schedule_len) = match key.len() {
            AES128_KEY_SIZE => (10, 176),
            AES192_KEY_SIZE => (12, 208),
            AES256_KEY_SIZE => (14, SCHEDULE_MAX),
            n => return Err(Error::KeyLength(n)),
        };

        let mut k = [0u8; SCHEDULE_MAX];
        k[..key.len()].copy_from_slice(key);

        let nk = key.len();
        let nkw = nk / 4;
        for w in nkw..schedule_len / 4 {
            let p = w * 4;
            let mut t = [k[p - 4], k[p - 3], k[p - 2], k[p - 1]];
            if w % nkw == 0 {
                // Rotate, substitute, fold in the round constant.
                t = [
                    SBOX[t[1] as usize] ^ RCON[w / nkw],
                    SBOX[t[2] as usize],
                    SBOX[t[3] as usize],
                    SBOX[t[0] as usize],
                ];
            } else if nkw == 8 && w % 8 == 4 {
                // AES-256 applies an extra substitution mid-group.
                t = [
                    SBOX[t[0] as usize],
                    SBOX[t[1] as usize],
                    SBOX[t[2] as usize],
                    SBOX[t[3] as usize],
                ];
            }
            k[p] = t[0] ^ k[p - nk];
            k[p + 1] = t[1] ^ k[p - nk + 1];
            k[p + 2] = t[2] ^ k[p - nk + 2];
            k[p + 3] = t[3] ^ k[p - nk + 3];
        }

        Ok(Self { k, rounds })
    }

    /// Number of cipher rounds for this key size (10, 12 or 14).
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    // =========================================================================
    // FORWARD TRANSFORM
    // =========================================================================

    /// Encrypt one 16-byte block in place.
    pub fn encrypt_block(&self, s: &mut [u8; BLOCK_SIZE]) {
        let k = &self.k;
        let mut p = 0;

        for r in 0..self.rounds {
            // Fused AddRoundKey + SubBytes + ShiftRows, one pass per row.

            // row 0
            s[0] = SBOX[(s[0] ^ k[p]) as usize];
            s[4] = SBOX[(s[4] ^ k[p + 4]) as usize];
            s[8] = SBOX[(s[8] ^ k[p + 8]) as usize];
            s[12] = SBOX[(s[12] ^ k[p + 12]) as usize];

            // row 1, left shift 1
            let a = SBOX[(s[1] ^ k[p + 1]) as usize];
            s[1] = SBOX[(s[5] ^ k[p + 5]) as usize];
            s[5] = SBOX[(s[9] ^ k[p + 9]) as usize];
            s[9] = SBOX[(s[13] ^ k[p + 13]) as usize];
            s[13] = a;

            // row 2, left shift 2
            let a = SBOX[(s[2] ^ k[p + 2]) as usize];
            let b = SBOX[(s[6] ^ k[p + 6]) as usize];
            s[2] = SBOX[(s[10] ^ k[p + 10]) as usize];
            s[6] = SBOX[(s[14] ^ k[p + 14]) as usize];
            s[10] = a;
            s[14] = b;

            // row 3, left shift 3
            let a = SBOX[(s[15] ^ k[p + 15]) as usize];
            s[15] = SBOX[(s[11] ^ k[p + 11]) as usize];
            s[11] = SBOX[(s[7] ^ k[p + 7]) as usize];
            s[7] = SBOX[(s[3] ^ k[p + 3]) as usize];
            s[3] = a;

            p += BLOCK_SIZE;

            if r + 1 == self.rounds {
                // Final round skips MixColumns; add the last round key.
                for (si, ki) in s.iter_mut().zip(&k[p..p + BLOCK_SIZE]) {
                    *si ^= ki;
                }
                return;
            }

            // MixColumns: 2a+3b+c+d / a+2b+3c+d / a+b+2c+3d / 3a+b+c+2d
            for c in [0, 4, 8, 12] {
                let (a, b, cc, d) = (s[c], s[c + 1], s[c + 2], s[c + 3]);
                let t = a ^ b ^ cc ^ d;
                s[c] ^= t ^ gf_double(a ^ b);
                s[c + 1] ^= t ^ gf_double(b ^ cc);
                s[c + 2] ^= t ^ gf_double(cc ^ d);
                s[c + 3] ^= t ^ gf_double(d ^ a);
            }
        }
    }

    // =========================================================================
    // INVERSE TRANSFORM
    // =========================================================================

    /// Decrypt one 16-byte block in place.
    pub fn decrypt_block(&self, s: &mut [u8; BLOCK_SIZE]) {
        let k = &self.k;
        let mut p = self.rounds * BLOCK_SIZE;

        for (si, ki) in s.iter_mut().zip(&k[p..p + BLOCK_SIZE]) {
            *si ^= ki;
        }

        for r in (1..=self.rounds).rev() {
            p -= BLOCK_SIZE;

            if r < self.rounds {
                // InvMixColumns: 14a+11b+13c+9d and rotations, reduced to
                // doublings of the two shared intermediates.
                for c in [0, 4, 8, 12] {
                    let (a, b, cc, d) = (s[c], s[c + 1], s[c + 2], s[c + 3]);
                    let t = a ^ b ^ cc ^ d;
                    let e = gf_double(t);
                    let x = t ^ gf_double(gf_double(e ^ a ^ cc));
                    let y = t ^ gf_double(gf_double(e ^ b ^ d));
                    s[c] ^= x ^ gf_double(a ^ b);
                    s[c + 1] ^= y ^ gf_double(b ^ cc);
                    s[c + 2] ^= x ^ gf_double(cc ^ d);
                    s[c + 3] ^= y ^ gf_double(d ^ a);
                }
            }

            // Fused right ShiftRows + InvSubBytes + AddRoundKey per row.

            // row 0
            s[0] = INV_SBOX[s[0] as usize] ^ k[p];
            s[4] = INV_SBOX[s[4] as usize] ^ k[p + 4];
            s[8] = INV_SBOX[s[8] as usize] ^ k[p + 8];
            s[12] = INV_SBOX[s[12] as usize] ^ k[p + 12];

            // row 1, right shift 1
            let a = INV_SBOX[s[13] as usize] ^ k[p + 1];
            s[13] = INV_SBOX[s[9] as usize] ^ k[p + 13];
            s[9] = INV_SBOX[s[5] as usize] ^ k[p + 9];
            s[5] = INV_SBOX[s[1] as usize] ^ k[p + 5];
            s[1] = a;

            // row 2, right shift 2
            let a = INV_SBOX[s[2] as usize] ^ k[p + 10];
            let b = INV_SBOX[s[6] as usize] ^ k[p + 14];
            s[2] = INV_SBOX[s[10] as usize] ^ k[p + 2];
            s[6] = INV_SBOX[s[14] as usize] ^ k[p + 6];
            s[10] = a;
            s[14] = b;

            // row 3, right shift 3
            let a = INV_SBOX[s[3] as usize] ^ k[p + 15];
            s[3] = INV_SBOX[s[7] as usize] ^ k[p + 3];
            s[7] = INV_SBOX[s[11] as usize] ^ k[p + 7];
            s[11] = INV_SBOX[s[15] as usize] ^ k[p + 11];
            s[15] = a;
        }
    }
}
