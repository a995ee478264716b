//! NIST key wrap: deterministic, integrity-checked protection for key
//! material (SP 800-38F / RFC 3394).
//!
//! The working block holds the running chaining value in its upper half
//! and the 64-bit register being transformed in its lower half. Wrapping
//! grows the data by one register; unwrapping recovers the chaining value
//! and checks it against the IV.

use crate::cipher::{Aes, BLOCK_SIZE};
use crate::types::Error;
use crate::words;
use subtle::ConstantTimeEq;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// One key-wrap register: half a cipher block.
pub const SEMIBLOCK_SIZE: usize = BLOCK_SIZE / 2;

/// Default integrity-check IV from the NIST specification.
pub const DEFAULT_IV: [u8; SEMIBLOCK_SIZE] = [0xA6; SEMIBLOCK_SIZE];

const ROUNDS: usize = 6;

/// XOR the step counter into the chaining half of the working block.
#[inline]
fn fold_counter(b: &mut [u8; BLOCK_SIZE], t: u64) {
    let a = words::load64_be(&b[..SEMIBLOCK_SIZE]) ^ t;
    b[..SEMIBLOCK_SIZE].copy_from_slice(&a.to_be_bytes());
}

// =============================================================================
// ROUND CORES
// =============================================================================

/// Run the six wrap rounds over `regs` (the register array, chaining value
/// excluded) and return the final chaining value. Registers are walked
/// low to high with the counter ascending.
fn wrap_rounds(ctx: &Aes, regs: &mut [u8], iv: &[u8; SEMIBLOCK_SIZE]) -> [u8; SEMIBLOCK_SIZE] {
    let mut b = [0u8; BLOCK_SIZE];
    b[..SEMIBLOCK_SIZE].copy_from_slice(iv);

    let mut t: u64 = 1;
    for _ in 0..ROUNDS {
        for reg in regs.chunks_exact_mut(SEMIBLOCK_SIZE) {
            b[SEMIBLOCK_SIZE..].copy_from_slice(reg);
            ctx.encrypt_block(&mut b);
            fold_counter(&mut b, t);
            t += 1;
            reg.copy_from_slice(&b[SEMIBLOCK_SIZE..]);
        }
    }

    let mut a = [0u8; SEMIBLOCK_SIZE];
    a.copy_from_slice(&b[..SEMIBLOCK_SIZE]);
    a
}

/// Run the six unwrap rounds over `regs`, starting from chaining value
/// `a0`, and return the recovered chaining value. Registers are walked
/// high to low with the counter descending from `6 * n`.
fn unwrap_rounds(ctx: &Aes, regs: &mut [u8], a0: &[u8; SEMIBLOCK_SIZE]) -> [u8; SEMIBLOCK_SIZE] {
    let mut b = [0u8; BLOCK_SIZE];
    b[..SEMIBLOCK_SIZE].copy_from_slice(a0);

    let mut t = (ROUNDS * (regs.len() / SEMIBLOCK_SIZE)) as u64;
    for _ in 0..ROUNDS {
        for reg in regs.chunks_exact_mut(SEMIBLOCK_SIZE).rev() {
            b[SEMIBLOCK_SIZE..].copy_from_slice(reg);
            fold_counter(&mut b, t);
            t -= 1;
            ctx.decrypt_block(&mut b);
            reg.copy_from_slice(&b[SEMIBLOCK_SIZE..]);
        }
    }

    let mut a = [0u8; SEMIBLOCK_SIZE];
    a.copy_from_slice(&b[..SEMIBLOCK_SIZE]);
    a
}

fn check_wrap_input(len: usize) -> Result<(), Error> {
    if len == 0 || len % SEMIBLOCK_SIZE != 0 {
        return Err(Error::Length(len));
    }
    Ok(())
}

fn check_unwrap_input(len: usize) -> Result<(), Error> {
    if len < BLOCK_SIZE || len % SEMIBLOCK_SIZE != 0 {
        return Err(Error::Length(len));
    }
    Ok(())
}

// =============================================================================
// PUBLIC SURFACE
// =============================================================================

/// Wrap `input` (N >= 1 registers) into `out`, which must be exactly
/// 8 bytes longer. Pass `None` for the NIST default IV.
///
/// # Errors
/// Returns [`Error::Length`] when `input` is empty or not a multiple of
/// 8 bytes, or when `out` is not `input.len() + 8` bytes.
pub fn wrap_into(
    ctx: &Aes,
    out: &mut [u8],
    input: &[u8],
    iv: Option<&[u8; SEMIBLOCK_SIZE]>,
) -> Result<(), Error> {
    check_wrap_input(input.len())?;
    if out.len() != input.len() + SEMIBLOCK_SIZE {
        return Err(Error::Length(out.len()));
    }

    out[SEMIBLOCK_SIZE..].copy_from_slice(input);
    let (a, regs) = out.split_at_mut(SEMIBLOCK_SIZE);
    a.copy_from_slice(&wrap_rounds(ctx, regs, iv.unwrap_or(&DEFAULT_IV)));
    Ok(())
}

/// Wrap in place: on entry the data occupies `buf[..buf.len() - 8]`; on
/// return the whole buffer holds the wrapped output.
///
/// # Errors
/// Returns [`Error::Length`] when the buffer is shorter than 16 bytes or
/// not a multiple of 8.
pub fn wrap_in_place(
    ctx: &Aes,
    buf: &mut [u8],
    iv: Option<&[u8; SEMIBLOCK_SIZE]>,
) -> Result<(), Error> {
    if buf.len() < BLOCK_SIZE || buf.len() % SEMIBLOCK_SIZE != 0 {
        return Err(Error::Length(buf.len()));
    }

    // Shift the registers up one slot; the move is overlap-safe.
    let data_len = buf.len() - SEMIBLOCK_SIZE;
    buf.copy_within(..data_len, SEMIBLOCK_SIZE);

    let (a, regs) = buf.split_at_mut(SEMIBLOCK_SIZE);
    a.copy_from_slice(&wrap_rounds(ctx, regs, iv.unwrap_or(&DEFAULT_IV)));
    Ok(())
}

/// Unwrap `input` into `out`, which must be exactly 8 bytes shorter.
///
/// # Errors
/// Returns [`Error::Length`] on a sizing violation and
/// [`Error::Integrity`] when the recovered chaining value does not match
/// the IV — the output is untrusted in that case.
pub fn unwrap_into(
    ctx: &Aes,
    out: &mut [u8],
    input: &[u8],
    iv: Option<&[u8; SEMIBLOCK_SIZE]>,
) -> Result<(), Error> {
    check_unwrap_input(input.len())?;
    if out.len() != input.len() - SEMIBLOCK_SIZE {
        return Err(Error::Length(out.len()));
    }

    let mut a0 = [0u8; SEMIBLOCK_SIZE];
    a0.copy_from_slice(&input[..SEMIBLOCK_SIZE]);
    out.copy_from_slice(&input[SEMIBLOCK_SIZE..]);

    let recovered = unwrap_rounds(ctx, out, &a0);
    verify_iv(&recovered, iv.unwrap_or(&DEFAULT_IV))
}

/// Unwrap in place: the whole buffer holds the wrapped input; on success
/// the plaintext registers occupy `buf[..buf.len() - 8]`.
///
/// # Errors
/// As [`unwrap_into`].
pub fn unwrap_in_place(
    ctx: &Aes,
    buf: &mut [u8],
    iv: Option<&[u8; SEMIBLOCK_SIZE]>,
) -> Result<(), Error> {
    check_unwrap_input(buf.len())?;

    let mut a0 = [0u8; SEMIBLOCK_SIZE];
    a0.copy_from_slice(&buf[..SEMIBLOCK_SIZE]);

    // Shift the registers down one slot; the move is overlap-safe.
    let data_len = buf.len() - SEMIBLOCK_SIZE;
    buf.copy_within(SEMIBLOCK_SIZE.., 0);

    let recovered = unwrap_rounds(ctx, &mut buf[..data_len], &a0);
    verify_iv(&recovered, iv.unwrap_or(&DEFAULT_IV))
}

fn verify_iv(recovered: &[u8; SEMIBLOCK_SIZE], iv: &[u8; SEMIBLOCK_SIZE]) -> Result<(), Error> {
    if bool::from(recovered.ct_eq(iv)) {
        Ok(())
    } else {
        Err(Error::Integrity)
    }
}

/// Wrap `input`, returning a buffer 8 bytes longer.
///
/// # Errors
/// As [`wrap_into`].
#[cfg(feature = "alloc")]
pub fn wrap(ctx: &Aes, input: &[u8], iv: Option<&[u8; SEMIBLOCK_SIZE]>) -> Result<Vec<u8>, Error> {
    check_wrap_input(input.len())?;
    let mut out = alloc::vec![0u8; input.len() + SEMIBLOCK_SIZE];
    wrap_into(ctx, &mut out, input, iv)?;
    Ok(out)
}

/// Unwrap `input`, returning a buffer 8 bytes shorter.
///
/// # Errors
/// As [`unwrap_into`].
#[cfg(feature = "alloc")]
pub fn unwrap(
    ctx: &Aes,
    input: &[u8],
    iv: Option<&[u8; SEMIBLOCK_SIZE]>,
) -> Result<Vec<u8>, Error> {
    check_unwrap_input(input.len())?;
    let mut out = alloc::vec![0u8; input.len() - SEMIBLOCK_SIZE];
    unwrap_into(ctx, &mut out, input, iv)?;
    Ok(out)
}
