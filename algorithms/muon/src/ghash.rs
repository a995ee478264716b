//! Table-less GF(2^128) arithmetic and the GHASH accumulator used by GCM.
//!
//! Field elements live in two big-endian 64-bit lanes (see [`crate::words`]).
//! Multiplication is the bit-serial shift-and-conditionally-reduce loop
//! under the polynomial x^128 + x^7 + x^2 + x + 1; no precomputed tables.

use crate::cipher::BLOCK_SIZE;
use crate::words;

/// The reduction constant: 0xE1 in the top byte of the field representation.
const R: u64 = 0xE100_0000_0000_0000;

// =============================================================================
// FIELD ELEMENT
// =============================================================================

/// One element of GF(2^128) under the GCM reduction polynomial.
#[derive(Clone, Copy)]
pub(crate) struct FieldElement([u64; 2]);

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0; 2]);

    pub(crate) fn from_block(block: &[u8; BLOCK_SIZE]) -> Self {
        Self(words::load_be(block))
    }

    pub(crate) fn to_block(self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        words::store_be(self.0, &mut out);
        out
    }

    pub(crate) fn xor_assign(&mut self, other: Self) {
        self.0[0] ^= other.0[0];
        self.0[1] ^= other.0[1];
    }

    /// Multiply `self` by `y`.
    ///
    /// Z starts at zero and V at `self`; for each bit of `y`, most
    /// significant first, V is folded into Z when the bit is set, then V
    /// is shifted right one place with the dropped bit reduced through R.
    pub(crate) fn mul(self, y: Self) -> Self {
        let mut z = [0u64; 2];
        let mut v = self.0;

        for lane in y.0 {
            for bit in (0..64).rev() {
                if (lane >> bit) & 1 == 1 {
                    z[0] ^= v[0];
                    z[1] ^= v[1];
                }
                if words::shift_right_1(&mut v) {
                    v[0] ^= R;
                }
            }
        }

        Self(z)
    }
}

// =============================================================================
// GHASH ACCUMULATOR
// =============================================================================

/// Universal hash over 16-byte chunks: XOR into the running state, then
/// multiply by the hash subkey H.
pub(crate) struct Ghash {
    h: FieldElement,
    y: FieldElement,
}

impl Ghash {
    pub(crate) fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        Self {
            h: FieldElement::from_block(h),
            y: FieldElement::ZERO,
        }
    }

    /// Absorb one full block.
    pub(crate) fn absorb(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.y.xor_assign(FieldElement::from_block(block));
        self.y = self.y.mul(self.h);
    }

    /// Absorb arbitrary-length data, zero-padding the final chunk.
    pub(crate) fn absorb_padded(&mut self, data: &[u8]) {
        for chunk in data.chunks(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            self.absorb(&block);
        }
    }

    /// Fold in the `[aad bits]64 || [payload bits]64` length block and
    /// return the hash state.
    pub(crate) fn finalize(mut self, aad_len: usize, payload_len: usize) -> [u8; BLOCK_SIZE] {
        let mut lens = [0u8; BLOCK_SIZE];
        lens[..8].copy_from_slice(&((aad_len as u64) << 3).to_be_bytes());
        lens[8..].copy_from_slice(&((payload_len as u64) << 3).to_be_bytes());
        self.absorb(&lens);
        self.y.to_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Byte-serial reference multiply: the same algorithm run with 1-byte
    /// machine words. The public implementation must agree bit for bit.
    fn mul_bytewise(x: &[u8; 16], y: &[u8; 16]) -> [u8; 16] {
        let mut z = [0u8; 16];
        let mut v = *x;
        for yb in y {
            let mut yb = *yb;
            for _ in 0..8 {
                if yb & 0x80 != 0 {
                    for (zk, vk) in z.iter_mut().zip(&v) {
                        *zk ^= vk;
                    }
                }
                let dropped = v[15] & 1;
                let mut carry = 0u8;
                for vk in &mut v {
                    let t = *vk;
                    *vk = (t >> 1) | carry;
                    carry = (t & 1) << 7;
                }
                if dropped == 1 {
                    v[0] ^= 0xE1;
                }
                yb <<= 1;
            }
        }
        z
    }

    fn mul_lanes(x: &[u8; 16], y: &[u8; 16]) -> [u8; 16] {
        FieldElement::from_block(x)
            .mul(FieldElement::from_block(y))
            .to_block()
    }

    #[test]
    fn multiply_by_one_is_identity() {
        // The field's multiplicative identity has only the first bit set.
        let mut one = [0u8; 16];
        one[0] = 0x80;
        let x: [u8; 16] = core::array::from_fn(|i| (i * 31) as u8);
        assert_eq!(mul_lanes(&x, &one), x);
        assert_eq!(mul_lanes(&one, &x), x);
    }

    #[test]
    fn multiply_commutes() {
        let a: [u8; 16] = core::array::from_fn(|i| (i * 7 + 3) as u8);
        let b: [u8; 16] = core::array::from_fn(|i| (i * 13 + 1) as u8);
        assert_eq!(mul_lanes(&a, &b), mul_lanes(&b, &a));
    }

    #[test]
    fn lane_multiply_matches_byte_serial() {
        use rand::RngCore;
        let mut rng = rand::thread_rng();

        // Structured corners first, then random elements.
        let mut cases: Vec<([u8; 16], [u8; 16])> = vec![
            ([0u8; 16], [0xFF; 16]),
            ([0xFF; 16], [0xFF; 16]),
            ([0x01; 16], [0x80; 16]),
        ];
        for _ in 0..64 {
            let mut a = [0u8; 16];
            let mut b = [0u8; 16];
            rng.fill_bytes(&mut a);
            rng.fill_bytes(&mut b);
            cases.push((a, b));
        }

        for (a, b) in cases {
            assert_eq!(
                mul_lanes(&a, &b),
                mul_bytewise(&a, &b),
                "word-width divergence for {} x {}",
                hex::encode(a),
                hex::encode(b)
            );
        }
    }

    #[test]
    fn ghash_pads_final_chunk() {
        let h: [u8; 16] = core::array::from_fn(|i| (i + 1) as u8);

        // Absorbing 20 bytes must equal absorbing the same 20 bytes
        // manually padded to 32.
        let data: [u8; 20] = core::array::from_fn(|i| (i * 11) as u8);
        let mut padded = [0u8; 32];
        padded[..20].copy_from_slice(&data);

        let mut g1 = Ghash::new(&h);
        g1.absorb_padded(&data);

        let mut g2 = Ghash::new(&h);
        for chunk in padded.chunks(16) {
            let mut block = [0u8; 16];
            block.copy_from_slice(chunk);
            g2.absorb(&block);
        }

        assert_eq!(g1.finalize(0, 20), g2.finalize(0, 20));
    }
}
