//! Aliased-Buffer Tests
//!
//! The in-place variants must produce byte-identical results to the
//! non-aliased variants for every mode; register ordering inside key wrap
//! must never read data it has already overwritten.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use muon::{ecb, gcm, wrap, Aes};
use rand::RngCore;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

#[test]
fn ecb_in_place_matches_copying() {
    let ctx = Aes::new(&[9u8; 16]).expect("key length");

    for len in [15, 16, 33, 64, 100] {
        let data = random_bytes(len);

        let mut copied = vec![0u8; len];
        ecb::encipher_into(&ctx, &mut copied, &data);

        let mut aliased = data.clone();
        ecb::encipher_in_place(&ctx, &mut aliased);
        assert_eq!(aliased, copied, "encipher at length {len}");

        let mut deciphered = vec![0u8; len];
        ecb::decipher_into(&ctx, &mut deciphered, &copied);
        ecb::decipher_in_place(&ctx, &mut aliased);
        assert_eq!(aliased, deciphered, "decipher at length {len}");
    }
}

#[test]
fn gcm_in_place_matches_copying() {
    let ctx = Aes::new(&[3u8; 32]).expect("key length");
    let nonce = random_bytes(12);
    let aad = random_bytes(20);

    for len in [0, 1, 16, 17, 47, 64] {
        let plaintext = random_bytes(len);

        let (ciphertext, tag) = gcm::seal(&ctx, &nonce, &aad, &plaintext, 16).expect("seal");

        let mut buf = plaintext.clone();
        let mut tag_in_place = [0u8; 16];
        gcm::seal_in_place(&ctx, &nonce, &aad, &mut buf, &mut tag_in_place).expect("seal");
        assert_eq!(buf, ciphertext, "in-place ciphertext at length {len}");
        assert_eq!(tag_in_place[..], tag[..], "in-place tag at length {len}");

        gcm::open_in_place(&ctx, &nonce, &aad, &mut buf, &tag_in_place).expect("open");
        assert_eq!(buf, plaintext, "in-place open at length {len}");
    }
}

#[test]
fn wrap_in_place_matches_copying() {
    let ctx = Aes::new(&[0xABu8; 24]).expect("key length");

    for registers in 1..=4 {
        let data = random_bytes(registers * 8);

        let wrapped = wrap::wrap(&ctx, &data, None).expect("wrap");

        // In place: data sits at the front of an oversized buffer.
        let mut buf = vec![0u8; data.len() + 8];
        buf[..data.len()].copy_from_slice(&data);
        wrap::wrap_in_place(&ctx, &mut buf, None).expect("wrap in place");
        assert_eq!(buf, wrapped, "{registers} registers wrapped in place");
    }
}

#[test]
fn unwrap_in_place_matches_copying() {
    let ctx = Aes::new(&[0xABu8; 24]).expect("key length");

    for registers in 2..=4 {
        let data = random_bytes(registers * 8);
        let wrapped = wrap::wrap(&ctx, &data, None).expect("wrap");

        let unwrapped = wrap::unwrap(&ctx, &wrapped, None).expect("unwrap");

        let mut buf = wrapped.clone();
        wrap::unwrap_in_place(&ctx, &mut buf, None).expect("unwrap in place");
        assert_eq!(
            buf[..data.len()],
            unwrapped[..],
            "{registers} registers unwrapped in place"
        );
        assert_eq!(buf[..data.len()], data[..], "plaintext recovered");
    }
}
