use bolero::check;
use muon::{gcm, Aes, Error};

fn context_for(selector: u8) -> Aes {
    let key = [selector; 32];
    let key_len = match selector % 3 {
        0 => 16,
        1 => 24,
        _ => 32,
    };
    match Aes::new(&key[..key_len]) {
        Ok(ctx) => ctx,
        Err(e) => panic!("{e}"),
    }
}

#[test]
fn fuzz_gcm_roundtrip() {
    check!()
        .with_type::<(u8, Vec<u8>, Vec<u8>, Vec<u8>)>()
        .for_each(|(selector, nonce, aad, plaintext)| {
            let ctx = context_for(*selector);

            let (ciphertext, tag) = match gcm::seal(&ctx, nonce, aad, plaintext, 16) {
                Ok(sealed) => sealed,
                Err(e) => panic!("seal must not fail: {e}"),
            };
            assert_eq!(ciphertext.len(), plaintext.len(), "no length expansion");

            match gcm::open(&ctx, nonce, aad, &ciphertext, &tag) {
                Ok(recovered) => assert_eq!(&recovered, plaintext, "round trip"),
                Err(e) => panic!("authentic data must open: {e}"),
            }

            // A truncated ciphertext can never authenticate.
            if !ciphertext.is_empty() {
                assert_eq!(
                    gcm::open(&ctx, nonce, aad, &ciphertext[..ciphertext.len() - 1], &tag),
                    Err(Error::Auth),
                    "truncated ciphertext authenticated"
                );
            }
        });
}
