use bolero::check;
use muon::{wrap, Aes, Error};

#[test]
fn fuzz_wrap_roundtrip() {
    check!()
        .with_type::<(u8, Vec<u8>)>()
        .for_each(|(key_byte, data)| {
            let ctx = match Aes::new(&[*key_byte; 16]) {
                Ok(ctx) => ctx,
                Err(e) => panic!("{e}"),
            };

            match wrap::wrap(&ctx, data, None) {
                Ok(wrapped) => {
                    assert_eq!(wrapped.len(), data.len() + 8);
                    match wrap::unwrap(&ctx, &wrapped, None) {
                        Ok(unwrapped) => assert_eq!(&unwrapped, data, "round trip"),
                        Err(e) => panic!("authentic wrap must unwrap: {e}"),
                    }
                }
                Err(Error::Length(n)) => {
                    assert!(n == 0 || n % 8 != 0, "valid length {n} rejected");
                }
                Err(e) => panic!("unexpected wrap error: {e}"),
            }
        });
}
