#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::{BigInt, Sign};
use std::sync::OnceLock;

use djn_paillier::{Decrypt, Encrypt, Error, KeyPair};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());

    let Some((&sign, magnitude)) = data.split_first() else {
        return;
    };
    let sign = if sign & 1 == 1 { Sign::Minus } else { Sign::Plus };
    let value = BigInt::from_bytes_be(sign, magnitude);

    // Plain public-key path
    let ciphertext = match keypair.public_key().encrypt(&value) {
        Ok(ct) => ct,
        Err(Error::ValueOutOfRange) => return,
        Err(err) => panic!("Unexpected encryption error: {err}"),
    };
    let decrypted = keypair.decrypt(&ciphertext).expect("Decryption failed for valid ciphertext");
    assert_eq!(decrypted, value, "Public-key roundtrip mismatch");

    // CRT path
    let ciphertext = keypair.encrypt(&value).expect("CRT encryption rejected a representable value");
    let decrypted = keypair.decrypt(&ciphertext).expect("Decryption failed for CRT ciphertext");
    assert_eq!(decrypted, value, "CRT roundtrip mismatch");
});
