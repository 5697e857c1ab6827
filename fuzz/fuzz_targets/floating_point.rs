#![no_main]

use libfuzzer_sys::fuzz_target;
use num_traits::Zero;
use std::sync::OnceLock;

use djn_paillier::{FloatingPointNumber, FloatingPointPaillier, KeyPair};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = text.parse::<FloatingPointNumber>() else {
        return;
    };

    // Display must denote the same number
    let rendered: FloatingPointNumber = value.to_string().parse().expect("Display output must parse");
    assert!((&rendered - &value).significand().is_zero(), "Display changed the value of {text:?}");

    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let Ok(cipher) = FloatingPointPaillier::encrypt(keypair.public_key(), &value) else {
        return;
    };
    let decrypted = FloatingPointPaillier::decrypt(keypair, &cipher).unwrap();
    assert_eq!(decrypted, value, "Floating-point roundtrip mismatch");
});
