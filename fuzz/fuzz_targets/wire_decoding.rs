#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use djn_paillier::{Ciphertext, Decrypt, FloatingPointCipher, KeyPair, PrivateKey, PublicKey};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());

    // Parsers must reject garbage without panicking
    let _ = PublicKey::from_bytes(data);
    let _ = PrivateKey::from_bytes(data);

    if let Ok(ciphertext) = Ciphertext::from_bytes(data) {
        let reencoded = ciphertext.to_bytes();
        assert_eq!(Ciphertext::from_bytes(&reencoded).unwrap(), ciphertext);
        let _ = keypair.decrypt(&ciphertext);
    }

    if let Ok(cipher) = FloatingPointCipher::<Ciphertext>::from_bytes(data) {
        let _ = keypair.decrypt(cipher.cipher());
        let reencoded = cipher.to_bytes().unwrap();
        assert!(data.starts_with(&reencoded[..2]), "Exponent changed on re-encoding");
    }
});
