#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigInt;
use std::sync::OnceLock;

use djn_paillier::{Decrypt, Encrypt, Homomorphic, KeyPair};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let public_key = keypair.public_key();

    // Small operands so sums and products stay within the signed range
    let read = |i: usize| i32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
    let m1 = BigInt::from(read(0));
    let m2 = BigInt::from(read(4));
    let v = BigInt::from(read(8));

    let c1 = public_key.encrypt(&m1).unwrap();
    let c2 = keypair.encrypt(&m2).unwrap();

    let sum = public_key.add(&c1, &c2).unwrap();
    assert_eq!(keypair.decrypt(&sum).unwrap(), &m1 + &m2);

    let diff = public_key.sub(&c1, &c2).unwrap();
    assert_eq!(keypair.decrypt(&diff).unwrap(), &m1 - &m2);

    let product = public_key.scalar_mul(&v, &c1).unwrap();
    assert_eq!(keypair.decrypt(&product).unwrap(), &v * &m1);

    let crt_product = keypair.scalar_mul(&v, &c1).unwrap();
    assert_eq!(crt_product, product, "CRT scalar multiplication diverged");
});
