// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod crt;
mod decrypt;
mod encrypt;
mod homomorphic;

pub use encrypt::randomness_bytes_len;

use num_bigint_dig::{BigInt, BigUint};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Encrypts signed integers.
pub trait Encrypt {
    /// Encrypt `value` with fresh randomness from the operating system.
    ///
    /// `value` must be representable by the key's signed codec, i.e. lie in
    /// `[-(n - ⌊2n/3⌋), ⌊n/3⌋]`.
    fn encrypt(&self, value: &BigInt) -> Result<Ciphertext> {
        self.encrypt_with_randomness(value).map(|(ciphertext, _)| ciphertext)
    }

    /// Encrypt `value` and also return the randomness `r` that was used.
    ///
    /// `r` is uniform over the non-zero values of at most `⌈key_bits/2⌉`
    /// bits, so it fits in [`randomness_bytes_len`] bytes but its top bit is
    /// not forced.
    fn encrypt_with_randomness(&self, value: &BigInt) -> Result<(Ciphertext, BigUint)> {
        self.encrypt_with_rng(value, &mut OsRng)
    }

    /// Encrypt `value` drawing `r` from a caller-supplied CSPRNG.
    fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        value: &BigInt,
        rng: &mut R,
    ) -> Result<(Ciphertext, BigUint)>;
}

/// Recovers the signed integer behind a ciphertext.
pub trait Decrypt {
    /// Decrypt `ciphertext`.
    ///
    /// Fails with [`crate::Error::InvalidCiphertext`] for values outside
    /// `[1, n²)` or not produced under this key, and with
    /// [`crate::Error::ValueOutOfRange`] when the plaintext overflowed the
    /// signed range.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigInt>;
}

/// Operations on ciphertexts that need only the public key.
///
/// Results are deterministic and do not re-randomize.
pub trait Homomorphic {
    /// E(a) · E(b) = E(a + b)
    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext>;

    /// E(a) · E(b)⁻¹ = E(a − b)
    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext>;

    /// E(m)^v = E(v · m)
    fn scalar_mul(&self, v: &BigInt, c: &Ciphertext) -> Result<Ciphertext>;
}

#[cfg(test)]
mod test_encryption {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::Error;
    use crate::keypair::tests::test_keypair;
    use crate::keypair::KeyPair;

    use num_traits::{One, Zero};
    use std::sync::OnceLock;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn roundtrip_public_key_encryption() {
        let keypair = test_keypair();
        for v in [0i64, 1, -1, 42, -42, 12323423434, -2342342344, i64::MAX, i64::MIN] {
            let c = keypair.public_key().encrypt(&int(v)).unwrap();
            assert_eq!(keypair.decrypt(&c).unwrap(), int(v), "value {v}");
        }
    }

    #[test]
    fn roundtrip_crt_encryption() {
        let keypair = test_keypair();
        for v in [0i64, 7, -7, 99999999999, -99999999999] {
            let c = keypair.encrypt(&int(v)).unwrap();
            assert_eq!(keypair.private_key().decrypt(&c).unwrap(), int(v));
        }
    }

    #[test]
    fn crt_and_direct_paths_agree_for_fixed_randomness() {
        let keypair = test_keypair();
        let value = int(-123456789);

        let (c, r) = keypair.encrypt_with_randomness(&value).unwrap();
        let pk = keypair.public_key();
        let m = pk.codec().encode(&value).unwrap();
        let g_m = (&m * pk.n() + BigUint::one()) % pk.n_squared();
        let expected = (g_m * pk.h_s().modpow(&r, pk.n_squared())) % pk.n_squared();
        assert_eq!(c.value(), &expected);
    }

    #[test]
    fn randomness_has_expected_size() {
        let keypair = test_keypair();
        let (_, r) = keypair.public_key().encrypt_with_randomness(&int(5)).unwrap();
        assert!(!r.is_zero());
        assert!(r.bits() <= 512);
        assert!(r.to_bytes_be().len() <= randomness_bytes_len(1024));
        assert_eq!(randomness_bytes_len(2048), 128);
        assert_eq!(randomness_bytes_len(1025), 65);
    }

    #[test]
    fn encryption_is_probabilistic() {
        let pk = test_keypair().public_key();
        let a = pk.encrypt(&int(1)).unwrap();
        let b = pk.encrypt(&int(1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn out_of_range_plaintext_is_rejected() {
        let pk = test_keypair().public_key();
        let n = BigInt::from_biguint(num_bigint_dig::Sign::Plus, pk.n().clone());
        assert_eq!(pk.encrypt(&n), Err(Error::ValueOutOfRange));

        let middle = BigInt::from_biguint(num_bigint_dig::Sign::Plus, pk.codec().max_positive() + BigUint::one());
        assert_eq!(pk.encrypt(&middle), Err(Error::ValueOutOfRange));
        assert_eq!(pk.encrypt(&-n), Err(Error::ValueOutOfRange));
    }

    #[test]
    fn malformed_ciphertexts_are_rejected() {
        let keypair = test_keypair();
        let pk = keypair.public_key();

        assert_eq!(keypair.decrypt(&Ciphertext::new(BigUint::zero())), Err(Error::InvalidCiphertext));
        assert_eq!(
            keypair.decrypt(&Ciphertext::new(pk.n_squared().clone())),
            Err(Error::InvalidCiphertext)
        );
        // shares the factor p with n², so c^λ - 1 is not a multiple of n
        let non_unit = Ciphertext::new(keypair.private_key().p().clone());
        assert_eq!(keypair.decrypt(&non_unit), Err(Error::InvalidCiphertext));
    }

    #[test]
    fn homomorphic_operations_with_signed_operands() {
        let keypair = test_keypair();
        let pk = keypair.public_key();

        for (a, b) in [(15i64, 27i64), (-15, 27), (15, -27), (-15, -27), (0, -1)] {
            let ca = pk.encrypt(&int(a)).unwrap();
            let cb = pk.encrypt(&int(b)).unwrap();

            let sum = pk.add(&ca, &cb).unwrap();
            assert_eq!(keypair.decrypt(&sum).unwrap(), int(a + b));

            let diff = pk.sub(&ca, &cb).unwrap();
            assert_eq!(keypair.decrypt(&diff).unwrap(), int(a - b));

            let scaled = pk.scalar_mul(&int(b), &ca).unwrap();
            assert_eq!(keypair.decrypt(&scaled).unwrap(), int(a * b));
        }
    }

    #[test]
    fn keypair_scalar_mul_matches_public_key() {
        let keypair = test_keypair();
        let c = keypair.encrypt(&int(-31)).unwrap();
        let via_public = keypair.public_key().scalar_mul(&int(-3), &c).unwrap();
        let via_crt = keypair.scalar_mul(&int(-3), &c).unwrap();
        assert_eq!(via_public, via_crt);
        assert_eq!(keypair.decrypt(&via_crt).unwrap(), int(93));
    }

    #[test]
    fn scalar_out_of_range_is_rejected() {
        let keypair = test_keypair();
        let c = keypair.encrypt(&int(1)).unwrap();
        let n = BigInt::from_biguint(num_bigint_dig::Sign::Plus, keypair.public_key().n().clone());
        assert_eq!(keypair.public_key().scalar_mul(&n, &c), Err(Error::ValueOutOfRange));
    }

    #[test]
    fn sub_rejects_non_invertible_ciphertext() {
        let keypair = test_keypair();
        let c = keypair.encrypt(&int(1)).unwrap();
        let non_unit = Ciphertext::new(keypair.private_key().p().clone());
        assert_eq!(keypair.public_key().sub(&c, &non_unit), Err(Error::InvalidCiphertext));
    }

    #[test]
    fn additive_overflow_surfaces_at_decrypt() {
        let keypair = test_keypair();
        let pk = keypair.public_key();
        let max = BigInt::from_biguint(num_bigint_dig::Sign::Plus, pk.codec().max_positive().clone());

        let c_max = pk.encrypt(&max).unwrap();
        let c_one = pk.encrypt(&int(1)).unwrap();
        let sum = pk.add(&c_max, &c_one).unwrap();
        assert_eq!(keypair.decrypt(&sum), Err(Error::ValueOutOfRange));
    }

    fn keypair_2048() -> &'static KeyPair {
        static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
        KEYPAIR.get_or_init(|| KeyPair::generate().unwrap())
    }

    fn check_scenario(keypair: &KeyPair, m1: i64, m2: i64, v: i64) {
        let pk = keypair.public_key();
        let (m1, m2, v) = (int(m1), int(m2), int(v));

        let c1 = pk.encrypt(&m1).unwrap();
        let c2 = keypair.encrypt(&m2).unwrap();
        assert_eq!(keypair.decrypt(&c1).unwrap(), m1);
        assert_eq!(keypair.decrypt(&c2).unwrap(), m2);

        let sum = pk.add(&c1, &c2).unwrap();
        assert_eq!(keypair.decrypt(&sum).unwrap(), &m1 + &m2);

        let diff = pk.sub(&c1, &c2).unwrap();
        assert_eq!(keypair.decrypt(&diff).unwrap(), &m1 - &m2);

        let product = pk.scalar_mul(&v, &c1).unwrap();
        assert_eq!(keypair.decrypt(&product).unwrap(), &v * &m1);
    }

    #[test]
    fn scenario_2048_bit_key() {
        let keypair = keypair_2048();
        assert_eq!(keypair.public_key().n().bits(), 2048);

        check_scenario(keypair, 12323423434, 2342342344, 21334234234);
        check_scenario(keypair, -12323423434, 2342342344, 21334234234);

        let pk = keypair.public_key();
        let c1 = pk.encrypt(&int(12323423434)).unwrap();
        let c2 = pk.encrypt(&int(2342342344)).unwrap();
        assert_eq!(keypair.decrypt(&pk.add(&c1, &c2).unwrap()).unwrap(), int(14665765778));
        assert_eq!(keypair.decrypt(&pk.sub(&c1, &c2).unwrap()).unwrap(), int(9981081090));
    }
}
