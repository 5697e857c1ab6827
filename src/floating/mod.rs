// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Homomorphic arithmetic on decimal values.
//!
//! A [`FloatingPointNumber`] is encrypted by encrypting its significand and
//! carrying the exponent in the clear. Additions first bring both operands to
//! the smaller exponent with [`precision_align`]; scalar multiplication adds
//! the exponents.

mod align;
mod cipher;

pub use align::precision_align;
pub use cipher::{CipherBytes, FloatingPointCipher};

use crate::ciphertext::Ciphertext;
use crate::codec::FloatingPointNumber;
use crate::crypto::{Decrypt, Encrypt, Homomorphic};
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PublicKey};

/// Paillier-DJN over fixed-point decimals.
///
/// Stateless; all operations take the key they need.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatingPointPaillier;

impl FloatingPointPaillier {
    /// Encrypt under the public key.
    pub fn encrypt(pk: &PublicKey, value: &FloatingPointNumber) -> Result<FloatingPointCipher> {
        let cipher = pk.encrypt(value.significand())?;
        Ok(FloatingPointCipher::new(cipher, value.exponent()))
    }

    /// Encrypt using the private factors to speed up the exponentiation.
    pub fn encrypt_fast(keypair: &KeyPair, value: &FloatingPointNumber) -> Result<FloatingPointCipher> {
        let cipher = keypair.encrypt(value.significand())?;
        Ok(FloatingPointCipher::new(cipher, value.exponent()))
    }

    pub fn decrypt<K: Decrypt + ?Sized>(
        key: &K,
        cipher: &FloatingPointCipher,
    ) -> Result<FloatingPointNumber> {
        let significand = key.decrypt(cipher.cipher())?;
        Ok(FloatingPointNumber::new(significand, cipher.exponent()))
    }

    /// E(a) ⊕ E(b) at the smaller of the two exponents.
    pub fn add<H: Homomorphic + ?Sized>(
        key: &H,
        a: &FloatingPointCipher,
        b: &FloatingPointCipher,
    ) -> Result<FloatingPointCipher> {
        let (a, b) = Self::aligned(key, a, b)?;
        let cipher = key.add(&a.cipher, &b.cipher)?;
        Ok(FloatingPointCipher::new(cipher, a.exponent))
    }

    /// E(a) ⊖ E(b) at the smaller of the two exponents.
    pub fn sub<H: Homomorphic + ?Sized>(
        key: &H,
        a: &FloatingPointCipher,
        b: &FloatingPointCipher,
    ) -> Result<FloatingPointCipher> {
        let (a, b) = Self::aligned(key, a, b)?;
        let cipher = key.sub(&a.cipher, &b.cipher)?;
        Ok(FloatingPointCipher::new(cipher, a.exponent))
    }

    /// Multiply an encrypted decimal by a plaintext decimal.
    ///
    /// Fails with [`Error::ValueOutOfRange`] if the exponent sum leaves `i16`.
    pub fn scalar_mul<H: Homomorphic + ?Sized>(
        key: &H,
        v: &FloatingPointNumber,
        cipher: &FloatingPointCipher,
    ) -> Result<FloatingPointCipher> {
        let exponent = cipher
            .exponent()
            .checked_add(v.exponent())
            .ok_or(Error::ValueOutOfRange)?;
        let product = key.scalar_mul(v.significand(), cipher.cipher())?;
        Ok(FloatingPointCipher::new(product, exponent))
    }

    /// Upper bound on [`FloatingPointCipher::to_bytes`] for a `key_bits` key.
    pub const fn max_cipher_bytes(key_bits: u32) -> usize {
        FloatingPointCipher::<Ciphertext>::max_bytes(key_bits)
    }

    fn aligned<H: Homomorphic + ?Sized>(
        key: &H,
        a: &FloatingPointCipher,
        b: &FloatingPointCipher,
    ) -> Result<(FloatingPointCipher, FloatingPointCipher)> {
        let mut a = a.clone();
        let mut b = b.clone();
        precision_align(&mut a, &mut b, |scale, c| key.scalar_mul(scale, c))?;
        Ok((a, b))
    }
}
