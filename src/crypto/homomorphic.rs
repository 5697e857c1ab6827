// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigInt;
use num_traits::Zero;

use super::Homomorphic;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PublicKey};
use crate::util;

impl PublicKey {
    /// Rejects values outside `[1, n²)`.
    fn check_ciphertext(&self, c: &Ciphertext) -> Result<()> {
        if c.value().is_zero() || c.value() >= &self.n_squared {
            return Err(Error::InvalidCiphertext);
        }
        Ok(())
    }
}

impl Homomorphic for PublicKey {
    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(a)?;
        self.check_ciphertext(b)?;
        Ok(Ciphertext::new((a.value() * b.value()) % &self.n_squared))
    }

    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(a)?;
        self.check_ciphertext(b)?;
        let b_inverse = util::mod_inverse(b.value(), &self.n_squared).ok_or(Error::InvalidCiphertext)?;
        Ok(Ciphertext::new((a.value() * b_inverse) % &self.n_squared))
    }

    fn scalar_mul(&self, v: &BigInt, c: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(c)?;
        // negative scalars become n − |v|, so c^(n−|v|) = E(−|v|·m)
        let exponent = self.codec.encode(v)?;
        Ok(Ciphertext::new(c.value().modpow(&exponent, &self.n_squared)))
    }
}

impl Homomorphic for KeyPair {
    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.public_key().add(a, b)
    }

    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.public_key().sub(a, b)
    }

    /// Uses the CRT for the exponentiation; agrees with the public-key path
    /// for every ciphertext that is a unit mod n².
    fn scalar_mul(&self, v: &BigInt, c: &Ciphertext) -> Result<Ciphertext> {
        let pk = self.public_key();
        pk.check_ciphertext(c)?;
        let exponent = pk.codec.encode(v)?;
        Ok(Ciphertext::new(self.private_key().power_mod_n_squared_crt(c.value(), &exponent)))
    }
}
