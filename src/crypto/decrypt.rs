// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigInt, BigUint};
use num_traits::{One, Zero};

use super::Decrypt;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PrivateKey};

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigInt> {
        let c = ciphertext.value();
        if c.is_zero() || c >= &self.n_squared {
            return Err(Error::InvalidCiphertext);
        }

        // x = c^λ mod n² = 1 + (m·λ mod n)·n
        let x = self.power_mod_n_squared_crt(c, &self.lambda);
        if x.is_zero() {
            return Err(Error::InvalidCiphertext);
        }

        // L(x) = (x − 1) / n, which must be exact
        let x_minus_1 = x - BigUint::one();
        if !(&x_minus_1 % &self.n).is_zero() {
            return Err(Error::InvalidCiphertext);
        }
        let u = x_minus_1 / &self.n;

        let m = (u * &self.lambda_inverse) % &self.n;
        self.codec.decode(&m)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigInt> {
        self.private_key().decrypt(ciphertext)
    }
}
