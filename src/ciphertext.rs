// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::{BigUint, Sign};

use crate::error::{Error, Result};
use crate::floating::CipherBytes;
use crate::util;

/// An element of Z_{n²} produced by encryption or a homomorphic operation.
///
/// The ciphertext does not record which key produced it. Combining
/// ciphertexts from different keys yields garbage on decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Upper bound on the encoded size for a `key_bits` modulus.
    ///
    /// A ciphertext is below n², so its magnitude takes at most
    /// `⌈2·key_bits / 8⌉` bytes, plus the sign byte.
    pub const fn max_bytes(key_bits: u32) -> usize {
        (2 * key_bits as usize + 7) / 8 + 1
    }

    /// Exact length of [`Ciphertext::to_bytes`].
    pub fn encoded_len(&self) -> usize {
        // sign byte plus magnitude; zero has an empty magnitude
        1 + (self.value.bits() + 7) / 8
    }

    /// Sign-prefixed big-endian encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        util::unsigned_to_signed_bytes(&self.value)
    }

    /// Encode into `out`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::BufferTooSmall`] if `out` cannot hold [`Ciphertext::encoded_len`] bytes.
    pub fn write_to(&self, out: &mut [u8]) -> Result<usize> {
        let required = self.encoded_len();
        if out.len() < required {
            return Err(Error::BufferTooSmall { required, capacity: out.len() });
        }
        util::write_into(out, &self.to_bytes())
    }

    /// Parse the sign-prefixed encoding.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCiphertext`] on empty input, an unknown sign byte or a
    /// negative value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value = util::read_signed(bytes).ok_or(Error::InvalidCiphertext)?;
        if value.sign() == Sign::Minus {
            return Err(Error::InvalidCiphertext);
        }
        let value = value.to_biguint().ok_or(Error::InvalidCiphertext)?;
        Ok(Self { value })
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl TryFrom<&[u8]> for Ciphertext {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl CipherBytes for Ciphertext {
    fn to_bytes(&self) -> Vec<u8> {
        Ciphertext::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ciphertext::from_bytes(bytes)
    }
}
