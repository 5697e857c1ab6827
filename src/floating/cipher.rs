// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::util::{self, Reader};

/// Byte encoding of a ciphertext that can travel inside a
/// [`FloatingPointCipher`].
pub trait CipherBytes: Sized {
    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// An encrypted significand paired with its plaintext decimal exponent.
///
/// Wire format: `exponent:i16 ‖ length:u16 ‖ cipher`, all big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingPointCipher<C = Ciphertext> {
    pub(crate) cipher: C,
    pub(crate) exponent: i16,
}

/// Bytes taken by the exponent and length header.
const HEADER_LEN: usize = 4;

impl<C> FloatingPointCipher<C> {
    pub fn new(cipher: C, exponent: i16) -> Self {
        Self { cipher, exponent }
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn exponent(&self) -> i16 {
        self.exponent
    }

    pub fn into_parts(self) -> (C, i16) {
        (self.cipher, self.exponent)
    }
}

impl<C: CipherBytes> FloatingPointCipher<C> {
    /// Serialize the envelope.
    ///
    /// Fails with [`Error::InvalidCiphertext`] if the cipher encoding does not
    /// fit the `u16` length field.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cipher = self.cipher.to_bytes();
        let len = u16::try_from(cipher.len()).map_err(|_| Error::InvalidCiphertext)?;

        let mut out = Vec::with_capacity(HEADER_LEN + cipher.len());
        out.extend_from_slice(&self.exponent.to_be_bytes());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&cipher);
        Ok(out)
    }

    /// Serialize into `out`, returning the number of bytes written.
    pub fn write_to(&self, out: &mut [u8]) -> Result<usize> {
        util::write_into(out, &self.to_bytes()?)
    }

    /// Parse the envelope. Bytes past the declared cipher length are ignored,
    /// so a buffer sized by [`FloatingPointCipher::max_bytes`] can be passed
    /// as is.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let exponent = reader.read_i16().ok_or(Error::InvalidCiphertext)?;
        let cipher = reader.read_prefixed().ok_or(Error::InvalidCiphertext)?;
        Ok(Self { cipher: C::from_bytes(cipher)?, exponent })
    }
}

impl FloatingPointCipher<Ciphertext> {
    /// Upper bound on the encoded size for a `key_bits` key.
    pub const fn max_bytes(key_bits: u32) -> usize {
        Ciphertext::max_bytes(key_bits) + HEADER_LEN
    }
}
