// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Big-integer helpers shared by the key, ciphertext and codec layers.
//!
//! Integers cross the wire as one sign byte (`0x00` non-negative, `0xFF`
//! negative) followed by the big-endian magnitude. Zero has an empty
//! magnitude.

pub(crate) mod prime;

use num_bigint_dig::{BigInt, BigUint, ModInverse, Sign, ToBigInt};
use num_traits::Zero;

use crate::error::{Error, Result};

const SIGN_NON_NEGATIVE: u8 = 0x00;
const SIGN_NEGATIVE: u8 = 0xFF;

/// Computes a⁻¹ mod m, or `None` when `a` is not a unit.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let inv = a.mod_inverse(m)?;
    // ModInverse may hand back a negative representative.
    let m = m.to_bigint()?;
    let inv = ((inv % &m) + &m) % &m;
    inv.to_biguint()
}

/// Number of bytes [`write_signed`] emits for `v`.
pub(crate) fn signed_len(v: &BigInt) -> usize {
    if v.is_zero() {
        1
    } else {
        1 + v.to_bytes_be().1.len()
    }
}

/// Appends the sign-prefixed big-endian encoding of `v`.
pub(crate) fn write_signed(v: &BigInt, out: &mut Vec<u8>) {
    if v.is_zero() {
        out.push(SIGN_NON_NEGATIVE);
        return;
    }
    let (sign, magnitude) = v.to_bytes_be();
    out.push(if sign == Sign::Minus { SIGN_NEGATIVE } else { SIGN_NON_NEGATIVE });
    out.extend_from_slice(&magnitude);
}

/// Parses a sign-prefixed big-endian integer. `None` on empty input or an
/// unknown sign byte.
pub(crate) fn read_signed(bytes: &[u8]) -> Option<BigInt> {
    let (&flag, magnitude) = bytes.split_first()?;
    let sign = match flag {
        SIGN_NON_NEGATIVE => Sign::Plus,
        SIGN_NEGATIVE => Sign::Minus,
        _ => return None,
    };
    Some(BigInt::from_biguint(sign, BigUint::from_bytes_be(magnitude)))
}

/// Sign-prefixed encoding of a non-negative integer.
pub(crate) fn unsigned_to_signed_bytes(v: &BigUint) -> Vec<u8> {
    let mut out = Vec::new();
    write_signed(&BigInt::from_biguint(Sign::Plus, v.clone()), &mut out);
    out
}

/// Copies `data` into the caller's buffer without growing it.
///
/// Returns the number of bytes written.
pub(crate) fn write_into(out: &mut [u8], data: &[u8]) -> Result<usize> {
    if out.len() < data.len() {
        return Err(Error::BufferTooSmall { required: data.len(), capacity: out.len() });
    }
    out[..data.len()].copy_from_slice(data);
    Ok(data.len())
}

/// Appends a `u16` length prefix followed by the sign-prefixed encoding of `v`.
pub(crate) fn write_field(v: &BigInt, out: &mut Vec<u8>) -> Option<()> {
    let len = u16::try_from(signed_len(v)).ok()?;
    out.extend_from_slice(&len.to_be_bytes());
    write_signed(v, out);
    Some(())
}

/// Forward-only cursor over big-endian wire data.
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        let slice = self.bytes.get(self.offset..end)?;
        self.offset = end;
        Some(slice)
    }

    pub(crate) fn read_u32(&mut self) -> Option<u32> {
        let raw = self.take(4)?;
        Some(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    pub(crate) fn read_u16(&mut self) -> Option<u16> {
        let raw = self.take(2)?;
        Some(u16::from_be_bytes([raw[0], raw[1]]))
    }

    pub(crate) fn read_i16(&mut self) -> Option<i16> {
        let raw = self.take(2)?;
        Some(i16::from_be_bytes([raw[0], raw[1]]))
    }

    /// Reads a `u16`-length-prefixed byte string.
    pub(crate) fn read_prefixed(&mut self) -> Option<&'a [u8]> {
        let len = self.read_u16()? as usize;
        self.take(len)
    }

    /// Reads a `u16`-length-prefixed signed integer.
    pub(crate) fn read_field(&mut self) -> Option<BigInt> {
        read_signed(self.read_prefixed()?)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.offset >= self.bytes.len()
    }
}
