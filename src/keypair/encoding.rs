// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire encoding of keys.
//!
//! Both key types start with the declared key size as a big-endian `u32`,
//! followed by `u16`-length-prefixed integers in the sign-byte format:
//!
//! - public key: `key_bits ‖ n ‖ h`
//! - private key: `key_bits ‖ λ ‖ p ‖ q`
//!
//! Everything else is recomputed on load.

use num_bigint_dig::{BigInt, BigUint, Sign, ToBigInt};

use super::{KeyPair, PrivateKey, PublicKey};
use crate::error::{Error, Result};
use crate::util::{self, Reader};

fn malformed(what: &str) -> Error {
    Error::InvalidKeyMaterial(format!("malformed {what}"))
}

fn push_field(v: &BigUint, out: &mut Vec<u8>) -> Result<()> {
    util::write_field(&BigInt::from_biguint(Sign::Plus, v.clone()), out)
        .ok_or_else(|| Error::InvalidKeyMaterial("key field exceeds 65535 bytes".into()))
}

/// Reads a field that must be non-negative.
fn read_unsigned(reader: &mut Reader<'_>, what: &str) -> Result<BigUint> {
    let v = reader.read_field().ok_or_else(|| malformed(what))?;
    if v.sign() == Sign::Minus {
        return Err(Error::InvalidKeyMaterial(format!("{what} is negative")));
    }
    v.to_biguint().ok_or_else(|| malformed(what))
}

fn copy_out(bytes: &[u8], out: &mut [u8]) -> Result<usize> {
    util::write_into(out, bytes)
}

impl PublicKey {
    /// Upper bound on the encoded size of a `key_bits` public key.
    pub const fn max_bytes(key_bits: u32) -> usize {
        4 + (3 * key_bits as usize + 7) / 8 + 6
    }

    /// Serialize as `key_bits ‖ n ‖ h`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::max_bytes(self.key_bits));
        out.extend_from_slice(&self.key_bits.to_be_bytes());
        push_field(&self.n, &mut out)?;
        push_field(&self.h, &mut out)?;
        Ok(out)
    }

    /// Serialize into `out`, returning the number of bytes written.
    pub fn write_to(&self, out: &mut [u8]) -> Result<usize> {
        copy_out(&self.to_bytes()?, out)
    }

    /// Load a public key and recompute `n²`, `h_s` and the codec.
    ///
    /// A negative `h` is reduced into `[0, n)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let key_bits = reader.read_u32().ok_or_else(|| malformed("key size"))?;
        let n = read_unsigned(&mut reader, "modulus")?;
        let h = reader.read_field().ok_or_else(|| malformed("h"))?;
        if !reader.is_empty() {
            return Err(Error::InvalidKeyMaterial("trailing bytes after public key".into()));
        }

        let n_signed = n.to_bigint().ok_or_else(|| malformed("modulus"))?;
        if n_signed.sign() == Sign::NoSign {
            return Err(Error::InvalidKeyMaterial("modulus is zero".into()));
        }
        let h = ((h % &n_signed) + &n_signed) % &n_signed;
        let h = h.to_biguint().ok_or_else(|| malformed("h"))?;

        Self::new(key_bits, n, h)
    }
}

impl PrivateKey {
    /// Upper bound on the encoded size of a `key_bits` private key.
    ///
    /// Equals `4 + ⌈2·key_bits / 8⌉ + 9` whenever `key_bits` is a multiple
    /// of 16.
    pub const fn max_bytes(key_bits: u32) -> usize {
        let bits = key_bits as usize;
        4 + (bits + 7) / 8 + 2 * (((bits + 1) / 2 + 7) / 8) + 9
    }

    /// Serialize as `key_bits ‖ λ ‖ p ‖ q`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::max_bytes(self.key_bits));
        out.extend_from_slice(&self.key_bits.to_be_bytes());
        push_field(&self.lambda, &mut out)?;
        push_field(&self.p, &mut out)?;
        push_field(&self.q, &mut out)?;
        Ok(out)
    }

    /// Serialize into `out`, returning the number of bytes written.
    pub fn write_to(&self, out: &mut [u8]) -> Result<usize> {
        copy_out(&self.to_bytes()?, out)
    }

    /// Load a private key and recompute the CRT parameters.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let key_bits = reader.read_u32().ok_or_else(|| malformed("key size"))?;
        let lambda = read_unsigned(&mut reader, "lambda")?;
        let p = read_unsigned(&mut reader, "p")?;
        let q = read_unsigned(&mut reader, "q")?;
        if !reader.is_empty() {
            return Err(Error::InvalidKeyMaterial("trailing bytes after private key".into()));
        }

        Self::new(key_bits, lambda, p, q)
    }
}

impl KeyPair {
    /// Load a key pair from its serialized halves.
    pub fn from_bytes(private_key: &[u8], public_key: &[u8]) -> Result<Self> {
        let secret = PrivateKey::from_bytes(private_key)?;
        let public = PublicKey::from_bytes(public_key)?;
        Self::new(public, secret)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::keypair::tests::test_keypair;

    #[test]
    fn public_key_roundtrip() {
        let pk = test_keypair().public_key();
        let bytes = pk.to_bytes().unwrap();
        assert!(bytes.len() <= PublicKey::max_bytes(pk.key_bits()));

        let restored = PublicKey::from_bytes(&bytes).unwrap();
        assert_eq!(restored.key_bits(), pk.key_bits());
        assert_eq!(restored.n(), pk.n());
        assert_eq!(restored.h(), pk.h());
        assert_eq!(restored.n_squared(), pk.n_squared());
        assert_eq!(restored.h_s(), pk.h_s());
        assert_eq!(restored.codec(), pk.codec());
    }

    #[test]
    fn private_key_roundtrip() {
        let sk = test_keypair().private_key();
        let bytes = sk.to_bytes().unwrap();
        assert!(bytes.len() <= PrivateKey::max_bytes(sk.key_bits()));

        let restored = PrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(restored.lambda(), sk.lambda());
        assert_eq!(restored.p(), sk.p());
        assert_eq!(restored.q(), sk.q());
        assert_eq!(restored.q_squared_inverse, sk.q_squared_inverse);
        assert_eq!(restored.lambda_inverse, sk.lambda_inverse);
        assert!(restored == *sk);
    }

    #[test]
    fn keypair_from_bytes() {
        let keypair = test_keypair();
        let sk = keypair.private_key().to_bytes().unwrap();
        let pk = keypair.public_key().to_bytes().unwrap();
        let restored = KeyPair::from_bytes(&sk, &pk).unwrap();
        assert!(restored == *keypair);
    }

    #[test]
    fn max_sizes_for_standard_keys() {
        assert_eq!(PublicKey::max_bytes(2048), 4 + 768 + 6);
        assert_eq!(PrivateKey::max_bytes(2048), 4 + 512 + 9);
        assert_eq!(PrivateKey::max_bytes(1024), 4 + 256 + 9);
    }

    #[test]
    fn write_to_reports_required_size() {
        let pk = test_keypair().public_key();
        let required = pk.to_bytes().unwrap().len();
        let mut small = vec![0u8; required - 1];
        assert_eq!(
            pk.write_to(&mut small),
            Err(Error::BufferTooSmall { required, capacity: required - 1 })
        );

        let mut buf = vec![0u8; PublicKey::max_bytes(pk.key_bits())];
        assert_eq!(pk.write_to(&mut buf).unwrap(), required);
        assert_eq!(PublicKey::from_bytes(&buf[..required]).unwrap().n(), pk.n());
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let sk = test_keypair().private_key().to_bytes().unwrap();
        for len in [0, 3, 4, 10, sk.len() - 1] {
            assert!(
                matches!(PrivateKey::from_bytes(&sk[..len]), Err(Error::InvalidKeyMaterial(_))),
                "accepted {len} bytes"
            );
        }

        let pk = test_keypair().public_key().to_bytes().unwrap();
        assert!(matches!(PublicKey::from_bytes(&pk[..pk.len() - 1]), Err(Error::InvalidKeyMaterial(_))));
    }

    #[test]
    fn negative_h_is_normalized() {
        let pk = test_keypair().public_key();
        let negative_h = BigInt::from_biguint(Sign::Plus, pk.h().clone())
            - BigInt::from_biguint(Sign::Plus, pk.n().clone());

        let mut bytes = pk.key_bits().to_be_bytes().to_vec();
        push_field(pk.n(), &mut bytes).unwrap();
        util::write_field(&negative_h, &mut bytes).unwrap();

        let restored = PublicKey::from_bytes(&bytes).unwrap();
        assert_eq!(restored.h(), pk.h());
    }

    #[test]
    fn composite_factors_are_rejected() {
        // 9 and 35 are composite; λ = 8·34/2 is consistent with them
        let mut bytes = 16u32.to_be_bytes().to_vec();
        for v in [136u32, 9, 35] {
            push_field(&BigUint::from(v), &mut bytes).unwrap();
        }
        assert!(matches!(PrivateKey::from_bytes(&bytes), Err(Error::InvalidKeyMaterial(_))));
    }

    #[test]
    fn mismatched_halves_are_rejected() {
        let other = crate::KeyPair::generate_with_size(512).unwrap();
        let sk = test_keypair().private_key().to_bytes().unwrap();
        let pk = other.public_key().to_bytes().unwrap();
        assert!(matches!(KeyPair::from_bytes(&sk, &pk), Err(Error::InvalidKeyMaterial(_))));
    }
}
