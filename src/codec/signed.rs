// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::error::{Error, Result};

/// Folds the residue ring Z_n onto a signed integer range.
///
/// Residues in `[0, n/3]` are non-negative values, residues in `[2n/3, n)`
/// represent `v - n`. The middle third is unrepresentable: a residue landing
/// there means the sign is ambiguous, which is how homomorphic overflow is
/// detected at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedNumberCodec {
    n: BigUint,
    /// ⌊n/3⌋
    max_positive: BigUint,
    /// ⌊2n/3⌋
    negative_zero: BigUint,
}

impl SignedNumberCodec {
    /// Build the codec for modulus `n`.
    pub fn new(n: &BigUint) -> Self {
        let three = BigUint::from(3u32);
        let max_positive = n / &three;
        let negative_zero = (n << 1) / &three;
        Self { n: n.clone(), max_positive, negative_zero }
    }

    /// Map a signed value to its residue mod n.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] unless `-(n - negative_zero) <= v <= max_positive`.
    pub fn encode(&self, v: &BigInt) -> Result<BigUint> {
        match v.sign() {
            Sign::NoSign => Ok(BigUint::zero()),
            Sign::Plus => {
                let magnitude = v.to_biguint().ok_or(Error::ValueOutOfRange)?;
                if magnitude > self.max_positive {
                    return Err(Error::ValueOutOfRange);
                }
                Ok(magnitude)
            }
            Sign::Minus => {
                let magnitude = (-v).to_biguint().ok_or(Error::ValueOutOfRange)?;
                if magnitude > &self.n - &self.negative_zero {
                    return Err(Error::ValueOutOfRange);
                }
                Ok(&self.n - magnitude)
            }
        }
    }

    /// Restore the signed value of a residue.
    ///
    /// # Errors
    ///
    /// [`Error::ValueOutOfRange`] if `v >= n` or `v` lies in the middle third.
    pub fn decode(&self, v: &BigUint) -> Result<BigInt> {
        self.check(v)?;
        if v <= &self.max_positive {
            Ok(BigInt::from_biguint(Sign::Plus, v.clone()))
        } else {
            Ok(BigInt::from_biguint(Sign::Plus, v.clone())
                - BigInt::from_biguint(Sign::Plus, self.n.clone()))
        }
    }

    fn check(&self, v: &BigUint) -> Result<()> {
        if v >= &self.n {
            return Err(Error::ValueOutOfRange);
        }
        if v > &self.max_positive && v < &self.negative_zero {
            return Err(Error::ValueOutOfRange);
        }
        Ok(())
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn max_positive(&self) -> &BigUint {
        &self.max_positive
    }

    pub fn negative_zero(&self) -> &BigUint {
        &self.negative_zero
    }
}
