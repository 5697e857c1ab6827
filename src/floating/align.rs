// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigInt;
use tracing::trace;

use super::FloatingPointCipher;
use crate::codec::power_of_ten;
use crate::error::Result;

/// Bring two ciphers to a common exponent.
///
/// The cipher with the larger exponent is multiplied homomorphically by
/// `10^diff` through `scalar_mul` and takes the smaller exponent, so both
/// encrypt their values at the same scale. Nothing changes when the
/// exponents already match or when `scalar_mul` fails.
pub fn precision_align<C, F>(
    a: &mut FloatingPointCipher<C>,
    b: &mut FloatingPointCipher<C>,
    mut scalar_mul: F,
) -> Result<()>
where
    F: FnMut(&BigInt, &C) -> Result<C>,
{
    let diff = i32::from(a.exponent) - i32::from(b.exponent);
    if diff == 0 {
        return Ok(());
    }

    let (larger, smaller) = if diff > 0 { (a, b) } else { (b, a) };
    // |diff| ≤ 65535
    let scale = power_of_ten(diff.unsigned_abs() as u16);
    trace!(from = larger.exponent, to = smaller.exponent, "rescaling cipher");

    larger.cipher = scalar_mul(&scale, &larger.cipher)?;
    larger.exponent = smaller.exponent;
    Ok(())
}
