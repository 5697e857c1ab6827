// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use num_bigint_dig::{BigInt, Sign};
use num_traits::{pow, Signed, Zero};

use crate::error::{Error, Result};

/// A decimal value `significand × 10^exponent`.
///
/// Equality is structural: `(20, -1)` and `(2, 0)` denote the same number but
/// compare unequal, matching how encrypted values carry their scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingPointNumber {
    significand: BigInt,
    exponent: i16,
}

impl FloatingPointNumber {
    pub fn new(significand: BigInt, exponent: i16) -> Self {
        Self { significand, exponent }
    }

    pub fn significand(&self) -> &BigInt {
        &self.significand
    }

    pub fn exponent(&self) -> i16 {
        self.exponent
    }

    /// Represent an integer, moving trailing decimal zeros into the exponent.
    ///
    /// `200` becomes `(2, 2)`; zero becomes `(0, 0)`.
    pub fn from_integer(value: BigInt) -> Self {
        let ten = BigInt::from(10u32);
        let mut significand = value;
        let mut exponent = 0i16;
        while !significand.is_zero() && exponent < i16::MAX && (&significand % &ten).is_zero() {
            significand = significand / &ten;
            exponent += 1;
        }
        Self { significand, exponent }
    }

    /// Integer part of the value, truncating toward zero.
    pub fn to_integer(&self) -> BigInt {
        let scale = power_of_ten(self.exponent.unsigned_abs());
        if self.exponent >= 0 {
            &self.significand * scale
        } else {
            // BigInt division truncates toward zero
            &self.significand / scale
        }
    }

    /// Nearest `f64`; lossy for significands beyond 53 bits.
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string().parse::<f64>().ok()
    }

    /// Rescale to a smaller `exponent` without changing the value.
    fn rescaled(&self, exponent: i16) -> BigInt {
        let diff = (i32::from(self.exponent) - i32::from(exponent)) as u16;
        &self.significand * power_of_ten(diff)
    }
}

/// 10^k as a signed big integer.
pub(crate) fn power_of_ten(k: u16) -> BigInt {
    pow(BigInt::from(10u32), usize::from(k))
}

impl FromStr for FloatingPointNumber {
    type Err = Error;

    /// Parse a decimal string such as `-12.045` or `3.5e-2`.
    ///
    /// The exponent is minus the number of digits after the decimal point,
    /// adjusted by an optional `e`/`E` suffix. Every digit is kept, so
    /// `"2.50"` parses to `(250, -2)`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidNumber(s.to_string());

        let (mantissa, suffix) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&s[..at], Some(&s[at + 1..])),
            None => (s, None),
        };

        let (negative, unsigned) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };

        let (integral, fractional) = match unsigned.split_once('.') {
            Some((integral, fractional)) => (integral, fractional),
            None => (unsigned, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integral.is_empty() && fractional.is_empty() {
            return Err(invalid());
        }
        if !is_digits(integral) || !is_digits(fractional) {
            return Err(invalid());
        }

        let digits = format!("{integral}{fractional}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let significand = if negative { -magnitude } else { magnitude };

        let shift = match suffix {
            Some(exp) if !exp.is_empty() => exp.parse::<i64>().map_err(|_| {
                // well-formed but too large for any exponent
                let digits = exp.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(exp);
                if !digits.is_empty() && is_digits(digits) {
                    Error::ValueOutOfRange
                } else {
                    invalid()
                }
            })?,
            Some(_) => return Err(invalid()),
            None => 0,
        };

        let fraction_len = i64::try_from(fractional.len()).map_err(|_| Error::ValueOutOfRange)?;
        let exponent = shift
            .checked_sub(fraction_len)
            .and_then(|e| i16::try_from(e).ok())
            .ok_or(Error::ValueOutOfRange)?;

        Ok(Self { significand, exponent })
    }
}

impl fmt::Display for FloatingPointNumber {
    /// Exact decimal rendering; negative exponents keep every fractional digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent >= 0 {
            return write!(f, "{}", self.to_integer());
        }

        let digits = self.significand.abs().to_str_radix(10);
        let scale = usize::from(self.exponent.unsigned_abs());
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (integral, fractional) = padded.split_at(padded.len() - scale);
        let sign = if self.significand.sign() == Sign::Minus { "-" } else { "" };
        write!(f, "{sign}{integral}.{fractional}")
    }
}

impl Add for &FloatingPointNumber {
    type Output = FloatingPointNumber;

    /// Exact sum at the smaller of the two exponents.
    fn add(self, rhs: Self) -> FloatingPointNumber {
        let exponent = self.exponent.min(rhs.exponent);
        FloatingPointNumber::new(self.rescaled(exponent) + rhs.rescaled(exponent), exponent)
    }
}

impl Sub for &FloatingPointNumber {
    type Output = FloatingPointNumber;

    /// Exact difference at the smaller of the two exponents.
    fn sub(self, rhs: Self) -> FloatingPointNumber {
        let exponent = self.exponent.min(rhs.exponent);
        FloatingPointNumber::new(self.rescaled(exponent) - rhs.rescaled(exponent), exponent)
    }
}

impl Mul for &FloatingPointNumber {
    type Output = Result<FloatingPointNumber>;

    /// Exact product; fails if the exponent sum leaves `i16`.
    fn mul(self, rhs: Self) -> Result<FloatingPointNumber> {
        let exponent = self.exponent.checked_add(rhs.exponent).ok_or(Error::ValueOutOfRange)?;
        Ok(FloatingPointNumber::new(&self.significand * &rhs.significand, exponent))
    }
}

impl From<i64> for FloatingPointNumber {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}
