// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plaintext encodings: signed integers folded onto Z_n, and decimals carried
//! as `significand × 10^exponent`.

mod floating;
mod signed;

pub(crate) use floating::power_of_ten;
pub use floating::FloatingPointNumber;
pub use signed::SignedNumberCodec;
