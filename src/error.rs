// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic and encoding operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// A value does not fit the signed range of the codec, or an exponent
    /// does not fit in `i16`.
    #[error("Value is outside the representable range")]
    ValueOutOfRange,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Output buffer too small: {required} bytes required, {capacity} available")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Invalid decimal number: {0}")]
    InvalidNumber(String),
}

pub type Result<T> = std::result::Result<T, Error>;
