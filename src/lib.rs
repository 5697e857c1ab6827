// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier-DJN Cryptosystem
//!
//! Additively homomorphic public-key encryption over signed integers and
//! fixed-point decimals. The modulus is `n = p·q` with Blum primes, `g = n + 1`
//! and encryption randomness `h_s^r` in the Damgård–Jurik–Nielsen style, where
//! `h_s = h^n mod n²` is fixed by the key.
//!
//! References:
//! - [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//! - [Damgård, Jurik & Nielsen (2010), IJIS](https://link.springer.com/article/10.1007/s10207-010-0119-9)
//!
//! ## Plaintexts
//!
//! Integers are folded onto Z_n by [`SignedNumberCodec`]: the lower third of
//! the ring holds non-negative values and the upper third negative ones.
//! Decrypting a result that landed in the middle third reports
//! [`Error::ValueOutOfRange`], which is how homomorphic overflow is detected.
//!
//! Decimals are handled by [`FloatingPointPaillier`], which encrypts the
//! significand and keeps the exponent in the clear.
//!
//! ## Security
//!
//! The private key is zeroized on drop via the `zeroize` crate. Keys below
//! 2048 bits are rejected or logged as weak (see [`KeyPairBuilder`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use djn_paillier::{Decrypt, Encrypt, FloatingPointPaillier, Homomorphic, KeyPair};
//! use num_bigint_dig::BigInt;
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//! let pk = keypair.public_key();
//!
//! let a = pk.encrypt(&BigInt::from(-15)).expect("encryption failed");
//! let b = pk.encrypt(&BigInt::from(27)).expect("encryption failed");
//! let sum = pk.add(&a, &b).expect("addition failed");
//! assert_eq!(keypair.decrypt(&sum).expect("decryption failed"), BigInt::from(12));
//!
//! let price = "19.99".parse().expect("not a decimal");
//! let c = FloatingPointPaillier::encrypt(pk, &price).expect("encryption failed");
//! let doubled = FloatingPointPaillier::scalar_mul(pk, &"2".parse().expect("not a decimal"), &c)
//!     .expect("multiplication failed");
//! let plain = FloatingPointPaillier::decrypt(&keypair, &doubled).expect("decryption failed");
//! assert_eq!(plain.to_string(), "39.98");
//! ```

mod ciphertext;
mod codec;
mod crypto;
mod error;
mod floating;
mod keypair;
mod util;

pub use ciphertext::Ciphertext;
pub use codec::{FloatingPointNumber, SignedNumberCodec};
pub use crypto::{randomness_bytes_len, Decrypt, Encrypt, Homomorphic};
pub use error::{Error, Result};
pub use floating::{precision_align, CipherBytes, FloatingPointCipher, FloatingPointPaillier};
pub use keypair::{KeyPair, KeyPairBuilder, PrivateKey, PublicKey};
pub use util::prime::{blum_prime, MIN_PRIME_BITS};
