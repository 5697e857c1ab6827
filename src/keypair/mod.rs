// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod encoding;

use crate::codec::SignedNumberCodec;
use crate::error::{Error, Result};
use crate::util::{self, prime};

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public parameters of the cryptosystem.
///
/// `n = p·q` is the modulus and `h = −x² mod n` the randomization base. The
/// derived values `n²`, `h_s = h^n mod n²` and the signed codec are computed
/// once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) key_bits: u32,
    pub(crate) n: BigUint,
    pub(crate) h: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) h_s: BigUint,
    pub(crate) codec: SignedNumberCodec,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// `h` must lie in `[1, n)` and `n` must fit in `key_bits` bits.
    pub fn new(key_bits: u32, n: BigUint, h: BigUint) -> Result<Self> {
        if n <= BigUint::one() || n.is_even() {
            return Err(Error::InvalidKeyMaterial("modulus must be odd and greater than one".into()));
        }
        if n.bits() > key_bits as usize {
            return Err(Error::InvalidKeyMaterial(format!(
                "{}-bit modulus exceeds the declared {key_bits} bits",
                n.bits()
            )));
        }
        if h.is_zero() || h >= n {
            return Err(Error::InvalidKeyMaterial("h must lie in [1, n)".into()));
        }

        let n_squared = &n * &n;
        let h_s = h.modpow(&n, &n_squared);
        let codec = SignedNumberCodec::new(&n);

        Ok(Self { key_bits, n, h, n_squared, h_s, codec })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the randomization base `h`.
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Return `n²`, the ciphertext modulus.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return `h^n mod n²`.
    pub fn h_s(&self) -> &BigUint {
        &self.h_s
    }

    /// Return the declared modulus size in bits.
    pub fn key_bits(&self) -> u32 {
        self.key_bits
    }

    /// Return the codec mapping signed plaintexts onto Z_n.
    pub fn codec(&self) -> &SignedNumberCodec {
        &self.codec
    }
}

/// Miller–Rabin rounds when validating supplied prime factors.
const FACTOR_PRIMALITY_ROUNDS: usize = 20;

/// Secret key material.
///
/// Holds `λ = (p−1)(q−1)/2` and the factorization of `n`, along with the
/// values precomputed for CRT exponentiation. Sensitive fields are zeroized
/// on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    pub(crate) key_bits: u32,
    pub(crate) lambda: BigUint,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,

    pub(crate) p_squared: BigUint,
    pub(crate) q_squared: BigUint,
    /// q²⁻¹ mod p², for Garner recombination.
    pub(crate) q_squared_inverse: BigUint,
    /// p² − p, the order of (Z_{p²})*.
    pub(crate) p_order: BigUint,
    /// q² − q, the order of (Z_{q²})*.
    pub(crate) q_order: BigUint,

    pub(crate) n: BigUint,
    pub(crate) n_squared: BigUint,
    /// λ⁻¹ mod n.
    pub(crate) lambda_inverse: BigUint,

    #[zeroize(skip)]
    pub(crate) codec: SignedNumberCodec,
}

impl PrivateKey {
    /// Construct a private key from `λ` and the prime factors.
    ///
    /// Checks that `p` and `q` are distinct Blum primes that fit in half the
    /// key size with `gcd(p−1, q−1) = 2`, and that `λ` matches them.
    pub fn new(key_bits: u32, lambda: BigUint, p: BigUint, q: BigUint) -> Result<Self> {
        let factor_bits = (key_bits as usize + 1) / 2;
        if p <= BigUint::one() || q <= BigUint::one() || p == q {
            return Err(Error::InvalidKeyMaterial("p and q must be distinct and greater than one".into()));
        }
        if p.bits() > factor_bits || q.bits() > factor_bits {
            return Err(Error::InvalidKeyMaterial(format!(
                "prime factors exceed {factor_bits} bits"
            )));
        }
        if !probably_prime(&p, FACTOR_PRIMALITY_ROUNDS) || !probably_prime(&q, FACTOR_PRIMALITY_ROUNDS) {
            return Err(Error::InvalidKeyMaterial("p and q must be prime".into()));
        }
        if !prime::is_blum(&p) || !prime::is_blum(&q) {
            return Err(Error::InvalidKeyMaterial("p and q must be 3 mod 4".into()));
        }
        if !prime::has_minimal_common_factor(&p, &q) {
            return Err(Error::InvalidKeyMaterial("gcd(p-1, q-1) must be 2".into()));
        }

        let p_minus_1 = &p - BigUint::one();
        let q_minus_1 = &q - BigUint::one();
        if lambda.is_zero() || lambda != (&p_minus_1 * &q_minus_1) >> 1 {
            return Err(Error::InvalidKeyMaterial("lambda does not match p and q".into()));
        }

        let n = &p * &q;
        if n.bits() > key_bits as usize {
            return Err(Error::InvalidKeyMaterial(format!(
                "{}-bit modulus exceeds the declared {key_bits} bits",
                n.bits()
            )));
        }

        let p_squared = &p * &p;
        let q_squared = &q * &q;
        let q_squared_inverse = util::mod_inverse(&q_squared, &p_squared)
            .ok_or_else(|| Error::InvalidKeyMaterial("q² is not invertible mod p²".into()))?;
        let lambda_inverse = util::mod_inverse(&lambda, &n)
            .ok_or_else(|| Error::InvalidKeyMaterial("lambda is not invertible mod n".into()))?;

        let p_order = &p_squared - &p;
        let q_order = &q_squared - &q;
        let n_squared = &n * &n;
        let codec = SignedNumberCodec::new(&n);

        Ok(Self {
            key_bits,
            lambda,
            p,
            q,
            p_squared,
            q_squared,
            q_squared_inverse,
            p_order,
            q_order,
            n,
            n_squared,
            lambda_inverse,
            codec,
        })
    }

    /// Return the modulus `n = p·q`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the declared modulus size in bits.
    pub fn key_bits(&self) -> u32 {
        self.key_bits
    }

    /// Return `λ = (p−1)(q−1)/2`.
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    /// Return the first prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Return the second prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Pair a public and a private key generated together.
    ///
    /// Fails with [`Error::InvalidKeyMaterial`] if the moduli or declared key
    /// sizes differ.
    pub fn new(public: PublicKey, secret: PrivateKey) -> Result<Self> {
        if public.n != secret.n || public.key_bits != secret.key_bits {
            return Err(Error::InvalidKeyMaterial("public and private keys do not match".into()));
        }
        Ok(Self { public, secret })
    }

    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(key_bits: u32) -> Result<Self> {
        KeyPairBuilder::new().key_bits(key_bits).build()
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Return the modulus size in bits.
    pub fn key_bits(&self) -> u32 {
        self.public.key_bits
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug)]
pub struct KeyPairBuilder {
    key_bits: u32,
    max_attempts: u32,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self { key_bits: 2048, max_attempts: 64 }
    }

    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: u32 = 2048;

    /// Absolute minimum enforced in production builds
    /// Can be bypassed with `allow-weak-keys` feature flag
    #[cfg(not(feature = "allow-weak-keys"))]
    pub const ABSOLUTE_MIN_BITS: u32 = 512;

    #[cfg(feature = "allow-weak-keys")]
    pub const ABSOLUTE_MIN_BITS: u32 = 128;

    /// Set the desired modulus bit length.
    pub fn key_bits(mut self, bits: u32) -> Self {
        self.key_bits = bits;
        self
    }

    /// Bound the number of prime pairs drawn before giving up.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Generate the key pair using the operating system's CSPRNG.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair from a caller-supplied CSPRNG.
    pub fn build_with_rng<R: Rng + CryptoRng + ?Sized>(self, rng: &mut R) -> Result<KeyPair> {
        // Hard block dangerously small keys
        if self.key_bits < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS as usize,
                actual: self.key_bits as usize,
            });
        }

        if self.key_bits < Self::MIN_SECURE_BITS {
            warn!(
                key_bits = self.key_bits,
                recommended = Self::MIN_SECURE_BITS,
                "generating a cryptographically weak key"
            );
        }

        // n = p·q, so each factor takes half the modulus.
        let prime_bits = (self.key_bits / 2) as usize;

        for attempt in 1..=self.max_attempts {
            let p = prime::blum_prime(prime_bits, rng)?;
            let q = prime::blum_prime(prime_bits, rng)?;

            if p == q {
                debug!(attempt, "rejected identical primes");
                continue;
            }
            if !prime::has_minimal_common_factor(&p, &q) {
                debug!(attempt, "rejected prime pair with gcd(p-1, q-1) > 2");
                continue;
            }

            match self.assemble(p, q, rng) {
                Ok(keypair) => {
                    debug!(attempt, key_bits = self.key_bits, "generated key pair");
                    return Ok(keypair);
                }
                Err(err) => debug!(attempt, %err, "rejected key material"),
            }
        }

        Err(Error::KeyGeneration(format!(
            "no valid {}-bit key pair after {} attempts",
            self.key_bits, self.max_attempts
        )))
    }

    fn assemble<R: Rng + CryptoRng + ?Sized>(
        &self,
        p: BigUint,
        q: BigUint,
        rng: &mut R,
    ) -> Result<KeyPair> {
        let n = &p * &q;
        let lambda = ((&p - BigUint::one()) * (&q - BigUint::one())) >> 1;
        let h = self.sample_h(&n, rng)?;

        let public = PublicKey::new(self.key_bits, n, h)?;
        let secret = PrivateKey::new(self.key_bits, lambda, p, q)?;

        KeyPair::new(public, secret)
    }

    /// Draw `h = −x² mod n` for random `x ∈ [1, n)`, retrying until `h` is a
    /// unit.
    fn sample_h<R: Rng + CryptoRng + ?Sized>(&self, n: &BigUint, rng: &mut R) -> Result<BigUint> {
        for _ in 0..self.max_attempts {
            let x = rng.gen_biguint_range(&BigUint::one(), n);
            let x_squared = (&x * &x) % n;
            if x_squared.is_zero() {
                continue;
            }
            let h = n - x_squared;
            if h.gcd(n).is_one() {
                return Ok(h);
            }
        }
        Err(Error::KeyGeneration("no unit found for h".into()))
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
