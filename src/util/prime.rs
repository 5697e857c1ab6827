// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blum prime generation for Paillier-DJN key pairs.
//!
//! A Blum prime satisfies p ≡ 3 (mod 4). Candidates are drawn with their two
//! top bits set, so the product of two `k`-bit primes has exactly `2k` bits,
//! then searched incrementally with stride 4 (which preserves the congruence)
//! after a cheap sieve against small primes.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use crate::{Error, Result};

/// Small odd primes for fast sieving (3 up to 1619).
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997, 1009, 1013, 1019, 1021, 1031, 1033, 1039,
    1049, 1051, 1061, 1063, 1069, 1087, 1091, 1093, 1097, 1103, 1109, 1117, 1123, 1129, 1151, 1153,
    1163, 1171, 1181, 1187, 1193, 1201, 1213, 1217, 1223, 1229, 1231, 1237, 1249, 1259, 1277, 1279,
    1283, 1289, 1291, 1297, 1301, 1303, 1307, 1319, 1321, 1327, 1361, 1367, 1373, 1381, 1399, 1409,
    1423, 1427, 1429, 1433, 1439, 1447, 1451, 1453, 1459, 1471, 1481, 1483, 1487, 1489, 1493, 1499,
    1511, 1523, 1531, 1543, 1549, 1553, 1559, 1567, 1571, 1579, 1583, 1597, 1601, 1607, 1609, 1613,
    1619,
];

/// Candidates examined from one random base before drawing a new one.
const MAX_INCREMENT: u32 = 20_000;

/// Random bases tried before giving up.
const MAX_BASES: u32 = 64;

/// Smallest prime size accepted; the sieve would reject primes below 1619.
pub const MIN_PRIME_BITS: usize = 32;

/// Generate a prime `p` of exactly `bit_length` bits with `p ≡ 3 (mod 4)`.
///
/// # Errors
///
/// Returns [`Error::KeyGeneration`] if `bit_length` is below
/// [`MIN_PRIME_BITS`] or no prime is found within the search bound.
pub fn blum_prime<R: Rng + ?Sized>(bit_length: usize, rng: &mut R) -> Result<BigUint> {
    if bit_length < MIN_PRIME_BITS {
        return Err(Error::KeyGeneration(format!(
            "prime size {bit_length} is below the minimum of {MIN_PRIME_BITS} bits"
        )));
    }

    let rounds = optimal_miller_rabin_rounds(bit_length);

    for _ in 0..MAX_BASES {
        let mut candidate = generate_candidate(bit_length, rng);

        for _ in 0..MAX_INCREMENT {
            // stepping past the top would change the bit length
            if candidate.bits() != bit_length {
                break;
            }
            if !divisible_by_small_prime(&candidate) && probably_prime(&candidate, rounds) {
                return Ok(candidate);
            }
            candidate += 4u32;
        }
    }

    Err(Error::KeyGeneration(format!("no {bit_length}-bit Blum prime found")))
}

/// Random `bits`-bit value with the two top bits set and `≡ 3 (mod 4)`.
#[inline]
fn generate_candidate<R: Rng + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);

    let top_bits = BigUint::from(3u32) << (bits - 2);
    candidate |= top_bits;
    candidate |= BigUint::from(3u32);

    candidate
}

/// Returns true if `n` is divisible by any small odd prime.
///
/// Candidates are odd, so 2 is never checked.
#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}

/// Miller-Rabin rounds for an error probability below 2^-128.
///
/// Reference: FIPS 186-4 Table C.1
#[inline]
const fn optimal_miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

/// `true` when `p ≡ 3 (mod 4)`.
pub fn is_blum(p: &BigUint) -> bool {
    (p % 4u32) == BigUint::from(3u32)
}

/// `true` when `gcd(p − 1, q − 1) = 2`, the pairing condition for λ = φ(n)/2.
pub fn has_minimal_common_factor(p: &BigUint, q: &BigUint) -> bool {
    use num_integer::Integer;

    let p_minus_1 = p - BigUint::one();
    let q_minus_1 = q - BigUint::one();
    p_minus_1.gcd(&q_minus_1) == BigUint::from(2u32)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn generates_blum_prime_128() {
        let p = blum_prime(128, &mut OsRng).unwrap();

        assert_eq!(p.bits(), 128, "Wrong bit length");
        assert!(is_blum(&p), "p must be 3 mod 4");
        assert!(probably_prime(&p, 20), "p is not prime");
    }

    #[test]
    fn generates_blum_prime_512() {
        let p = blum_prime(512, &mut OsRng).unwrap();

        assert_eq!(p.bits(), 512);
        assert!(is_blum(&p));
        assert!(probably_prime(&p, 15));
    }

    #[test]
    fn product_has_full_length() {
        let p = blum_prime(256, &mut OsRng).unwrap();
        let q = blum_prime(256, &mut OsRng).unwrap();
        assert_eq!((&p * &q).bits(), 512);
    }

    #[test]
    fn rejects_small_bit_lengths() {
        assert!(matches!(blum_prime(16, &mut OsRng), Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn generated_primes_are_distinct() {
        let p1 = blum_prime(256, &mut OsRng).unwrap();
        let p2 = blum_prime(256, &mut OsRng).unwrap();
        assert_ne!(p1, p2, "Should generate different primes");
    }

    #[test]
    fn common_factor_check() {
        // gcd(6, 10) = 2
        assert!(has_minimal_common_factor(&BigUint::from(7u32), &BigUint::from(11u32)));
        // gcd(18, 42) = 6
        assert!(!has_minimal_common_factor(&BigUint::from(19u32), &BigUint::from(43u32)));
    }
}
