// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

use crate::keypair::PrivateKey;

impl PrivateKey {
    /// Computes `base^exp mod n²` by splitting over `p²` and `q²`.
    ///
    /// Exponents are reduced modulo the group orders `p² − p` and `q² − q`,
    /// which is exact whenever `base` is a unit mod n². The halves are joined
    /// with Garner's formula:
    ///
    /// `h = (x_p − x_q) · (q²)⁻¹ mod p²`, `result = x_q + h · q²`
    pub(crate) fn power_mod_n_squared_crt(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        let exp_p = exp % &self.p_order;
        let base_p = base % &self.p_squared;
        let xp = base_p.modpow(&exp_p, &self.p_squared);

        let exp_q = exp % &self.q_order;
        let base_q = base % &self.q_squared;
        let xq = base_q.modpow(&exp_q, &self.q_squared);

        // xp − xq kept non-negative
        let diff = (&xp + &self.p_squared - (&xq % &self.p_squared)) % &self.p_squared;
        let h = (diff * &self.q_squared_inverse) % &self.p_squared;

        (xq + h * &self.q_squared) % &self.n_squared
    }
}
