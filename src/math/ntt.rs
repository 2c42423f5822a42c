//! Number-Theoretic Transform (NTT) for fast polynomial multiplication.
//!
//! Implements Cooley-Tukey radix-2 NTT for negacyclic convolution over
//! R_q = Z_q[X]/(X^n + 1). The NTT enables O(n log n) polynomial multiplication
//! instead of O(n²) naive multiplication.
//!
//! # Theory
//!
//! For negacyclic convolution (multiplication modulo X^n + 1), we use a
//! primitive 2n-th root of unity ψ where ψ^n = -1. The NTT evaluates a
//! polynomial at odd powers of ψ, enabling pointwise multiplication in the
//! evaluation domain.
//!
//! # Representation
//!
//! Values in the NTT domain are kept in Montgomery form (`a · 2^64 mod q`).
//! `forward` converts into Montgomery form and `inverse` converts back, so
//! coefficient-domain values are always plain residues in [0, q).
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::math::ntt::NttContext;
//!
//! let ctx = NttContext::newhope();
//!
//! let mut coeffs = vec![1u64; 1024];
//! ctx.forward(&mut coeffs);
//! ctx.inverse(&mut coeffs);
//! assert_eq!(coeffs[0], 1);
//! ```

use crate::params::{N, Q};

/// Precomputed NTT context with twiddle factors.
///
/// Create once and reuse for all polynomial operations with the same
/// dimension and modulus.
#[derive(Clone, Debug)]
pub struct NttContext {
    /// Ring dimension (power of two).
    n: usize,
    /// Modulus q ≡ 1 (mod 2n).
    q: u64,
    /// -q^(-1) mod 2^64 for Montgomery reduction.
    q_inv_neg: u64,
    /// R^2 mod q for converting to Montgomery form.
    r_squared: u64,
    /// Forward twiddle factors (powers of ψ) in bit-reversed order.
    psi_powers: Vec<u64>,
    /// Inverse twiddle factors (powers of ψ^(-1)) in bit-reversed order.
    psi_inv_powers: Vec<u64>,
    /// n^(-1) mod q in Montgomery form for inverse NTT scaling.
    n_inv: u64,
}

impl NttContext {
    /// Creates an NTT context for the given dimension and modulus.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a power of two or `q` does not satisfy
    /// q ≡ 1 (mod 2n). Callers validate through `NobusParams` first.
    pub fn new(n: usize, q: u64) -> Self {
        assert!(n.is_power_of_two(), "n must be a power of two");
        assert!(q % (2 * n as u64) == 1, "q must be ≡ 1 (mod 2n)");

        let q_inv_neg = Self::compute_q_inv_neg(q);
        let r_squared = Self::compute_r_squared(q);

        // Primitive 2n-th root of unity ψ
        let psi = Self::find_primitive_root(2 * n as u64, q);
        let psi_mont = Self::to_montgomery(psi, q, r_squared, q_inv_neg);
        let psi_powers = Self::compute_twiddle_factors(n, psi_mont, q, q_inv_neg, r_squared);

        let psi_inv = Self::mod_pow(psi, q - 2, q);
        let psi_inv_mont = Self::to_montgomery(psi_inv, q, r_squared, q_inv_neg);
        let psi_inv_powers =
            Self::compute_twiddle_factors(n, psi_inv_mont, q, q_inv_neg, r_squared);

        let n_inv_val = Self::mod_pow(n as u64, q - 2, q);
        let n_inv = Self::to_montgomery(n_inv_val, q, r_squared, q_inv_neg);

        Self {
            n,
            q,
            q_inv_neg,
            r_squared,
            psi_powers,
            psi_inv_powers,
            n_inv,
        }
    }

    /// Context for the NewHope ring (n = 1024, q = 12289).
    pub fn newhope() -> Self {
        Self::new(N, Q)
    }

    /// Forward NTT in-place (Cooley-Tukey, decimation-in-time).
    ///
    /// Input coefficients must be reduced; output is in Montgomery form.
    pub fn forward(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n, "Input length must match dimension");

        for c in coeffs.iter_mut() {
            *c = Self::to_montgomery(*c, self.q, self.r_squared, self.q_inv_neg);
        }

        let n = self.n;
        let q = self.q;
        let mut t = n;
        let mut m = 1;

        while m < n {
            t >>= 1;
            for i in 0..m {
                let j1 = 2 * i * t;
                let j2 = j1 + t;
                let w = self.psi_powers[m + i];

                for j in j1..j2 {
                    let u = coeffs[j];
                    let v = self.montgomery_mul(coeffs[j + t], w);

                    coeffs[j] = if u + v >= q { u + v - q } else { u + v };
                    coeffs[j + t] = if u >= v { u - v } else { q - v + u };
                }
            }
            m <<= 1;
        }
    }

    /// Inverse NTT in-place (Gentleman-Sande, decimation-in-frequency).
    ///
    /// Output is converted out of Montgomery form.
    pub fn inverse(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n, "Input length must match dimension");

        let q = self.q;
        let mut t = 1;
        let mut m = self.n;

        while m > 1 {
            m >>= 1;
            for i in 0..m {
                let j2 = i * 2 * t;
                let w = self.psi_inv_powers[m + i];

                for j in j2..(j2 + t) {
                    let u = coeffs[j];
                    let v = coeffs[j + t];

                    coeffs[j] = if u + v >= q { u + v - q } else { u + v };
                    let diff = if u >= v { u - v } else { q - v + u };
                    coeffs[j + t] = self.montgomery_mul(diff, w);
                }
            }
            t <<= 1;
        }

        // Scale by n^(-1), then leave Montgomery form
        for c in coeffs.iter_mut() {
            *c = self.montgomery_mul(*c, self.n_inv);
            *c = self.montgomery_mul(*c, 1);
        }
    }

    /// Pointwise multiplication of two NTT-domain vectors.
    pub fn pointwise_mul(&self, a: &[u64], b: &[u64], result: &mut [u64]) {
        assert_eq!(a.len(), self.n, "Input length must match dimension");
        assert_eq!(b.len(), self.n, "Input length must match dimension");
        assert_eq!(result.len(), self.n, "Output length must match dimension");

        for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
            *r = self.montgomery_mul(x, y);
        }
    }

    #[inline]
    fn montgomery_mul(&self, a: u64, b: u64) -> u64 {
        let q = self.q;
        let ab = (a as u128) * (b as u128);
        let m = ((ab as u64).wrapping_mul(self.q_inv_neg)) as u128;
        let t = ((ab + m * (q as u128)) >> 64) as u64;
        if t >= q {
            t - q
        } else {
            t
        }
    }

    fn to_montgomery(a: u64, q: u64, r_squared: u64, q_inv_neg: u64) -> u64 {
        let ab = (a as u128) * (r_squared as u128);
        let m = ((ab as u64).wrapping_mul(q_inv_neg)) as u128;
        let t = ((ab + m * (q as u128)) >> 64) as u64;
        if t >= q {
            t - q
        } else {
            t
        }
    }

    fn compute_q_inv_neg(q: u64) -> u64 {
        let mut y: u64 = 1;
        for i in 1..64 {
            let yi = y.wrapping_mul(q) & (1u64 << i);
            y |= yi;
        }
        y.wrapping_neg()
    }

    fn compute_r_squared(q: u64) -> u64 {
        let r_mod_q = (1u128 << 64) % (q as u128);
        ((r_mod_q * r_mod_q) % (q as u128)) as u64
    }

    fn mod_pow(mut base: u64, mut exp: u64, m: u64) -> u64 {
        let mut result = 1u64;
        base %= m;
        while exp > 0 {
            if exp & 1 == 1 {
                result = ((result as u128 * base as u128) % m as u128) as u64;
            }
            exp >>= 1;
            base = ((base as u128 * base as u128) % m as u128) as u64;
        }
        result
    }

    /// Find a primitive n-th root of unity modulo q (n a power of two).
    fn find_primitive_root(n: u64, q: u64) -> u64 {
        let exp = (q - 1) / n;

        for g in 2..q {
            let candidate = Self::mod_pow(g, exp, q);
            // ψ^n = 1 always holds; ψ^(n/2) ≠ 1 makes the order exactly n
            if Self::mod_pow(candidate, n / 2, q) != 1 {
                return candidate;
            }
        }
        unreachable!("q ≡ 1 (mod n) guarantees a primitive n-th root");
    }

    /// Twiddle factors in bit-reversed order: factors[m + i] = ψ^bitrev(m + i).
    fn compute_twiddle_factors(
        n: usize,
        psi: u64,
        q: u64,
        q_inv_neg: u64,
        r_squared: u64,
    ) -> Vec<u64> {
        let mont_mul = |a: u64, b: u64| -> u64 {
            let ab = (a as u128) * (b as u128);
            let mm = ((ab as u64).wrapping_mul(q_inv_neg)) as u128;
            let t = ((ab + mm * (q as u128)) >> 64) as u64;
            if t >= q {
                t - q
            } else {
                t
            }
        };

        let one = Self::to_montgomery(1, q, r_squared, q_inv_neg);
        let mut factors = vec![0u64; n];
        factors[1] = one;

        for m in 1..n {
            if m.is_power_of_two() {
                // New level: ψ^(n/(2m))
                let mut pow = one;
                for _ in 0..n / (2 * m) {
                    pow = mont_mul(pow, psi);
                }
                factors[m] = pow;
            } else {
                let prev_idx = m & (m - 1); // clear lowest set bit
                let step_idx = m & m.wrapping_neg(); // lowest set bit
                factors[m] = mont_mul(factors[prev_idx], factors[step_idx]);
            }
        }

        factors
    }
}

impl Default for NttContext {
    fn default() -> Self {
        Self::newhope()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ntt_inverse_roundtrip_small() {
        let n = 16;
        let ctx = NttContext::new(n, Q);

        let original: Vec<u64> = (0..n as u64).collect();
        let mut coeffs = original.clone();

        ctx.forward(&mut coeffs);
        ctx.inverse(&mut coeffs);

        assert_eq!(coeffs, original);
    }

    #[test]
    fn test_ntt_inverse_roundtrip_1024() {
        let ctx = NttContext::newhope();

        let original: Vec<u64> = (0..N as u64).map(|i| (i * 12345) % Q).collect();
        let mut coeffs = original.clone();

        ctx.forward(&mut coeffs);
        assert!(coeffs.iter().all(|&c| c < Q));
        ctx.inverse(&mut coeffs);

        assert_eq!(coeffs, original);
    }

    #[test]
    fn test_ntt_zero_polynomial() {
        let ctx = NttContext::newhope();

        let mut coeffs = vec![0u64; N];
        ctx.forward(&mut coeffs);
        assert!(coeffs.iter().all(|&c| c == 0));

        ctx.inverse(&mut coeffs);
        assert!(coeffs.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_pointwise_multiplication() {
        let ctx = NttContext::newhope();

        // a(x) = 1, b(x) = 1 => a*b = 1
        let mut a = vec![0u64; N];
        let mut b = vec![0u64; N];
        a[0] = 1;
        b[0] = 1;

        ctx.forward(&mut a);
        ctx.forward(&mut b);

        let mut result = vec![0u64; N];
        ctx.pointwise_mul(&a, &b, &mut result);
        ctx.inverse(&mut result);

        assert_eq!(result[0], 1);
        assert!(result[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_negacyclic_convolution() {
        // x * x^(n-1) = x^n = -1 (mod X^n + 1)
        let ctx = NttContext::newhope();

        let mut a = vec![0u64; N];
        a[1] = 1;
        let mut b = vec![0u64; N];
        b[N - 1] = 1;

        ctx.forward(&mut a);
        ctx.forward(&mut b);

        let mut result = vec![0u64; N];
        ctx.pointwise_mul(&a, &b, &mut result);
        ctx.inverse(&mut result);

        assert_eq!(result[0], Q - 1);
        assert!(result[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_matches_schoolbook_product() {
        let n = 16;
        let ctx = NttContext::new(n, Q);

        let a: Vec<u64> = (0..n as u64).map(|i| (i * 7 + 3) % Q).collect();
        let b: Vec<u64> = (0..n as u64).map(|i| (i * i + 11) % Q).collect();

        let mut expected = vec![0u64; n];
        for i in 0..n {
            for j in 0..n {
                let prod = a[i] * b[j] % Q;
                let k = (i + j) % n;
                if i + j < n {
                    expected[k] = (expected[k] + prod) % Q;
                } else {
                    expected[k] = (expected[k] + Q - prod) % Q;
                }
            }
        }

        let mut a_ntt = a.clone();
        let mut b_ntt = b.clone();
        ctx.forward(&mut a_ntt);
        ctx.forward(&mut b_ntt);
        let mut result = vec![0u64; n];
        ctx.pointwise_mul(&a_ntt, &b_ntt, &mut result);
        ctx.inverse(&mut result);

        assert_eq!(result, expected);
    }

    #[test]
    fn test_linearity() {
        let ctx = NttContext::newhope();

        let a: Vec<u64> = (0..N as u64).collect();
        let b: Vec<u64> = (0..N as u64).map(|i| (i * 2) % Q).collect();

        let mut a_ntt = a.clone();
        let mut b_ntt = b.clone();
        ctx.forward(&mut a_ntt);
        ctx.forward(&mut b_ntt);

        let mut sum: Vec<u64> = a.iter().zip(b.iter()).map(|(&x, &y)| (x + y) % Q).collect();
        ctx.forward(&mut sum);

        for i in 0..N {
            assert_eq!(sum[i], (a_ntt[i] + b_ntt[i]) % Q);
        }
    }
}
