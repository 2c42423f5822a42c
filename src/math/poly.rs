//! Polynomial operations over R_q = Z_q[X]/(X^n + 1) with q = 12289.
//!
//! Polynomials exist either in coefficient domain or in NTT domain. The
//! domain is tracked so that pointwise products are only formed between NTT
//! representations.
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::math::{NttContext, Poly};
//!
//! let ctx = NttContext::newhope();
//!
//! let mut one = Poly::zero();
//! one.coeffs_mut()[0] = 1;
//! one.to_ntt(&ctx);
//!
//! let product = one.mul_ntt_domain(&one, &ctx);
//! assert!(product.is_ntt());
//! ```

use std::ops::{Add, Sub};

use zeroize::Zeroize;

use super::ntt::NttContext;
use crate::params::{N, Q};

/// Polynomial in R_q with n = 1024 coefficients in [0, q).
#[derive(Clone, Debug)]
pub struct Poly {
    /// Coefficients in coefficient or NTT domain.
    coeffs: Vec<u64>,
    /// Whether coefficients are in NTT domain.
    is_ntt: bool,
}

impl Poly {
    /// Zero polynomial in coefficient domain
    pub fn zero() -> Self {
        Self {
            coeffs: vec![0; N],
            is_ntt: false,
        }
    }

    /// Create polynomial from a coefficient vector, reducing modulo q
    ///
    /// # Panics
    ///
    /// Panics if `coeffs.len() != N`.
    pub fn from_coeffs(coeffs: Vec<u64>) -> Self {
        assert_eq!(coeffs.len(), N, "polynomial must have {} coefficients", N);
        let mut p = Self {
            coeffs,
            is_ntt: false,
        };
        p.reduce();
        p
    }

    /// Create an NTT-domain polynomial directly from evaluations
    ///
    /// Used for values that are sampled or transmitted in NTT domain.
    pub fn from_ntt_coeffs(coeffs: Vec<u64>) -> Self {
        let mut p = Self::from_coeffs(coeffs);
        p.is_ntt = true;
        p
    }

    /// Get polynomial dimension
    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// Check if in NTT domain
    pub fn is_ntt(&self) -> bool {
        self.is_ntt
    }

    /// Get reference to coefficient/NTT vector
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Get mutable reference to coefficient/NTT vector
    ///
    /// Callers must keep every value below q.
    pub fn coeffs_mut(&mut self) -> &mut [u64] {
        &mut self.coeffs
    }

    fn reduce(&mut self) {
        for c in &mut self.coeffs {
            *c %= Q;
        }
    }

    /// Convert to NTT domain
    pub fn to_ntt(&mut self, ctx: &NttContext) {
        if !self.is_ntt {
            ctx.forward(&mut self.coeffs);
            self.is_ntt = true;
        }
    }

    /// Convert from NTT domain to coefficient domain
    pub fn from_ntt(&mut self, ctx: &NttContext) {
        if self.is_ntt {
            ctx.inverse(&mut self.coeffs);
            self.is_ntt = false;
        }
    }

    /// Pointwise product of two NTT-domain polynomials
    pub fn mul_ntt_domain(&self, other: &Self, ctx: &NttContext) -> Self {
        assert!(
            self.is_ntt && other.is_ntt,
            "Both polynomials must be in NTT domain"
        );
        let mut coeffs = vec![0u64; self.coeffs.len()];
        ctx.pointwise_mul(&self.coeffs, &other.coeffs, &mut coeffs);
        Self {
            coeffs,
            is_ntt: true,
        }
    }

    /// Centered absolute value |c| of every coefficient, c taken in (-q/2, q/2]
    pub fn centered_abs(&self) -> impl Iterator<Item = u64> + '_ {
        self.coeffs
            .iter()
            .map(|&c| if c <= Q / 2 { c } else { Q - c })
    }
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coeffs.as_mut_slice().zeroize();
        self.is_ntt = false;
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.is_ntt == other.is_ntt && self.coeffs == other.coeffs
    }
}

impl Eq for Poly {}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");
        let coeffs = self
            .coeffs
            .iter()
            .zip(rhs.coeffs.iter())
            .map(|(&a, &b)| {
                let sum = a + b;
                if sum >= Q {
                    sum - Q
                } else {
                    sum
                }
            })
            .collect();
        Poly {
            coeffs,
            is_ntt: self.is_ntt,
        }
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");
        let coeffs = self
            .coeffs
            .iter()
            .zip(rhs.coeffs.iter())
            .map(|(&a, &b)| if a >= b { a - b } else { Q - b + a })
            .collect();
        Poly {
            coeffs,
            is_ntt: self.is_ntt,
        }
    }
}
