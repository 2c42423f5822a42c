//! Arithmetic in GF(2^255 - 19) for the Elligator2 map.
//!
//! Only public values (curve points and their representatives) pass through
//! this module, so big-integer arithmetic without constant-time guarantees
//! is acceptable here.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Montgomery coefficient A of Curve25519: v^2 = u^3 + A·u^2 + u.
const CURVE25519_A: u32 = 486_662;

/// Field constants of Curve25519's base field.
#[derive(Clone, Debug)]
pub struct Field {
    p: BigUint,
    a: BigUint,
    /// (p - 1) / 2, exponent of the Legendre symbol and bound of canonical roots.
    half: BigUint,
    /// (p + 3) / 8, candidate square root exponent for p ≡ 5 (mod 8).
    sqrt_exp: BigUint,
    /// 2^((p - 1) / 4), a square root of -1.
    sqrt_m1: BigUint,
}

impl Field {
    pub fn curve25519() -> Self {
        let p: BigUint = (BigUint::one() << 255u32) - 19u32;
        let half = (&p - 1u32) >> 1u32;
        let sqrt_exp = (&p + 3u32) >> 3u32;
        let sqrt_m1 = BigUint::from(2u32).modpow(&((&p - 1u32) >> 2u32), &p);

        Self {
            a: BigUint::from(CURVE25519_A),
            p,
            half,
            sqrt_exp,
            sqrt_m1,
        }
    }

    /// The curve coefficient A.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Little-endian bytes to a reduced field element.
    pub fn from_bytes(&self, bytes: &[u8; 32]) -> BigUint {
        BigUint::from_bytes_le(bytes) % &self.p
    }

    /// Field element to 32 little-endian bytes.
    pub fn to_bytes(&self, x: &BigUint) -> [u8; 32] {
        let mut out = [0u8; 32];
        let le = x.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    pub fn add(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x + y) % &self.p
    }

    pub fn mul(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.p
    }

    pub fn neg(&self, x: &BigUint) -> BigUint {
        (&self.p - x) % &self.p
    }

    /// x^(p-2); zero maps to zero.
    pub fn invert(&self, x: &BigUint) -> BigUint {
        x.modpow(&(&self.p - 2u32), &self.p)
    }

    /// Zero and quadratic residues count as squares.
    pub fn is_square(&self, x: &BigUint) -> bool {
        let legendre = x.modpow(&self.half, &self.p);
        legendre != &self.p - 1u32
    }

    /// The square root of `x` in [0, (p - 1) / 2], if one exists.
    pub fn sqrt(&self, x: &BigUint) -> Option<BigUint> {
        let mut root = x.modpow(&self.sqrt_exp, &self.p);
        let check = self.mul(&root, &root);

        if check != *x {
            if check == self.neg(x) {
                root = self.mul(&root, &self.sqrt_m1);
            } else {
                return None;
            }
        }

        if root > self.half {
            root = self.neg(&root);
        }
        Some(root)
    }

    pub fn is_zero(&self, x: &BigUint) -> bool {
        x.is_zero()
    }
}
