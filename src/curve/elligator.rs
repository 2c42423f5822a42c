//! Elligator2 maps Curve25519 public keys to uniform-looking bitstrings and
//! back.
//!
//! The forward map r -> u is defined for every 32-byte string. The inverse
//! u -> r exists for roughly half of all points: exactly those where
//! -2u(u + A) is a square.

use num_bigint::BigUint;
use num_traits::One;

use super::field::Field;

/// Bits 254 and 255 of a representative carry no information.
const HIGH_BITS: u8 = 0xc0;

/// Elligator2 over Curve25519.
#[derive(Clone, Debug)]
pub struct Elligator2 {
    field: Field,
}

impl Elligator2 {
    pub fn new() -> Self {
        Self {
            field: Field::curve25519(),
        }
    }

    /// Map a representative to the u-coordinate of a curve point.
    ///
    /// The two high bits are ignored, so every 32-byte string decodes.
    pub fn representative_to_public_key(&self, representative: &[u8; 32]) -> [u8; 32] {
        let f = &self.field;

        let mut bytes = *representative;
        bytes[31] &= !HIGH_BITS;
        let r = f.from_bytes(&bytes);

        // v = -A / (1 + 2r^2); the denominator is never zero since -1/2 is
        // not a square
        let two_r2 = f.mul(&BigUint::from(2u32), &f.mul(&r, &r));
        let denom = f.add(&BigUint::one(), &two_r2);
        let v = f.neg(&f.mul(f.a(), &f.invert(&denom)));

        // u = v if v^3 + A·v^2 + v is a square, else -v - A
        let v2 = f.mul(&v, &v);
        let rhs = f.mul(&v, &f.add(&f.add(&v2, &f.mul(f.a(), &v)), &BigUint::one()));
        let u = if f.is_square(&rhs) {
            v
        } else {
            f.neg(&f.add(&v, f.a()))
        };

        f.to_bytes(&u)
    }

    /// Compute a representative of the point with u-coordinate `public_key`,
    /// if one exists.
    ///
    /// `tweak` supplies the two high bits, which a canonical representative
    /// would always leave clear.
    pub fn public_key_to_representative(&self, public_key: &[u8; 32], tweak: u8) -> Option<[u8; 32]> {
        let f = &self.field;

        let mut bytes = *public_key;
        bytes[31] &= 0x7f;
        let u = f.from_bytes(&bytes);

        let u_plus_a = f.add(&u, f.a());
        if f.is_zero(&u_plus_a) {
            return None;
        }

        // r = sqrt(-u / (2(u + A)))
        let denom = f.mul(&BigUint::from(2u32), &u_plus_a);
        let t = f.neg(&f.mul(&u, &f.invert(&denom)));
        let r = f.sqrt(&t)?;

        let mut representative = f.to_bytes(&r);
        if self.representative_to_public_key(&representative) != f.to_bytes(&u) {
            return None;
        }

        representative[31] |= tweak & HIGH_BITS;
        Some(representative)
    }
}

impl Default for Elligator2 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};

    fn public_key(seed: u8) -> [u8; 32] {
        x25519([seed; 32], X25519_BASEPOINT_BYTES)
    }

    #[test]
    fn test_roughly_half_representable() {
        let map = Elligator2::new();
        let representable = (0..64u8)
            .filter(|&i| map.public_key_to_representative(&public_key(i), 0).is_some())
            .count();
        assert!(
            (12..=52).contains(&representable),
            "{} of 64 keys representable",
            representable
        );
    }

    #[test]
    fn test_representative_roundtrip() {
        let map = Elligator2::new();
        let mut checked = 0;
        for i in 0..32u8 {
            let pk = public_key(i);
            if let Some(r) = map.public_key_to_representative(&pk, 0) {
                assert_eq!(r[31] & HIGH_BITS, 0);
                assert_eq!(map.representative_to_public_key(&r), pk);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_tweak_bits_ignored() {
        let map = Elligator2::new();
        let pk = (0..32u8)
            .map(public_key)
            .find(|pk| map.public_key_to_representative(pk, 0).is_some())
            .expect("some key is representable");

        let plain = map.public_key_to_representative(&pk, 0).unwrap();
        let tweaked = map.public_key_to_representative(&pk, 0xff).unwrap();
        assert_eq!(tweaked[31] & HIGH_BITS, HIGH_BITS);
        assert_eq!(tweaked[..31], plain[..31]);
        assert_eq!(map.representative_to_public_key(&tweaked), pk);
    }

    #[test]
    fn test_every_string_decodes_to_a_point() {
        // u lands on the curve, never on the twist
        let map = Elligator2::new();
        let f = Field::curve25519();
        for i in 0..16u8 {
            let u = f.from_bytes(&map.representative_to_public_key(&[i.wrapping_mul(29); 32]));
            let u2 = f.mul(&u, &u);
            let rhs = f.mul(&u, &f.add(&f.add(&u2, &f.mul(f.a(), &u)), &BigUint::one()));
            assert!(f.is_square(&rhs));
        }
    }
}
