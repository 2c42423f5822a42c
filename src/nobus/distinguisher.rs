//! Tell a genuine public polynomial apart from uniform random bytes.
//!
//! Packed coefficients use 14 bits but a genuine key only ever stores
//! values below Q = 12289. A uniform 14-bit value lands in [Q, 2^14) with
//! probability about 1/4, so across 1024 coefficients a random string
//! almost surely shows at least one.
//!
//! The test has no false negatives on genuine keys, Alice's and Bob's alike.
//! It is a heuristic, not a proof: a crafted string whose every coefficient
//! is reduced below Q passes.

use crate::error::Result;
use crate::params::{COEFF_BITS, N, Q};
use crate::rlwe::codec;

/// True iff every coefficient of the leading packed polynomial is below Q.
///
/// Only the first `POLY_BYTES` bytes are read; anything after them is
/// ignored. Fails with `InvalidInputLength` on shorter input.
pub fn is_probably_public_key(bytes: &[u8]) -> Result<bool> {
    Ok(count_out_of_range(bytes)? == 0)
}

/// Number of coefficients of the leading packed polynomial in [Q, 2^14).
pub fn count_out_of_range(bytes: &[u8]) -> Result<usize> {
    let coeffs = codec::unpack_coefficients(bytes)?;
    Ok(coeffs.iter().filter(|&&c| u64::from(c) >= Q).count())
}

/// log2 of the probability that a uniform string passes
/// [`is_probably_public_key`].
pub fn false_positive_log2() -> f64 {
    N as f64 * ((Q as f64).log2() - COEFF_BITS as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NobusError;
    use crate::math::Poly;
    use crate::params::POLY_BYTES;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_reduced_polynomial_passes() {
        let coeffs: Vec<u64> = (0..N as u64).map(|i| (i * 12) % Q).collect();
        let mut bytes = vec![0u8; POLY_BYTES];
        codec::pack_poly(&Poly::from_coeffs(coeffs), &mut bytes);

        assert!(is_probably_public_key(&bytes).unwrap());
        assert_eq!(count_out_of_range(&bytes).unwrap(), 0);
    }

    #[test]
    fn test_random_bytes_fail() {
        let mut rng = ChaCha20Rng::seed_from_u64(30);
        let mut bytes = vec![0u8; POLY_BYTES];
        rng.fill_bytes(&mut bytes);

        assert!(!is_probably_public_key(&bytes).unwrap());
        let out = count_out_of_range(&bytes).unwrap();
        assert!((150..=370).contains(&out), "{} out of range", out);
    }

    #[test]
    fn test_q_itself_is_out_of_range() {
        // First coefficient = 12289 = 0x3001, rest zero
        let mut bytes = vec![0u8; POLY_BYTES];
        bytes[0] = 0x01;
        bytes[1] = 0x30;

        assert_eq!(count_out_of_range(&bytes).unwrap(), 1);
        assert!(!is_probably_public_key(&bytes).unwrap());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = vec![0u8; POLY_BYTES + 100];
        bytes[POLY_BYTES..].fill(0xff);
        assert!(is_probably_public_key(&bytes).unwrap());
    }

    #[test]
    fn test_short_input() {
        let err = is_probably_public_key(&[0u8; POLY_BYTES - 1]).unwrap_err();
        assert!(matches!(
            err,
            NobusError::InvalidInputLength {
                expected: POLY_BYTES,
                actual,
            } if actual == POLY_BYTES - 1
        ));
    }

    #[test]
    fn test_false_positive_rate() {
        let log2 = false_positive_log2();
        assert!((-426.0..-424.0).contains(&log2), "{}", log2);
    }
}
