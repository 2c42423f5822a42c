//! Wire encoding of polynomials and handshake messages.
//!
//! Coefficients are packed as 14-bit little-endian values, four coefficients
//! per seven bytes. A packed polynomial therefore occupies `POLY_BYTES`
//! bytes, and unpacking any byte string of that length yields values in
//! [0, 2^14). Only values below q are produced by honest encoders.
//!
//! | Message | Layout | Size |
//! |---------|--------|------|
//! | Alice | encode(b) ‖ seed | 1824 |
//! | Bob | encode(u) ‖ encode(v) | 3584 |

use crate::error::{ensure_len, Result};
use crate::math::Poly;
use crate::params::{Seed, N, POLY_BYTES, Q, SEED_BYTES, SEND_A_SIZE, SEND_B_SIZE};

const COEFF_MASK: u16 = (1 << 14) - 1;

/// Pack a polynomial into `out[..POLY_BYTES]`.
///
/// # Panics
///
/// Panics if `out` is shorter than `POLY_BYTES`.
pub fn pack_poly(poly: &Poly, out: &mut [u8]) {
    assert!(out.len() >= POLY_BYTES, "output buffer too short");

    for (coeffs, bytes) in poly
        .coeffs()
        .chunks_exact(4)
        .zip(out[..POLY_BYTES].chunks_exact_mut(7))
    {
        // Freeze into [0, q)
        let t0 = (coeffs[0] % Q) as u16;
        let t1 = (coeffs[1] % Q) as u16;
        let t2 = (coeffs[2] % Q) as u16;
        let t3 = (coeffs[3] % Q) as u16;

        bytes[0] = t0 as u8;
        bytes[1] = ((t0 >> 8) | (t1 << 6)) as u8;
        bytes[2] = (t1 >> 2) as u8;
        bytes[3] = ((t1 >> 10) | (t2 << 4)) as u8;
        bytes[4] = (t2 >> 4) as u8;
        bytes[5] = ((t2 >> 12) | (t3 << 2)) as u8;
        bytes[6] = (t3 >> 6) as u8;
    }
}

/// Unpack the leading `POLY_BYTES` of `bytes` into raw 14-bit coefficients.
///
/// Values are returned as found on the wire, without reduction, so values
/// in [q, 2^14) remain visible.
pub fn unpack_coefficients(bytes: &[u8]) -> Result<Vec<u16>> {
    ensure_len(bytes, POLY_BYTES)?;

    let mut coeffs = Vec::with_capacity(N);
    for b in bytes[..POLY_BYTES].chunks_exact(7) {
        let b: [u16; 7] = std::array::from_fn(|i| b[i] as u16);
        coeffs.push((b[0] | (b[1] << 8)) & COEFF_MASK);
        coeffs.push(((b[1] >> 6) | (b[2] << 2) | (b[3] << 10)) & COEFF_MASK);
        coeffs.push(((b[3] >> 4) | (b[4] << 4) | (b[5] << 12)) & COEFF_MASK);
        coeffs.push(((b[5] >> 2) | (b[6] << 6)) & COEFF_MASK);
    }
    Ok(coeffs)
}

/// Unpack a polynomial for arithmetic, reducing every coefficient modulo q.
pub fn unpack_poly(bytes: &[u8], ntt_domain: bool) -> Result<Poly> {
    let coeffs = unpack_coefficients(bytes)?
        .into_iter()
        .map(u64::from)
        .collect();
    Ok(if ntt_domain {
        Poly::from_ntt_coeffs(coeffs)
    } else {
        Poly::from_coeffs(coeffs)
    })
}

/// Encode Alice's message: encode(b) ‖ seed.
pub fn encode_a(b: &Poly, seed: &Seed) -> Vec<u8> {
    let mut out = vec![0u8; SEND_A_SIZE];
    pack_poly(b, &mut out);
    out[POLY_BYTES..].copy_from_slice(seed);
    out
}

/// Decode Alice's message into (b, seed); `b` is in NTT domain.
pub fn decode_a(bytes: &[u8]) -> Result<(Poly, Seed)> {
    ensure_len(bytes, SEND_A_SIZE)?;

    let b = unpack_poly(bytes, true)?;
    let mut seed = [0u8; SEED_BYTES];
    seed.copy_from_slice(&bytes[POLY_BYTES..SEND_A_SIZE]);
    Ok((b, seed))
}

/// Encode Bob's message: encode(u) ‖ encode(v).
pub fn encode_b(u: &Poly, v: &Poly) -> Vec<u8> {
    let mut out = vec![0u8; SEND_B_SIZE];
    let (u_bytes, v_bytes) = out.split_at_mut(POLY_BYTES);
    pack_poly(u, u_bytes);
    pack_poly(v, v_bytes);
    out
}

/// Decode Bob's message into (u, v); `u` is in NTT domain, `v` is not.
pub fn decode_b(bytes: &[u8]) -> Result<(Poly, Poly)> {
    ensure_len(bytes, SEND_B_SIZE)?;

    let u = unpack_poly(&bytes[..POLY_BYTES], true)?;
    let v = unpack_poly(&bytes[POLY_BYTES..SEND_B_SIZE], false)?;
    Ok((u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NobusError;

    fn ramp() -> Poly {
        Poly::from_coeffs((0..N as u64).map(|i| (i * 4099 + 1) % Q).collect())
    }

    #[test]
    fn test_pack_layout() {
        let mut p = Poly::zero();
        p.coeffs_mut()[0] = 0x3fff % Q;
        p.coeffs_mut()[1] = 1;

        let mut out = vec![0u8; POLY_BYTES];
        pack_poly(&p, &mut out);

        let t0 = 0x3fff % Q;
        assert_eq!(out[0], (t0 & 0xff) as u8);
        // t0 high six bits, then the low two bits of t1
        assert_eq!(out[1], ((t0 >> 8) | (1 << 6)) as u8);
        assert!(out[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_unpack_matches_pack() {
        let p = ramp();
        let mut out = vec![0u8; POLY_BYTES];
        pack_poly(&p, &mut out);

        let raw = unpack_coefficients(&out).unwrap();
        let expected: Vec<u16> = p.coeffs().iter().map(|&c| c as u16).collect();
        assert_eq!(raw, expected);
    }

    #[test]
    fn test_unpack_exposes_unreduced_values() {
        let bytes = vec![0xffu8; POLY_BYTES];
        let raw = unpack_coefficients(&bytes).unwrap();
        assert_eq!(raw.len(), N);
        assert!(raw.iter().all(|&c| c == 0x3fff));

        let reduced = unpack_poly(&bytes, false).unwrap();
        assert!(reduced.coeffs().iter().all(|&c| c == 0x3fff % Q));
    }

    #[test]
    fn test_alice_message_layout() {
        let b = ramp();
        let seed = [0xa5u8; SEED_BYTES];
        let msg = encode_a(&b, &seed);
        assert_eq!(msg.len(), SEND_A_SIZE);
        assert_eq!(&msg[POLY_BYTES..], &seed[..]);

        let (decoded, decoded_seed) = decode_a(&msg).unwrap();
        assert_eq!(decoded_seed, seed);
        assert!(decoded.is_ntt());
        assert_eq!(decoded.coeffs(), b.coeffs());
    }

    #[test]
    fn test_bob_message_layout() {
        let u = ramp();
        let v = Poly::from_coeffs((0..N as u64).collect());
        let msg = encode_b(&u, &v);
        assert_eq!(msg.len(), SEND_B_SIZE);

        let (du, dv) = decode_b(&msg).unwrap();
        assert!(du.is_ntt());
        assert!(!dv.is_ntt());
        assert_eq!(du.coeffs(), u.coeffs());
        assert_eq!(dv, v);
    }

    #[test]
    fn test_short_input_rejected() {
        for len in [0, 1, POLY_BYTES - 1] {
            let bytes = vec![0u8; len];
            assert!(matches!(
                unpack_coefficients(&bytes),
                Err(NobusError::InvalidInputLength { expected: POLY_BYTES, actual }) if actual == len
            ));
        }

        let bytes = vec![0u8; SEND_A_SIZE - 1];
        assert!(matches!(
            decode_a(&bytes),
            Err(NobusError::InvalidInputLength { expected: SEND_A_SIZE, .. })
        ));

        let bytes = vec![0u8; SEND_B_SIZE - 1];
        assert!(decode_b(&bytes).is_err());
    }
}
