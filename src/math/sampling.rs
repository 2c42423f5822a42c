//! Seeded samplers for the public polynomial `a` and for noise.
//!
//! Both samplers are deterministic functions of a 32-byte seed: the same
//! seed always yields the same polynomial. This is what lets a party
//! holding only the seed re-derive a polynomial later.

use byteorder::{ByteOrder, LittleEndian};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, Key, Nonce};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;
use zeroize::Zeroizing;

use super::poly::Poly;
use crate::params::{Seed, N, NOISE_K, Q};

/// SHAKE-128 block size in bytes.
const SHAKE128_RATE: usize = 168;

/// Rejection bound for uniform sampling: the largest multiple of q below 2^16.
const UNIFORM_BOUND: u16 = 5 * Q as u16;

/// Expand a seed into a uniformly random NTT-domain polynomial.
///
/// a <- Parse(SHAKE-128(seed)): little-endian 16-bit candidates below 5q
/// are accepted and reduced modulo q. The output is public.
pub fn uniform(seed: &Seed) -> Poly {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    let mut reader = hasher.finalize_xof();

    let mut buf = [0u8; SHAKE128_RATE * 14];
    reader.read(&mut buf);

    let mut coeffs = Vec::with_capacity(N);
    let mut block_len = buf.len();
    let mut pos = 0;
    while coeffs.len() < N {
        if pos == block_len {
            reader.read(&mut buf[..SHAKE128_RATE]);
            block_len = SHAKE128_RATE;
            pos = 0;
        }

        let val = LittleEndian::read_u16(&buf[pos..pos + 2]);
        if val < UNIFORM_BOUND {
            coeffs.push(val as u64 % Q);
        }
        pos += 2;
    }

    Poly::from_ntt_coeffs(coeffs)
}

/// Sample a coefficient-domain noise polynomial from psi_16.
///
/// The ChaCha20 keystream keyed by `seed`, with `nonce` as the first nonce
/// byte, supplies 4 bytes per coefficient. Each coefficient is the popcount
/// of the low 16 bits minus the popcount of the high 16 bits, modulo q.
///
/// Distinct `nonce` values give independent polynomials from one seed.
pub fn noise(seed: &Seed, nonce: u8) -> Poly {
    let mut iv = [0u8; 12];
    iv[0] = nonce;

    // The cipher state holds the seed and is wiped on drop
    let mut cipher = ChaCha20::new(Key::from_slice(seed), Nonce::from_slice(&iv));
    let mut buf = Zeroizing::new(vec![0u8; 4 * N]);
    cipher.apply_keystream(&mut buf);

    let half_mask = (1u32 << NOISE_K) - 1;
    let coeffs = buf
        .chunks_exact(4)
        .map(|chunk| {
            let t = LittleEndian::read_u32(chunk);
            let a = (t & half_mask).count_ones() as u64;
            let b = (t >> NOISE_K).count_ones() as u64;
            (a + Q - b) % Q
        })
        .collect();

    Poly::from_coeffs(coeffs)
}
