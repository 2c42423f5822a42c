//! The unmodified two-party handshake.
//!
//! Alice publishes b = a·s + e together with the seed of `a`. Bob encrypts
//! a fresh 256-bit key under b, and both sides hash that key into the
//! shared secret.
//!
//! This finish is the encryption-style one of NewHope-Simple. Bob's
//! message is 3584 bytes and is not wire-compatible with NewHope's 2048-byte
//! reconciliation message.
//!
//! ```text
//! Alice                                   Bob
//! seed, ns <- random
//! a = Parse(SHAKE-128(seed))
//! s, e <- psi_16(ns)
//! b = a∘s + e          -- (b, seed) -->   a = Parse(SHAKE-128(seed))
//!                                         s', e', e'' <- psi_16(ns')
//!                                         u = a∘s' + e'
//!                      <-- (u, v) ---     v = NTT⁻¹(b∘s') + e'' + Enc(ν)
//! ν = Dec(v - NTT⁻¹(u∘s))
//! K = SHA3-256(ν)                         K = SHA3-256(ν)
//! ```

use rand::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_256};
use zeroize::Zeroizing;

use super::codec;
use super::provider::{NewHopeRing, RingLwe};
use super::types::{PrivateKeyAlice, PublicKeyAlice, PublicKeyBob, SharedSecret};
use crate::error::Result;
use crate::math::Poly;
use crate::params::{Seed, N, Q, SEED_BYTES, SHARED_SECRET_BYTES};

/// Noise domain of the secret polynomial.
pub const DOMAIN_SECRET: u8 = 0;

/// Noise domain of the error polynomial.
pub const DOMAIN_ERROR: u8 = 1;

/// Noise domain of Bob's additional error polynomial e''.
pub const DOMAIN_ERROR_PRIME: u8 = 2;

/// Number of key bits carried by one handshake.
const KEY_BITS: usize = 8 * SHARED_SECRET_BYTES;

/// Each key bit is spread across this many coefficients.
const BIT_SPREAD: usize = N / KEY_BITS;

/// Derive Alice's key pair from the public seed and the noise seed.
///
/// Both the honest and the backdoored generator call this; they differ only
/// in where the two seeds come from.
pub fn derive_keypair<R: RingLwe + ?Sized>(
    ring: &R,
    seed: &Seed,
    noise_seed: &Seed,
) -> Result<(PrivateKeyAlice, PublicKeyAlice)> {
    // a <- Parse(SHAKE-128(seed))
    let a = ring.uniform(seed);

    // s, e <- psi_16
    let mut sk = ring.noise(noise_seed, DOMAIN_SECRET);
    ring.ntt(&mut sk);
    let private_key = PrivateKeyAlice::from_poly(sk)?;

    let mut e = Zeroizing::new(ring.noise(noise_seed, DOMAIN_ERROR));
    ring.ntt(&mut e);

    // b <- a∘s + e
    let r = Zeroizing::new(ring.pointwise_mul(private_key.poly(), &a));
    let b = ring.add(&e, &r);

    let public_key = PublicKeyAlice::from_bytes(&ring.encode(&b, seed))?;
    Ok((private_key, public_key))
}

/// Generate an honest key pair for Alice.
pub fn generate_keypair<G: RngCore + CryptoRng>(
    rng: &mut G,
    ring: &NewHopeRing,
) -> Result<(PrivateKeyAlice, PublicKeyAlice)> {
    let mut seed = [0u8; SEED_BYTES];
    rng.try_fill_bytes(&mut seed)?;

    let mut noise_seed = Zeroizing::new([0u8; SEED_BYTES]);
    rng.try_fill_bytes(&mut noise_seed[..])?;

    derive_keypair(ring, &seed, &noise_seed)
}

/// Bob's side: respond to Alice's public key and derive the shared secret.
pub fn key_exchange_bob<G: RngCore + CryptoRng>(
    rng: &mut G,
    alice: &PublicKeyAlice,
    ring: &NewHopeRing,
) -> Result<(PublicKeyBob, SharedSecret)> {
    let (b, seed) = ring.decode(alice.as_bytes())?;
    let a = ring.uniform(&seed);

    let mut noise_seed = Zeroizing::new([0u8; SEED_BYTES]);
    rng.try_fill_bytes(&mut noise_seed[..])?;
    let mut nu = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
    rng.try_fill_bytes(&mut nu[..])?;

    let mut s = Zeroizing::new(ring.noise(&noise_seed, DOMAIN_SECRET));
    ring.ntt(&mut s);
    let mut e = Zeroizing::new(ring.noise(&noise_seed, DOMAIN_ERROR));
    ring.ntt(&mut e);
    let e2 = Zeroizing::new(ring.noise(&noise_seed, DOMAIN_ERROR_PRIME));

    // u <- a∘s' + e'
    let u = ring.add(&ring.pointwise_mul(&a, &s), &e);

    // v <- NTT⁻¹(b∘s') + e'' + Enc(ν)
    let mut bs = Zeroizing::new(ring.pointwise_mul(&b, &s));
    ring.inverse_ntt(&mut bs);
    let noisy = Zeroizing::new(ring.add(&bs, &e2));
    let message = Zeroizing::new(encode_message(&nu));
    let v = ring.add(&noisy, &message);

    let bob = PublicKeyBob::from_bytes(&codec::encode_b(&u, &v))?;
    Ok((bob, hash_key(&nu)))
}

/// Alice's side: finish the handshake with Bob's response.
pub fn key_exchange_alice(
    bob: &PublicKeyBob,
    private_key: &PrivateKeyAlice,
    ring: &NewHopeRing,
) -> Result<SharedSecret> {
    let (u, v) = codec::decode_b(bob.as_bytes())?;

    let mut us = Zeroizing::new(ring.pointwise_mul(&u, private_key.poly()));
    ring.inverse_ntt(&mut us);
    let w = Zeroizing::new(&v - &*us);

    let nu = decode_message(&w);
    Ok(hash_key(&nu))
}

/// Spread each key bit over `BIT_SPREAD` coefficients as 0 or ⌊q/2⌋.
fn encode_message(key: &[u8; SHARED_SECRET_BYTES]) -> Poly {
    let mut poly = Poly::zero();
    let coeffs = poly.coeffs_mut();
    for i in 0..KEY_BITS {
        let bit = ((key[i / 8] >> (i % 8)) & 1) as u64;
        for j in 0..BIT_SPREAD {
            coeffs[i + j * KEY_BITS] = bit * (Q / 2);
        }
    }
    poly
}

/// A bit is set iff its coefficients lie closer to ⌊q/2⌋ than to 0 in total.
fn decode_message(w: &Poly) -> Zeroizing<[u8; SHARED_SECRET_BYTES]> {
    let mut key = Zeroizing::new([0u8; SHARED_SECRET_BYTES]);
    let coeffs = w.coeffs();
    for i in 0..KEY_BITS {
        let distance: u64 = (0..BIT_SPREAD)
            .map(|j| coeffs[i + j * KEY_BITS].abs_diff(Q / 2))
            .sum();
        if distance < Q {
            key[i / 8] |= 1 << (i % 8);
        }
    }
    key
}

fn hash_key(nu: &[u8; SHARED_SECRET_BYTES]) -> SharedSecret {
    let digest = Sha3_256::digest(nu);
    let mut out = [0u8; SHARED_SECRET_BYTES];
    out.copy_from_slice(&digest);
    SharedSecret::new(out)
}
