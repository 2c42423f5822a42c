//! Stand-in providers for exercising the backdoor core.

use std::cell::RefCell;

use rand::{CryptoRng, RngCore};

use crate::curve::{CurveProvider, EphemeralPublic, X25519Elligator2, POINT_BYTES};
use crate::error::{NobusError, Result};
use crate::math::Poly;
use crate::params::Seed;
use crate::rlwe::{NewHopeRing, RingLwe};

/// NewHope ring that records every noise request.
#[derive(Default)]
pub(crate) struct RecordingRing {
    inner: NewHopeRing,
    pub(crate) noise_calls: RefCell<Vec<(Seed, u8)>>,
}

impl RecordingRing {
    pub(crate) fn domains(&self) -> Vec<u8> {
        self.noise_calls.borrow().iter().map(|&(_, tag)| tag).collect()
    }
}

impl RingLwe for RecordingRing {
    fn uniform(&self, seed: &Seed) -> Poly {
        self.inner.uniform(seed)
    }

    fn noise(&self, seed: &Seed, domain: u8) -> Poly {
        self.noise_calls.borrow_mut().push((*seed, domain));
        self.inner.noise(seed, domain)
    }

    fn ntt(&self, poly: &mut Poly) {
        self.inner.ntt(poly)
    }

    fn inverse_ntt(&self, poly: &mut Poly) {
        self.inner.inverse_ntt(poly)
    }

    fn pointwise_mul(&self, a: &Poly, b: &Poly) -> Poly {
        self.inner.pointwise_mul(a, b)
    }

    fn add(&self, a: &Poly, b: &Poly) -> Poly {
        self.inner.add(a, b)
    }
}

/// Curve that writes a scalar into the caller's buffer and then fails.
#[derive(Default)]
pub(crate) struct FailingCurve {
    inner: X25519Elligator2,
}

impl CurveProvider for FailingCurve {
    fn generate_key<G: RngCore + CryptoRng>(
        &self,
        _rng: &mut G,
        private_key: &mut [u8; POINT_BYTES],
    ) -> Result<EphemeralPublic> {
        *private_key = [0xa5; POINT_BYTES];
        Err(NobusError::RandomnessFailure("curve stand-in".into()))
    }

    fn representative_to_public_key(&self, representative: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES] {
        self.inner.representative_to_public_key(representative)
    }

    fn scalar_mult(
        &self,
        out: &mut [u8; POINT_BYTES],
        scalar: &[u8; POINT_BYTES],
        point: &[u8; POINT_BYTES],
    ) {
        self.inner.scalar_mult(out, scalar, point)
    }

    fn public_key(&self, private_key: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES] {
        self.inner.public_key(private_key)
    }
}

/// Randomness source that always fails.
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("infallible draw from FailingRng")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("infallible draw from FailingRng")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("infallible draw from FailingRng")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        Err(rand_core::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingRng {}
