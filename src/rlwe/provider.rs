//! Ring-LWE capability interface and its NewHope implementation.
//!
//! The backdoor only needs a narrow set of ring operations. Expressing them
//! as a trait lets the generator and recoverer run against stand-in rings
//! in tests.

use tracing::trace;

use super::codec;
use crate::error::Result;
use crate::math::{sampling, NttContext, Poly};
use crate::params::{NobusParams, Seed};

/// Ring operations used by key generation and recovery.
pub trait RingLwe {
    /// Expand a public seed into the NTT-domain polynomial `a`.
    fn uniform(&self, seed: &Seed) -> Poly;

    /// Sample a coefficient-domain noise polynomial, separated by `domain`.
    fn noise(&self, seed: &Seed, domain: u8) -> Poly;

    /// Transform into NTT domain in place.
    fn ntt(&self, poly: &mut Poly);

    /// Transform out of NTT domain in place.
    fn inverse_ntt(&self, poly: &mut Poly);

    /// Pointwise product of NTT-domain polynomials.
    fn pointwise_mul(&self, a: &Poly, b: &Poly) -> Poly;

    /// Sum of polynomials in the same domain.
    fn add(&self, a: &Poly, b: &Poly) -> Poly;

    /// Alice's wire message for (b, seed).
    fn encode(&self, b: &Poly, seed: &Seed) -> Vec<u8> {
        codec::encode_a(b, seed)
    }

    /// Split Alice's wire message into (b, seed).
    fn decode(&self, bytes: &[u8]) -> Result<(Poly, Seed)> {
        codec::decode_a(bytes)
    }
}

/// The NewHope ring: n = 1024, q = 12289.
#[derive(Clone, Debug, Default)]
pub struct NewHopeRing {
    ctx: NttContext,
}

impl NewHopeRing {
    /// Build the ring after validating `params`.
    pub fn new(params: &NobusParams) -> Result<Self> {
        params.validate()?;
        trace!(ring_dim = params.ring_dim, q = params.q, "building NTT context");
        Ok(Self {
            ctx: NttContext::new(params.ring_dim, params.q),
        })
    }
}

impl RingLwe for NewHopeRing {
    fn uniform(&self, seed: &Seed) -> Poly {
        sampling::uniform(seed)
    }

    fn noise(&self, seed: &Seed, domain: u8) -> Poly {
        sampling::noise(seed, domain)
    }

    fn ntt(&self, poly: &mut Poly) {
        poly.to_ntt(&self.ctx);
    }

    fn inverse_ntt(&self, poly: &mut Poly) {
        poly.from_ntt(&self.ctx);
    }

    fn pointwise_mul(&self, a: &Poly, b: &Poly) -> Poly {
        a.mul_ntt_domain(b, &self.ctx)
    }

    fn add(&self, a: &Poly, b: &Poly) -> Poly {
        a + b
    }
}
