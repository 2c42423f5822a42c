//! Backdoored key generation.

use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::overseer::OverseerPublicKey;
use super::scratch::{BackdoorScratch, WipeOnDrop};
use crate::curve::{CurveProvider, X25519Elligator2};
use crate::error::Result;
use crate::params::NobusParams;
use crate::rlwe::{derive_keypair, NewHopeRing, PrivateKeyAlice, PublicKeyAlice, RingLwe};

/// Generates Alice key pairs that the overseer can later recover.
///
/// The public seed is the Elligator2 representative of an ephemeral curve
/// point, and the noise seed is the raw X25519 shared point between the
/// ephemeral scalar and the overseer public key. Everything after that is
/// the honest derivation, so the wire output has the honest format.
#[derive(Clone, Debug)]
pub struct BackdoorKeyGenerator<C = X25519Elligator2, R = NewHopeRing> {
    curve: C,
    ring: R,
}

impl BackdoorKeyGenerator {
    /// Generator over X25519 and the NewHope ring.
    pub fn new() -> Self {
        Self::with_providers(X25519Elligator2::default(), NewHopeRing::default())
    }

    /// Generator configured from validated parameters.
    pub fn from_params(params: &NobusParams) -> Result<Self> {
        Ok(Self::with_providers(
            X25519Elligator2::from_params(params)?,
            NewHopeRing::new(params)?,
        ))
    }
}

impl Default for BackdoorKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CurveProvider, R: RingLwe> BackdoorKeyGenerator<C, R> {
    pub fn with_providers(curve: C, ring: R) -> Self {
        Self { curve, ring }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn ring(&self) -> &R {
        &self.ring
    }

    /// Generate a backdoored key pair for `overseer`.
    ///
    /// Fails with `RandomnessFailure` if `rng` fails or no representable
    /// ephemeral key is found within the curve's attempt budget.
    pub fn generate<G: RngCore + CryptoRng>(
        &self,
        rng: &mut G,
        overseer: &OverseerPublicKey,
    ) -> Result<(PrivateKeyAlice, PublicKeyAlice)> {
        let mut scratch = BackdoorScratch::new();
        self.generate_with_scratch(rng, overseer, &mut scratch)
    }

    /// Like [`generate`](Self::generate), with the ephemeral scalar and the
    /// noise seed held in caller-owned `scratch`.
    ///
    /// `scratch` is all-zero when this returns, whether it succeeds or not.
    pub fn generate_with_scratch<G: RngCore + CryptoRng>(
        &self,
        rng: &mut G,
        overseer: &OverseerPublicKey,
        scratch: &mut BackdoorScratch,
    ) -> Result<(PrivateKeyAlice, PublicKeyAlice)> {
        let mut guard = WipeOnDrop::new(scratch);
        let BackdoorScratch {
            ephemeral_private,
            noise_seed,
        } = &mut *guard;

        let ephemeral = self.curve.generate_key(rng, ephemeral_private)?;

        // The shared point is the noise seed as is, without a KDF
        self.curve
            .scalar_mult(noise_seed, ephemeral_private, overseer.as_bytes());

        let keys = derive_keypair(&self.ring, &ephemeral.representative, noise_seed)?;
        debug!("derived backdoored key pair");
        Ok(keys)
    }
}

/// Generate a backdoored key pair with the default providers.
pub fn generate_backdoored_keypair<G: RngCore + CryptoRng>(
    rng: &mut G,
    overseer: &OverseerPublicKey,
) -> Result<(PrivateKeyAlice, PublicKeyAlice)> {
    BackdoorKeyGenerator::new().generate(rng, overseer)
}
