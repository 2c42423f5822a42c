//! Overseer-side recovery of backdoored private keys.

use tracing::debug;
use zeroize::Zeroizing;

use super::overseer::OverseerPrivateKey;
use crate::curve::{CurveProvider, X25519Elligator2};
use crate::error::Result;
use crate::params::{NobusParams, SEED_BYTES};
use crate::rlwe::{NewHopeRing, PrivateKeyAlice, PublicKeyAlice, RingLwe, DOMAIN_SECRET};

/// Recovers Alice's secret polynomial from her public key alone.
///
/// Only the secret polynomial is rebuilt. The error polynomial is not
/// needed to finish a handshake and is never sampled here.
#[derive(Clone, Debug)]
pub struct BackdoorKeyRecoverer<C = X25519Elligator2, R = NewHopeRing> {
    curve: C,
    ring: R,
}

impl BackdoorKeyRecoverer {
    pub fn new() -> Self {
        Self::with_providers(X25519Elligator2::default(), NewHopeRing::default())
    }

    pub fn from_params(params: &NobusParams) -> Result<Self> {
        Ok(Self::with_providers(
            X25519Elligator2::from_params(params)?,
            NewHopeRing::new(params)?,
        ))
    }
}

impl Default for BackdoorKeyRecoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CurveProvider, R: RingLwe> BackdoorKeyRecoverer<C, R> {
    pub fn with_providers(curve: C, ring: R) -> Self {
        Self { curve, ring }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn ring(&self) -> &R {
        &self.ring
    }

    /// Rebuild the private key behind `public_key`.
    ///
    /// Deterministic: the same key bytes and overseer key always give the
    /// same polynomial. A key that was not generated for this overseer
    /// yields an unrelated polynomial, not an error.
    pub fn recover(
        &self,
        public_key: &PublicKeyAlice,
        overseer: &OverseerPrivateKey,
    ) -> Result<PrivateKeyAlice> {
        let (_, representative) = self.ring.decode(public_key.as_bytes())?;
        let ephemeral_public = self.curve.representative_to_public_key(&representative);

        let mut noise_seed = Zeroizing::new([0u8; SEED_BYTES]);
        self.curve
            .scalar_mult(&mut *noise_seed, overseer.as_bytes(), &ephemeral_public);

        let mut sk = self.ring.noise(&noise_seed, DOMAIN_SECRET);
        self.ring.ntt(&mut sk);

        debug!("recovered backdoored secret polynomial");
        PrivateKeyAlice::from_poly(sk)
    }
}

/// Recover a private key with the default providers.
pub fn recover_backdoored_key(
    public_key: &PublicKeyAlice,
    overseer: &OverseerPrivateKey,
) -> Result<PrivateKeyAlice> {
    BackdoorKeyRecoverer::new().recover(public_key, overseer)
}
