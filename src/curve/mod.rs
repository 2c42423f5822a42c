//! Curve provider: X25519 Diffie-Hellman with Elligator2 representatives.
//!
//! # Overview
//!
//! The backdoor needs three curve capabilities:
//! - an ephemeral key pair whose public point has a representative that is
//!   indistinguishable from 32 random bytes,
//! - the inverse map from representative back to public point,
//! - Diffie-Hellman scalar multiplication.
//!
//! [`CurveProvider`] names these capabilities and [`X25519Elligator2`]
//! implements them over Curve25519.
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::curve::{CurveProvider, X25519Elligator2};
//! use rand::thread_rng;
//!
//! let curve = X25519Elligator2::default();
//! let mut private_key = [0u8; 32];
//! let ephemeral = curve.generate_key(&mut thread_rng(), &mut private_key).unwrap();
//!
//! assert_eq!(curve.representative_to_public_key(&ephemeral.representative), ephemeral.public);
//! ```

mod elligator;
mod field;

use rand::{CryptoRng, RngCore};
use tracing::{debug, trace, warn};
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::Zeroize;

use crate::error::{NobusError, Result};
use crate::params::{NobusParams, MAX_REPRESENTATIVE_ATTEMPTS};

pub use elligator::Elligator2;

/// Size of scalars, points and representatives.
pub const POINT_BYTES: usize = 32;

/// Public half of an ephemeral key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EphemeralPublic {
    /// Public point (u-coordinate)
    pub public: [u8; POINT_BYTES],
    /// Representative of `public`
    pub representative: [u8; POINT_BYTES],
}

/// Curve capabilities used by the backdoor.
pub trait CurveProvider {
    /// Draw private scalars into `private_key` until the public point has a
    /// representative.
    ///
    /// Retries are bounded; running out is a `RandomnessFailure`. On error
    /// `private_key` may hold a rejected scalar, and the caller must wipe it.
    fn generate_key<G: RngCore + CryptoRng>(
        &self,
        rng: &mut G,
        private_key: &mut [u8; POINT_BYTES],
    ) -> Result<EphemeralPublic>;

    /// Recover the public point encoded by a representative.
    fn representative_to_public_key(&self, representative: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES];

    /// out = scalar · point
    fn scalar_mult(
        &self,
        out: &mut [u8; POINT_BYTES],
        scalar: &[u8; POINT_BYTES],
        point: &[u8; POINT_BYTES],
    );

    /// scalar · base point
    fn public_key(&self, private_key: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES];
}

/// X25519 with Elligator2 representatives.
#[derive(Clone, Debug)]
pub struct X25519Elligator2 {
    map: Elligator2,
    max_attempts: u32,
}

impl X25519Elligator2 {
    /// Provider with a custom bound on key draws.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            map: Elligator2::new(),
            max_attempts,
        }
    }

    /// Provider configured from validated parameters.
    pub fn from_params(params: &NobusParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::with_max_attempts(params.max_representative_attempts))
    }

    /// The bound on key draws.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for X25519Elligator2 {
    fn default() -> Self {
        Self::with_max_attempts(MAX_REPRESENTATIVE_ATTEMPTS)
    }
}

impl CurveProvider for X25519Elligator2 {
    fn generate_key<G: RngCore + CryptoRng>(
        &self,
        rng: &mut G,
        private_key: &mut [u8; POINT_BYTES],
    ) -> Result<EphemeralPublic> {
        for attempt in 1..=self.max_attempts {
            rng.try_fill_bytes(private_key)?;
            let public = self.public_key(private_key);

            let mut tweak = [0u8; 1];
            rng.try_fill_bytes(&mut tweak)?;

            if let Some(representative) = self.map.public_key_to_representative(&public, tweak[0]) {
                debug!(attempt, "found representable ephemeral key");
                return Ok(EphemeralPublic {
                    public,
                    representative,
                });
            }
            trace!(attempt, "ephemeral key has no representative");
        }

        private_key.zeroize();
        warn!(
            max_attempts = self.max_attempts,
            "representative sampling exhausted its budget"
        );
        Err(NobusError::RandomnessFailure(format!(
            "no representable key after {} attempts",
            self.max_attempts
        )))
    }

    fn representative_to_public_key(&self, representative: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES] {
        self.map.representative_to_public_key(representative)
    }

    fn scalar_mult(
        &self,
        out: &mut [u8; POINT_BYTES],
        scalar: &[u8; POINT_BYTES],
        point: &[u8; POINT_BYTES],
    ) {
        // x25519 takes the scalar by value; that stack copy lives inside
        // x25519-dalek and is not wiped here
        *out = x25519(*scalar, *point);
    }

    fn public_key(&self, private_key: &[u8; POINT_BYTES]) -> [u8; POINT_BYTES] {
        x25519(*private_key, X25519_BASEPOINT_BYTES)
    }
}
