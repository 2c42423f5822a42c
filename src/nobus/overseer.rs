//! The overseer's curve key pair.
//!
//! The private key never leaves the overseer; the public key is embedded in
//! the backdoored generator's host application and passed explicitly into
//! every generation call.

use std::fmt;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::{CurveProvider, POINT_BYTES};
use crate::error::Result;

/// Overseer public point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseerPublicKey([u8; POINT_BYTES]);

impl OverseerPublicKey {
    pub fn from_bytes(bytes: [u8; POINT_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; POINT_BYTES] {
        &self.0
    }
}

/// Overseer private scalar. Wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OverseerPrivateKey([u8; POINT_BYTES]);

impl OverseerPrivateKey {
    pub fn from_bytes(bytes: [u8; POINT_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; POINT_BYTES] {
        &self.0
    }
}

impl fmt::Debug for OverseerPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OverseerPrivateKey([REDACTED])")
    }
}

/// Overseer key pair.
#[derive(Clone, Debug)]
pub struct OverseerKeyPair {
    pub private: OverseerPrivateKey,
    pub public: OverseerPublicKey,
}

impl OverseerKeyPair {
    /// Generate a fresh key pair.
    pub fn generate<G, C>(rng: &mut G, curve: &C) -> Result<Self>
    where
        G: RngCore + CryptoRng,
        C: CurveProvider,
    {
        let mut private = OverseerPrivateKey([0u8; POINT_BYTES]);
        rng.try_fill_bytes(&mut private.0)?;
        Ok(Self::from_private(private, curve))
    }

    /// Derive the public half of an existing private key.
    pub fn from_private<C: CurveProvider>(private: OverseerPrivateKey, curve: &C) -> Self {
        let public = OverseerPublicKey(curve.public_key(private.as_bytes()));
        Self { private, public }
    }
}
