//! Key and message types of the key exchange.
//!
//! Public keys are opaque wire buffers of fixed length. Whether a buffer was
//! produced by the honest or the backdoored generator cannot be told from
//! its layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{NobusError, Result};
use crate::math::Poly;
use crate::params::{SEND_A_SIZE, SEND_B_SIZE, SHARED_SECRET_BYTES};

/// Alice's private key: the secret polynomial s in NTT domain.
///
/// Wiped when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyAlice {
    pub(crate) sk: Poly,
}

impl PrivateKeyAlice {
    /// Wrap an NTT-domain secret polynomial.
    ///
    /// Fails with `InvalidParams` for a coefficient-domain polynomial.
    pub fn from_poly(sk: Poly) -> Result<Self> {
        if !sk.is_ntt() {
            return Err(NobusError::InvalidParams(
                "secret key must be in NTT domain".into(),
            ));
        }
        Ok(Self { sk })
    }

    /// The secret polynomial.
    pub fn poly(&self) -> &Poly {
        &self.sk
    }
}

impl fmt::Debug for PrivateKeyAlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyAlice([REDACTED])")
    }
}

/// Alice's public message: encode(b) ‖ seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PublicKeyAlice {
    send: Vec<u8>,
}

impl PublicKeyAlice {
    /// Parse a wire buffer of exactly `SEND_A_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::try_from(bytes.to_vec())
    }

    /// The wire representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.send
    }
}

/// Bob's public message: encode(u) ‖ encode(v).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PublicKeyBob {
    send: Vec<u8>,
}

impl PublicKeyBob {
    /// Parse a wire buffer of exactly `SEND_B_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::try_from(bytes.to_vec())
    }

    /// The wire representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.send
    }
}

/// Shared secret produced by a completed handshake. Wiped when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_BYTES]);

impl SharedSecret {
    pub(crate) fn new(bytes: [u8; SHARED_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    /// The secret bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

impl TryFrom<Vec<u8>> for PublicKeyAlice {
    type Error = NobusError;

    fn try_from(send: Vec<u8>) -> Result<Self> {
        check_exact(&send, SEND_A_SIZE)?;
        Ok(Self { send })
    }
}

impl From<PublicKeyAlice> for Vec<u8> {
    fn from(key: PublicKeyAlice) -> Self {
        key.send
    }
}

impl TryFrom<Vec<u8>> for PublicKeyBob {
    type Error = NobusError;

    fn try_from(send: Vec<u8>) -> Result<Self> {
        check_exact(&send, SEND_B_SIZE)?;
        Ok(Self { send })
    }
}

impl From<PublicKeyBob> for Vec<u8> {
    fn from(key: PublicKeyBob) -> Self {
        key.send
    }
}

fn check_exact(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(NobusError::InvalidInputLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
