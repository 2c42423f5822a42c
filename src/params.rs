//! Parameter set for the NewHope-style key exchange and its backdoor.
//!
//! The wire format is fixed: every honest or backdoored public key has the
//! same length and layout, so the ring dimension and modulus are constants.
//! `NobusParams` carries the tunable parts and validates the rest.

use serde::{Deserialize, Serialize};

use crate::error::{NobusError, Result};

/// Ring dimension n of R_q = Z_q[X]/(X^n + 1).
pub const N: usize = 1024;

/// Modulus q = 12289 (q ≡ 1 mod 2n).
pub const Q: u64 = 12289;

/// Bits per packed coefficient.
pub const COEFF_BITS: u32 = 14;

/// Size of one packed polynomial: n * 14 / 8.
pub const POLY_BYTES: usize = N * COEFF_BITS as usize / 8;

/// Size of the public seed that expands to `a`.
pub const SEED_BYTES: usize = 32;

/// Alice's message: encode(b) || seed.
pub const SEND_A_SIZE: usize = POLY_BYTES + SEED_BYTES;

/// Bob's message: encode(u) || encode(v).
pub const SEND_B_SIZE: usize = 2 * POLY_BYTES;

/// Size of the derived shared secret.
pub const SHARED_SECRET_BYTES: usize = 32;

/// Parameter k of the centered binomial noise distribution psi_k.
pub const NOISE_K: u32 = 16;

/// Default bound on Elligator2 representative sampling attempts.
///
/// Each attempt succeeds with probability 1/2, so exhaustion happens with
/// probability 2^-64.
pub const MAX_REPRESENTATIVE_ATTEMPTS: u32 = 64;

/// A 32-byte seed (public `a` seed, or secret noise seed).
pub type Seed = [u8; SEED_BYTES];

/// Tunable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NobusParams {
    /// Ring dimension n (power of two)
    pub ring_dim: usize,

    /// Coefficient modulus q
    /// Must be NTT-friendly: q ≡ 1 (mod 2n)
    pub q: u64,

    /// Upper bound on ephemeral key draws while searching for a point with
    /// an Elligator2 representative
    pub max_representative_attempts: u32,
}

impl NobusParams {
    /// Parameters with a custom representative attempt budget.
    pub fn with_max_attempts(max_representative_attempts: u32) -> Self {
        Self {
            max_representative_attempts,
            ..Self::default()
        }
    }

    /// Check that the parameters are usable with the fixed wire format.
    pub fn validate(&self) -> Result<()> {
        if !self.ring_dim.is_power_of_two() {
            return Err(NobusError::InvalidParams(
                "ring_dim must be a power of two".into(),
            ));
        }

        if self.q % (2 * self.ring_dim as u64) != 1 {
            return Err(NobusError::InvalidParams(
                "q must be ≡ 1 (mod 2n) for NTT".into(),
            ));
        }

        if self.q >= 1 << COEFF_BITS {
            return Err(NobusError::InvalidParams(format!(
                "q must fit in {} bits",
                COEFF_BITS
            )));
        }

        if self.ring_dim != N || self.q != Q {
            return Err(NobusError::InvalidParams(format!(
                "wire format is fixed to n={}, q={}",
                N, Q
            )));
        }

        if self.max_representative_attempts == 0 {
            return Err(NobusError::InvalidParams(
                "max_representative_attempts must be positive".into(),
            ));
        }

        Ok(())
    }
}

impl Default for NobusParams {
    fn default() -> Self {
        Self {
            ring_dim: N,
            q: Q,
            max_representative_attempts: MAX_REPRESENTATIVE_ATTEMPTS,
        }
    }
}
