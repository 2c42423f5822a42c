//! Scoped storage for the generator's transient secrets.

use std::fmt;
use std::ops::{Deref, DerefMut};

use zeroize::Zeroize;

use crate::curve::POINT_BYTES;
use crate::params::{Seed, SEED_BYTES};

/// Buffers holding the ephemeral private scalar and the noise seed while a
/// backdoored key pair is generated.
///
/// The generator borrows the scratch through [`WipeOnDrop`], so both buffers
/// are zero again whenever generation returns, on success and on error.
#[derive(Default, Zeroize)]
pub struct BackdoorScratch {
    pub(crate) ephemeral_private: [u8; POINT_BYTES],
    pub(crate) noise_seed: Seed,
}

impl BackdoorScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ephemeral private scalar buffer.
    pub fn ephemeral_private(&self) -> &[u8; POINT_BYTES] {
        &self.ephemeral_private
    }

    /// The noise seed buffer.
    pub fn noise_seed(&self) -> &[u8; SEED_BYTES] {
        &self.noise_seed
    }

    /// True if both buffers are all-zero.
    pub fn is_wiped(&self) -> bool {
        self.ephemeral_private.iter().all(|&b| b == 0) && self.noise_seed.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for BackdoorScratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackdoorScratch")
            .field("wiped", &self.is_wiped())
            .finish()
    }
}

/// Mutable borrow that zeroizes its target when it goes out of scope.
pub(crate) struct WipeOnDrop<'a, T: Zeroize>(&'a mut T);

impl<'a, T: Zeroize> WipeOnDrop<'a, T> {
    pub(crate) fn new(target: &'a mut T) -> Self {
        Self(target)
    }
}

impl<T: Zeroize> Deref for WipeOnDrop<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: Zeroize> DerefMut for WipeOnDrop<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T: Zeroize> Drop for WipeOnDrop<'_, T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
