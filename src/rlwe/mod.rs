//! NewHope-style Ring-LWE key exchange.
//!
//! # Overview
//!
//! Keys live in R_q = Z_q[X]/(X^1024 + 1) with q = 12289. Alice publishes
//! b = a·s + e together with the 32-byte seed that expands to `a`; Bob
//! answers with (u, v) and both parties hash a shared 256-bit key.
//!
//! - [`RingLwe`] names the ring capabilities the key generators need, and
//!   [`NewHopeRing`] implements them.
//! - [`derive_keypair`] is the single key derivation path shared by the
//!   honest generator and the backdoored one.
//! - [`codec`] holds the fixed wire format.
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::rlwe::{generate_keypair, key_exchange_alice, key_exchange_bob, NewHopeRing};
//! use rand::thread_rng;
//!
//! let ring = NewHopeRing::default();
//! let (sk, pk) = generate_keypair(&mut thread_rng(), &ring).unwrap();
//! let (reply, bob_secret) = key_exchange_bob(&mut thread_rng(), &pk, &ring).unwrap();
//! let alice_secret = key_exchange_alice(&reply, &sk, &ring).unwrap();
//!
//! assert_eq!(alice_secret.as_bytes(), bob_secret.as_bytes());
//! ```

pub mod codec;
mod kex;
mod provider;
mod types;

pub use kex::{
    derive_keypair, generate_keypair, key_exchange_alice, key_exchange_bob, DOMAIN_ERROR,
    DOMAIN_ERROR_PRIME, DOMAIN_SECRET,
};
pub use provider::{NewHopeRing, RingLwe};
pub use types::{PrivateKeyAlice, PublicKeyAlice, PublicKeyBob, SharedSecret};
