//! Kleptographic backdoor for Ring-LWE key generation.
//!
//! # Overview
//!
//! A backdoored Alice key looks exactly like an honest one: same length,
//! same layout, and a seed field that is indistinguishable from random
//! bytes. The seed is in fact the Elligator2 representative of an
//! ephemeral X25519 point P = k·G, and the noise seed is k·O for the
//! overseer public key O. Holding o, the overseer decodes P from the seed,
//! computes o·P = k·O and rebuilds Alice's secret polynomial.
//!
//! Only the overseer can do this (nobody-but-us): recovering the noise seed
//! without o is a Diffie-Hellman problem.
//!
//! ```text
//! generate:  k <- rng until k·G has a representative r
//!            seed = r, ns = k·O
//!            (sk, pk) = derive_keypair(seed, ns)
//!
//! recover:   P = Elligator2(seed), ns = o·P
//!            sk = NTT(psi_16(ns, 0))
//! ```
//!
//! # Example
//!
//! ```
//! use nobus_rlwe::curve::X25519Elligator2;
//! use nobus_rlwe::nobus::{BackdoorKeyGenerator, BackdoorKeyRecoverer, OverseerKeyPair};
//! use rand::thread_rng;
//!
//! let overseer = OverseerKeyPair::generate(&mut thread_rng(), &X25519Elligator2::default()).unwrap();
//!
//! let (sk, pk) = BackdoorKeyGenerator::new()
//!     .generate(&mut thread_rng(), &overseer.public)
//!     .unwrap();
//! let recovered = BackdoorKeyRecoverer::new().recover(&pk, &overseer.private).unwrap();
//!
//! assert_eq!(recovered, sk);
//! ```

pub mod distinguisher;
mod generator;
mod overseer;
mod recoverer;
mod scratch;

#[cfg(test)]
mod testing;

pub use distinguisher::{count_out_of_range, false_positive_log2, is_probably_public_key};
pub use generator::{generate_backdoored_keypair, BackdoorKeyGenerator};
pub use overseer::{OverseerKeyPair, OverseerPrivateKey, OverseerPublicKey};
pub use recoverer::{recover_backdoored_key, BackdoorKeyRecoverer};
pub use scratch::BackdoorScratch;
