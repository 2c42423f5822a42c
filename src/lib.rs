//! NOBUS: a kleptographic backdoor for NewHope Ring-LWE key generation
//!
//! This crate implements a backdoored key generator for the NewHope key
//! exchange whose public keys are bit-compatible with the honest protocol,
//! together with the overseer-side key recovery and a distinguisher that
//! tells genuine public keys from random strings.
//!
//! Key components:
//! - NewHope Ring-LWE arithmetic: n = 1024, q = 12289, negacyclic NTT
//! - Honest handshake between Alice and Bob
//! - X25519 with Elligator2 representatives for the hidden ephemeral key
//! - Backdoored generation, recovery and classification
//!
//! Alice's public key has the NewHope layout (1824 bytes). Bob's reply does
//! not: the handshake finishes with encryption-style reconciliation, so Bob
//! sends encode(u) ‖ encode(v) in 3584 bytes instead of NewHope's 2048-byte
//! message with helper bits. Bob's reply is not wire-compatible with NewHope.

pub mod params;
pub mod error;
pub mod math;
pub mod rlwe;
pub mod curve;
pub mod nobus;

pub use error::{NobusError, Result};
pub use nobus::{
    generate_backdoored_keypair, recover_backdoored_key,
    is_probably_public_key, count_out_of_range, false_positive_log2,
    BackdoorKeyGenerator, BackdoorKeyRecoverer, BackdoorScratch,
    OverseerKeyPair, OverseerPrivateKey, OverseerPublicKey,
};
pub use params::NobusParams;
pub use rlwe::{
    generate_keypair, key_exchange_alice, key_exchange_bob,
    PrivateKeyAlice, PublicKeyAlice, PublicKeyBob, SharedSecret,
};
