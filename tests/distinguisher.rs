//! Distinguisher tests over genuine keys and random strings

use nobus_rlwe::curve::X25519Elligator2;
use nobus_rlwe::nobus::{
    count_out_of_range, generate_backdoored_keypair, is_probably_public_key, OverseerKeyPair,
};
use nobus_rlwe::params::{POLY_BYTES, SEND_A_SIZE, SEND_B_SIZE};
use nobus_rlwe::rlwe::{codec, generate_keypair, key_exchange_bob, NewHopeRing};
use nobus_rlwe::NobusError;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const SAMPLES: usize = 100;

#[test]
fn test_honest_keys_classified_as_keys() {
    let ring = NewHopeRing::default();
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    for i in 0..SAMPLES {
        let (_, alice) = generate_keypair(&mut rng, &ring).unwrap();
        assert!(is_probably_public_key(alice.as_bytes()).unwrap(), "Alice key {}", i);

        let (bob, _) = key_exchange_bob(&mut rng, &alice, &ring).unwrap();
        assert!(is_probably_public_key(bob.as_bytes()).unwrap(), "Bob key {}", i);
        assert!(
            is_probably_public_key(&bob.as_bytes()[POLY_BYTES..]).unwrap(),
            "Bob v {}",
            i
        );
    }
}

#[test]
fn test_backdoored_keys_classified_as_keys() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let overseer = OverseerKeyPair::generate(&mut rng, &X25519Elligator2::default()).unwrap();

    for i in 0..SAMPLES {
        let (_, pk) = generate_backdoored_keypair(&mut rng, &overseer.public).unwrap();
        assert!(is_probably_public_key(pk.as_bytes()).unwrap(), "key {}", i);
    }
}

#[test]
fn test_random_strings_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);

    for (i, len) in [POLY_BYTES, SEND_A_SIZE, SEND_B_SIZE]
        .into_iter()
        .cycle()
        .take(SAMPLES)
        .enumerate()
    {
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        assert!(!is_probably_public_key(&bytes).unwrap(), "string {}", i);
        assert!(count_out_of_range(&bytes).unwrap() > 0);
    }
}

#[test]
fn test_short_input_rejected() {
    for len in [0, 1, POLY_BYTES - 1] {
        let bytes = vec![0u8; len];

        let err = is_probably_public_key(&bytes).unwrap_err();
        assert!(matches!(err, NobusError::InvalidInputLength { actual, .. } if actual == len));

        let err = codec::decode_a(&bytes).unwrap_err();
        assert!(matches!(err, NobusError::InvalidInputLength { .. }));
    }
}
