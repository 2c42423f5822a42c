//! nobus-demo: backdoored NewHope handshake and public key classifier
//!
//! `handshake` runs a backdoored Alice against an honest Bob and lets the
//! overseer recover the shared secret from the transcript. `classify`
//! runs the distinguisher over raw files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use nobus_rlwe::curve::X25519Elligator2;
use nobus_rlwe::nobus::{
    count_out_of_range, false_positive_log2, BackdoorKeyGenerator, BackdoorKeyRecoverer,
    OverseerKeyPair,
};
use nobus_rlwe::params::{NobusParams, MAX_REPRESENTATIVE_ATTEMPTS};
use nobus_rlwe::rlwe::{key_exchange_alice, key_exchange_bob, NewHopeRing};

#[derive(Parser)]
#[command(name = "nobus-demo")]
#[command(about = "Backdoored NewHope key generation demo")]
#[command(version)]
struct Args {
    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Backdoored Alice, honest Bob, and overseer recovery
    Handshake {
        /// Random seed for a reproducible run (optional)
        #[arg(long)]
        seed: Option<u64>,

        /// Write alice.bin and bob.bin into this directory
        #[arg(long)]
        transcript_dir: Option<PathBuf>,

        /// Bound on ephemeral key draws
        #[arg(long, default_value_t = MAX_REPRESENTATIVE_ATTEMPTS)]
        max_attempts: u32,
    },

    /// Check whether files start with a genuine public polynomial
    Classify {
        /// Files holding raw wire messages
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Handshake {
            seed,
            transcript_dir,
            max_attempts,
        } => handshake(seed, transcript_dir, max_attempts),
        Command::Classify { files } => classify(&files),
    }
}

fn handshake(seed: Option<u64>, transcript_dir: Option<PathBuf>, max_attempts: u32) -> Result<()> {
    let params = NobusParams::with_max_attempts(max_attempts);
    params
        .validate()
        .map_err(|e| eyre::eyre!("Invalid parameters: {}", e))?;

    let mut rng = match seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            ChaCha20Rng::seed_from_u64(seed)
        }
        None => ChaCha20Rng::from_entropy(),
    };

    let start = Instant::now();
    let ring = NewHopeRing::new(&params)?;
    let curve = X25519Elligator2::from_params(&params)?;
    let generator = BackdoorKeyGenerator::from_params(&params)?;
    let recoverer = BackdoorKeyRecoverer::from_params(&params)?;

    let overseer =
        OverseerKeyPair::generate(&mut rng, &curve).wrap_err("Failed to generate overseer key")?;
    info!("Overseer key generated");

    let (alice_private, alice_public) = generator
        .generate(&mut rng, &overseer.public)
        .wrap_err("Backdoored key generation failed")?;
    info!("Alice sends {} bytes", alice_public.as_bytes().len());

    let (bob_public, bob_secret) = key_exchange_bob(&mut rng, &alice_public, &ring)
        .wrap_err("Bob failed to respond")?;
    info!("Bob sends {} bytes", bob_public.as_bytes().len());

    let alice_secret = key_exchange_alice(&bob_public, &alice_private, &ring)
        .wrap_err("Alice failed to finish the handshake")?;

    let recovered = recoverer
        .recover(&alice_public, &overseer.private)
        .wrap_err("Overseer recovery failed")?;
    let overseer_secret = key_exchange_alice(&bob_public, &recovered, &ring)
        .wrap_err("Overseer failed to finish the handshake")?;

    info!("Handshake time: {:.2?}", start.elapsed());
    info!("Alice and Bob agree: {}", alice_secret == bob_secret);
    info!("Overseer recovered the secret key: {}", recovered == alice_private);
    info!("Overseer agrees with Bob: {}", overseer_secret == bob_secret);

    if let Some(dir) = transcript_dir {
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
        let alice_path = dir.join("alice.bin");
        fs::write(&alice_path, alice_public.as_bytes())
            .wrap_err_with(|| format!("Failed to write {}", alice_path.display()))?;
        let bob_path = dir.join("bob.bin");
        fs::write(&bob_path, bob_public.as_bytes())
            .wrap_err_with(|| format!("Failed to write {}", bob_path.display()))?;
        info!("Transcript written to {}", dir.display());
    }

    if alice_secret != bob_secret || overseer_secret != bob_secret {
        return Err(eyre::eyre!("Shared secrets disagree"));
    }
    Ok(())
}

fn classify(files: &[PathBuf]) -> Result<()> {
    info!(
        "Random strings pass with probability 2^{:.1}",
        false_positive_log2()
    );

    for path in files {
        let bytes =
            fs::read(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        match count_out_of_range(&bytes) {
            Ok(0) => info!("{}: public key", path.display()),
            Ok(out) => info!(
                "{}: random ({} coefficients out of range)",
                path.display(),
                out
            ),
            Err(e) => warn!("{}: {}", path.display(), e),
        }
    }
    Ok(())
}
