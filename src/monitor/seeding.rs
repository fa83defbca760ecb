//! Seed derivation
//!
//! One master seed drives every random component; each component draws
//! from its own stream so changing one does not shift the others.

use rand::Rng;

/// Independent random streams derived from the master seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStream {
    Split = 1,
    Forest = 2,
    Readings = 3,
}

/// Largest accepted master seed; TOML integers are signed 64-bit
pub const MAX_SEED: u64 = i64::MAX as u64;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for one stream
pub fn derive(master: u64, stream: SeedStream) -> u64 {
    master.wrapping_add((stream as u64).wrapping_mul(GOLDEN_GAMMA))
}

/// Configured seed, or a fresh one from entropy
pub fn resolve(configured: Option<u64>) -> u64 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed = rand::thread_rng().gen_range(0..=MAX_SEED);
            tracing::info!(seed, "no seed configured, drew one from entropy");
            seed
        }
    }
}
