//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random draw in the crate (noise buffers, randomized groan voices,
//! playback jitter, groan timers) flows through this module so that the same
//! seed always produces the same sound.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a named component from a base seed.
///
/// Hashes the base seed (little-endian) followed by the UTF-8 key with BLAKE3
/// and keeps the first four bytes of the digest.
///
/// # Arguments
/// * `base_seed` - The sound's seed
/// * `key` - Component identifier (e.g. "noise", "voice")
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}

/// Creates an RNG for a named component of a sound.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}
