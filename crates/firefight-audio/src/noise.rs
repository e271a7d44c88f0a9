//! Seeded white noise, the raw material shared by most synthesizers.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::rng::create_rng;

/// Generates `length` independent samples uniformly distributed in [-1, 1].
///
/// Identical seeds always reproduce identical buffers. A length of zero
/// yields an empty buffer.
pub fn generate_noise(length: usize, seed: u32) -> Vec<f64> {
    let mut rng = create_rng(seed);
    white_noise(&mut rng, length)
}

/// Draws `length` uniform samples in [-1, 1] from an existing generator.
pub fn white_noise(rng: &mut Pcg32, length: usize) -> Vec<f64> {
    (0..length).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()
}
