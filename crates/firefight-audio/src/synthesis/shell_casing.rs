//! Brass shell casing hitting the ground.
//!
//! Three damped metallic bursts: the first impact at 0 ms, a bounce at 60 ms
//! and a last tiny bounce at 100 ms, each quieter and shorter than the last.

use super::{sample_time, SynthConfig, DEFAULT_SAMPLE_RATE};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::{exp_decay, LayerWindow};
use crate::error::AudioResult;
use crate::noise::generate_noise;
use crate::oscillator::partial_stack;
use crate::shaping::smooth;

/// Canonical casing seed.
pub const DEFAULT_SEED: u32 = 99;

/// Buffer length in seconds.
pub const DURATION: f64 = 0.25;

const OUTPUT_GAIN: f64 = 0.4;
const SMOOTHING: f64 = 0.85;

struct Bounce {
    window: LayerWindow,
    decay: f64,
    level: f64,
    metal: &'static [(f64, f64)],
    thump: &'static [(f64, f64)],
    metal_mix: f64,
    thump_mix: f64,
    noise_mix: f64,
}

const BOUNCES: [Bounce; 3] = [
    Bounce {
        window: LayerWindow::open_ended(0.0),
        decay: 80.0,
        level: 1.0,
        metal: &[(1800.0, 0.3), (2800.0, 0.25), (4200.0, 0.12)],
        thump: &[(300.0, 0.4), (600.0, 0.2)],
        metal_mix: 0.5,
        thump_mix: 0.3,
        noise_mix: 0.2,
    },
    Bounce {
        window: LayerWindow::open_ended(0.06),
        decay: 100.0,
        level: 0.5,
        metal: &[(2200.0, 0.35), (3400.0, 0.2)],
        thump: &[(350.0, 0.25)],
        metal_mix: 1.0,
        thump_mix: 1.0,
        noise_mix: 0.0,
    },
    Bounce {
        window: LayerWindow::open_ended(0.10),
        decay: 150.0,
        level: 0.25,
        metal: &[(2500.0, 0.4)],
        thump: &[],
        metal_mix: 1.0,
        thump_mix: 0.0,
        noise_mix: 0.0,
    },
];

/// Renders the casing drop.
pub fn synthesize(seed: u32, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    let sample_rate = config.resolve_rate(DEFAULT_SAMPLE_RATE)?;
    let n = num_samples(sample_rate, DURATION);
    let noise = generate_noise(n, seed);

    let mut work: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(i, &nz)| {
            let t = sample_time(i, sample_rate);
            let sum: f64 = BOUNCES
                .iter()
                .filter_map(|b| {
                    b.window.local(t).map(|lt| {
                        let mix = partial_stack(t, b.metal) * b.metal_mix
                            + partial_stack(t, b.thump) * b.thump_mix
                            + nz * b.noise_mix;
                        mix * exp_decay(lt, b.decay) * b.level
                    })
                })
                .sum();
            sum * OUTPUT_GAIN
        })
        .collect();

    smooth(&mut work, SMOOTHING);

    tracing::debug!(seed, samples = n, "rendered shell casing");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}
