//! Labored breathing loop for a critically wounded player.
//!
//! Two independent periodic processes are summed: a breath cycle (strained
//! inhale, pause, wheezing exhale with a pain groan) and a racing 120 BPM
//! heartbeat underneath.

use super::heartbeat::{beat_at, Thump};
use super::{sample_time, SynthConfig, DEFAULT_SAMPLE_RATE};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::sine_squared_window;
use crate::error::AudioResult;
use crate::noise::generate_noise;
use crate::oscillator::{partial_stack, sine};
use crate::shaping::smooth;

/// Canonical breathing seed.
pub const DEFAULT_SEED: u32 = 333;

/// Loop length in seconds.
pub const LOOP_SECONDS: f64 = 4.0;

/// Nominal breath cycle, about 33 breaths per minute.
pub const NOMINAL_CYCLE: f64 = 1.8;

const INHALE_LENGTH: f64 = 0.6;
const EXHALE_START: f64 = 0.7;
const EXHALE_LENGTH: f64 = 0.7;
const HEART_PERIOD: f64 = 0.5;
const SMOOTHING: f64 = 0.82;

const RACING_LUB: Thump = Thump {
    offset: 0.0,
    length: 0.08,
    partials: &[(50.0, 0.4), (100.0, 0.3), (160.0, 0.2)],
    gain: 0.35,
};

const RACING_DUB: Thump = Thump {
    offset: 0.12,
    length: 0.05,
    partials: &[(70.0, 0.25), (140.0, 0.15)],
    gain: 0.2,
};

/// Breath cycle length that fits a whole number of breaths into `loop_seconds`.
///
/// The nominal 1.8 s cycle is stretched or squeezed to the nearest whole
/// count so that the loop seam lands in the pause after an exhale.
pub fn cycle_length(loop_seconds: f64) -> f64 {
    let count = (loop_seconds / NOMINAL_CYCLE).round().max(1.0);
    loop_seconds / count
}

fn inhale(t: f64, breath_time: f64, noise: f64) -> f64 {
    let env = sine_squared_window(breath_time, INHALE_LENGTH);
    if env == 0.0 {
        return 0.0;
    }
    // Breathy noise through the throat, amplitude-modulated at 250 Hz.
    let breath = noise * 0.15 + sine(250.0, t) * noise * 0.1;
    let vocal = partial_stack(t, &[(180.0, 0.15), (350.0, 0.1), (500.0, 0.06)]);
    (breath + vocal) * env * 0.7
}

fn exhale(t: f64, breath_time: f64, noise: f64) -> f64 {
    let env = sine_squared_window(breath_time - EXHALE_START, EXHALE_LENGTH);
    if env == 0.0 {
        return 0.0;
    }
    let breath = noise * 0.2;
    let wheeze = partial_stack(t, &[(400.0, 0.12), (600.0, 0.08)]);
    let groan = partial_stack(t, &[(130.0, 0.15), (260.0, 0.08)]);
    (breath + wheeze + groan) * env * 0.8
}

/// Renders the breathing loop.
pub fn synthesize(seed: u32, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    let sample_rate = config.resolve_rate(DEFAULT_SAMPLE_RATE)?;
    let n = num_samples(sample_rate, LOOP_SECONDS);
    let noise = generate_noise(n, seed);
    let cycle = cycle_length(LOOP_SECONDS);

    let mut work: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(i, &nz)| {
            let t = sample_time(i, sample_rate);
            let breath_time = t % cycle;
            let sample = inhale(t, breath_time, nz)
                + exhale(t, breath_time, nz)
                + beat_at(t, HEART_PERIOD, LOOP_SECONDS, &RACING_LUB, &RACING_DUB);
            sample.clamp(-1.0, 1.0)
        })
        .collect();

    smooth(&mut work, SMOOTHING);

    tracing::debug!(seed, samples = n, cycle, "rendered breathing");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}
