//! Ambient background music bed.
//!
//! A dark C-minor bed built from eight simultaneous layers, voiced above
//! 120 Hz so laptop speakers reproduce it:
//!
//! | layer        | content                                              |
//! |--------------|------------------------------------------------------|
//! | drone        | C3 with slowly breathing 2nd/3rd harmonics           |
//! | fifth        | G3 power-chord pad                                   |
//! | minor third  | Eb4 detuned pair                                     |
//! | high note    | G4 detuned pair behind a cubic LFO gate              |
//! | pulse        | 90 BPM double-thump march                            |
//! | wind         | low-level noise swell                                |
//! | brass stabs  | every 8 s, cycling C3, Ab3, F3, Eb3                  |
//! | ticks        | short noise ticks three times a second               |
//!
//! The first and last second are linearly faded so the loop seam is click-free.

use rand::Rng;

use super::{check_duration, sample_time, SynthConfig, DEFAULT_SAMPLE_RATE};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::{cubic_gate, exp_decay, half_sine, linear_decay};
use crate::error::AudioResult;
use crate::oscillator::{harmonic_stack, partial_stack, sine};
use crate::rng::create_component_rng;
use crate::shaping::{clamp_buffer, fade_in, fade_out, smooth};

/// Canonical music seed.
pub const DEFAULT_SEED: u32 = 777;

/// Canonical loop length in seconds.
pub const DEFAULT_DURATION: f64 = 32.0;

/// Length of each edge fade in seconds.
pub const FADE_SECONDS: f64 = 1.0;

const SMOOTHING: f64 = 0.85;

const C3: f64 = 130.81;
const EB3: f64 = 155.56;
const F3: f64 = 174.61;
const G3: f64 = 196.00;
const AB3: f64 = 207.65;
const EB4: f64 = 311.13;
const G4: f64 = 392.00;

/// Stab roots, one per 8 s section.
pub const STAB_ROOTS: [f64; 4] = [C3, AB3, F3, EB3];
const STAB_PERIOD: f64 = 8.0;
const STAB_LENGTH: f64 = 0.5;

const PULSE_RATE: f64 = 1.5;
const TICK_RATE: f64 = 3.0;
const TICK_LENGTH: f64 = 0.008;

fn drone(t: f64) -> f64 {
    let level = 0.4 + 0.1 * sine(0.05, t);
    let sweep = 0.5 + 0.5 * sine(0.03, t);
    let bass = sine(C3, t) * 0.45
        + sine(C3 * 2.0, t) * 0.25 * sweep
        + sine(C3 * 3.0, t) * 0.15 * sweep
        + sine(C3 * 4.0, t) * 0.08;
    bass * level
}

fn fifth(t: f64) -> f64 {
    let level = (0.5 + 0.5 * (std::f64::consts::TAU * 0.04 * t - 1.0).sin()).max(0.0);
    harmonic_stack(t, G3, &[0.2, 0.1]) * level
}

fn minor_third(t: f64) -> f64 {
    let level = (0.5 + 0.5 * (std::f64::consts::TAU * 0.07 * t + 2.0).sin()).max(0.0) * 0.15;
    let pad = (sine(EB4, t) + sine(EB4 * 1.003, t)) * 0.5;
    pad * level
}

fn high_note(t: f64) -> f64 {
    let level = cubic_gate(sine(0.025, t)) * 0.08;
    if level == 0.0 {
        return 0.0;
    }
    (sine(G4, t) + sine(G4 * 0.998, t)) * 0.5 * level
}

fn pulse(t: f64) -> f64 {
    let phase = (t * PULSE_RATE) % 1.0;
    let beat = if phase < 0.06 {
        half_sine(phase, 0.06) * 0.9
    } else if phase > 0.12 && phase < 0.18 {
        half_sine(phase - 0.12, 0.06) * 0.5
    } else {
        return 0.0;
    };
    partial_stack(t, &[(130.0, 0.4), (200.0, 0.3), (300.0, 0.2)]) * beat * 0.25
}

fn wind(t: f64, noise: f64) -> f64 {
    noise * (0.025 + 0.02 * sine(0.08, t))
}

fn brass_stab(t: f64) -> f64 {
    let cycle = t % STAB_PERIOD;
    if cycle >= STAB_LENGTH {
        return 0.0;
    }
    let section = (t / STAB_PERIOD) as usize % STAB_ROOTS.len();
    let root = STAB_ROOTS[section];
    harmonic_stack(t, root, &[1.0, 0.4, 0.2, 0.1]) * exp_decay(cycle, 4.0) * 0.2
}

fn tick(t: f64, noise: f64) -> f64 {
    let phase = (t * TICK_RATE) % 1.0;
    let env = linear_decay(phase, TICK_LENGTH);
    if env == 0.0 {
        return 0.0;
    }
    (noise + sine(400.0, t) * 0.3) * env * 0.06
}

/// Renders the music bed.
///
/// # Arguments
/// * `seed` - Seed for the wind and tick noise
/// * `duration` - Loop length in seconds; non-positive gives an empty buffer
/// * `config` - Sample rate override
///
/// Buffers shorter than two fade windows fade over half their length instead.
pub fn synthesize(seed: u32, duration: f64, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    check_duration(duration)?;
    let sample_rate = config.resolve_rate(DEFAULT_SAMPLE_RATE)?;
    let n = num_samples(sample_rate, duration);
    if n == 0 {
        return Ok(SampleBuffer::empty(sample_rate));
    }

    let mut wind_rng = create_component_rng(seed, "wind");
    let mut tick_rng = create_component_rng(seed, "ticks");

    let mut work: Vec<f64> = (0..n)
        .map(|i| {
            let t = sample_time(i, sample_rate);
            let wind_noise = wind_rng.gen::<f64>() * 2.0 - 1.0;
            let tick_noise = tick_rng.gen::<f64>() * 2.0 - 1.0;
            drone(t)
                + fifth(t)
                + minor_third(t)
                + high_note(t)
                + pulse(t)
                + wind(t, wind_noise)
                + brass_stab(t)
                + tick(t, tick_noise)
        })
        .collect();

    let fade = num_samples(sample_rate, FADE_SECONDS).min(n / 2);
    fade_out(&mut work, fade);
    fade_in(&mut work, fade);
    clamp_buffer(&mut work);
    smooth(&mut work, SMOOTHING);

    tracing::debug!(seed, samples = n, "rendered music bed");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}
