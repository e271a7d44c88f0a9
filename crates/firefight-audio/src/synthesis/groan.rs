//! Zombie vocal groan.
//!
//! A drifting vocal fundamental with a slightly inharmonic four-partial
//! stack, a lower growl, a 5 Hz vibrato voice and a breath of noise, all
//! under one sine-squared envelope spanning the whole groan.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{check_duration, sample_time, SynthConfig};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::sine_squared_window;
use crate::error::AudioResult;
use crate::noise::white_noise;
use crate::oscillator::{harmonic_stack, ratio_stack, sine};
use crate::rng::create_component_rng;

/// Groans are rendered at half rate; they carry nothing above 1 kHz.
pub const SAMPLE_RATE: u32 = 22050;

/// Seed used when no actor id is given.
pub const DEFAULT_SEED: u32 = 0;

const VOICE: [(f64, f64); 4] = [(1.0, 0.35), (2.02, 0.3), (3.01, 0.2), (4.03, 0.1)];
const GROWL: [f64; 2] = [0.25, 0.15];
const NOISE_LEVEL: f64 = 0.06;
const VIBRATO_RATE: f64 = 5.0;
const VIBRATO_DEPTH: f64 = 10.0;
const VIBRATO_LEVEL: f64 = 0.15;

/// Voice parameters for one groan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroanParams {
    /// Starting fundamental in Hz.
    pub base_freq: f64,
    /// Total fundamental drift over the groan in Hz.
    pub drift: f64,
    /// Growl fundamental in Hz.
    pub growl_freq: f64,
    /// Length in seconds.
    pub duration: f64,
}

impl GroanParams {
    /// Draws a random voice: base 120-200 Hz, drift ±25 Hz, growl 60-100 Hz, 0.5-1.5 s.
    pub fn draw(rng: &mut Pcg32) -> Self {
        Self {
            base_freq: rng.gen_range(120.0..200.0),
            drift: rng.gen_range(-25.0..25.0),
            growl_freq: rng.gen_range(60.0..100.0),
            duration: rng.gen_range(0.5..1.5),
        }
    }

    /// The voice a seed always produces.
    pub fn from_seed(seed: u32) -> Self {
        Self::draw(&mut create_component_rng(seed, "voice"))
    }

    /// Returns the params with an explicit duration.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

/// Renders the groan a seed selects.
pub fn synthesize(seed: u32, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    synthesize_with(&GroanParams::from_seed(seed), seed, config)
}

/// Renders a groan with explicit voice parameters.
///
/// A zero duration yields an empty buffer. Negative, non-finite or
/// over-long durations are `InvalidDuration`.
pub fn synthesize_with(
    params: &GroanParams,
    seed: u32,
    config: &SynthConfig,
) -> AudioResult<SampleBuffer> {
    check_duration(params.duration)?;
    let sample_rate = config.resolve_rate(SAMPLE_RATE)?;
    let n = num_samples(sample_rate, params.duration);
    if n == 0 {
        return Ok(SampleBuffer::empty(sample_rate));
    }
    let noise = white_noise(&mut create_component_rng(seed, "noise"), n);
    let duration = params.duration;

    let work: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(i, &nz)| {
            let t = sample_time(i, sample_rate);
            let env = sine_squared_window(t, duration);
            let freq = params.base_freq + params.drift * t / duration;

            let vibrato = sine(VIBRATO_RATE, t) * VIBRATO_DEPTH;
            let voice = ratio_stack(t, freq, &VOICE) + sine(freq + vibrato, t) * VIBRATO_LEVEL;
            let growl = harmonic_stack(t, params.growl_freq, &GROWL);

            (voice + growl + nz * NOISE_LEVEL) * env
        })
        .collect();

    tracing::debug!(seed, samples = n, base_freq = params.base_freq, "rendered groan");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_ranges() {
        for seed in 0..200 {
            let p = GroanParams::from_seed(seed);
            assert!((120.0..200.0).contains(&p.base_freq));
            assert!((-25.0..25.0).contains(&p.drift));
            assert!((60.0..100.0).contains(&p.growl_freq));
            assert!((0.5..1.5).contains(&p.duration));
        }
    }

    #[test]
    fn test_seed_selects_voice() {
        assert_eq!(GroanParams::from_seed(3), GroanParams::from_seed(3));
        assert_ne!(GroanParams::from_seed(3), GroanParams::from_seed(4));
    }

    #[test]
    fn test_length_follows_duration() {
        let params = GroanParams::from_seed(11).with_duration(1.0);
        let buffer = synthesize_with(&params, 11, &SynthConfig::default()).expect("renders");
        assert_eq!(buffer.sample_rate(), SAMPLE_RATE);
        assert_eq!(buffer.len(), 22050);
    }

    #[test]
    fn test_envelope_closes_both_ends() {
        let buffer = synthesize(5, &SynthConfig::default()).expect("renders");
        let s = buffer.as_slice();
        assert!(s[0].abs() < 1e-6);
        assert!(s[s.len() - 1].abs() < 0.01);
        assert!(buffer.peak() > 0.3);
    }

    #[test]
    fn test_zero_duration_is_empty() {
        let params = GroanParams::from_seed(1).with_duration(0.0);
        let buffer = synthesize_with(&params, 1, &SynthConfig::default()).expect("renders");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_out_of_range_duration_is_rejected() {
        for bad in [-2.0, 1e13, f64::INFINITY] {
            let params = GroanParams::from_seed(1).with_duration(bad);
            assert!(matches!(
                synthesize_with(&params, 1, &SynthConfig::default()),
                Err(crate::error::AudioError::InvalidDuration { .. })
            ));
        }
    }
}
