//! LUB-dub heartbeat loop.
//!
//! Each beat is a louder, lower "LUB" thump followed 180 ms later by a softer
//! "dub". Beats repeat every `60 / bpm` seconds. A beat whose dub would run
//! past the end of the loop is left out, so the loop seam always falls in
//! silence and the buffer can repeat without a click at any tempo.

use super::{sample_time, SynthConfig, DEFAULT_SAMPLE_RATE};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::sine_squared_window;
use crate::error::{AudioError, AudioResult};
use crate::oscillator::partial_stack;
use crate::shaping::smooth;

/// Loop length in seconds.
pub const LOOP_SECONDS: f64 = 4.0;

/// Resting-wounded tempo.
pub const DEFAULT_BPM: f64 = 100.0;

const SMOOTHING: f64 = 0.8;

/// One thump of a heartbeat: a short harmonic stack under a sine-squared window.
#[derive(Debug, Clone, Copy)]
pub struct Thump {
    /// Offset from the start of the beat in seconds.
    pub offset: f64,
    /// Window length in seconds.
    pub length: f64,
    pub partials: &'static [(f64, f64)],
    pub gain: f64,
}

impl Thump {
    /// Contribution at `beat_time` seconds into the beat.
    ///
    /// Partials are phased from the thump's own start so every beat sounds the same.
    #[inline]
    pub fn eval(&self, beat_time: f64) -> f64 {
        let lt = beat_time - self.offset;
        let env = sine_squared_window(lt, self.length);
        if env == 0.0 {
            return 0.0;
        }
        partial_stack(lt, self.partials) * env * self.gain
    }

    /// Time from the beat start until this thump falls silent.
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

/// The resting heartbeat's LUB.
pub const LUB: Thump = Thump {
    offset: 0.0,
    length: 0.12,
    partials: &[(45.0, 0.6), (90.0, 0.4), (150.0, 0.25), (200.0, 0.15)],
    gain: 0.8,
};

/// The resting heartbeat's dub.
pub const DUB: Thump = Thump {
    offset: 0.18,
    length: 0.08,
    partials: &[(60.0, 0.4), (120.0, 0.3), (180.0, 0.2), (250.0, 0.1)],
    gain: 0.5,
};

/// Sums a periodic two-thump beat at time `t`.
///
/// Beats are only sounded if both thumps finish before `loop_end`.
pub(crate) fn beat_at(t: f64, period: f64, loop_end: f64, lub: &Thump, dub: &Thump) -> f64 {
    let index = (t / period).floor();
    let beat_start = index * period;
    if beat_start + lub.end().max(dub.end()) > loop_end {
        return 0.0;
    }
    let beat_time = t - beat_start;
    lub.eval(beat_time) + dub.eval(beat_time)
}

/// Renders the heartbeat loop at `bpm` beats per minute.
///
/// # Errors
/// `InvalidParameter` when `bpm` is not a finite positive number.
pub fn synthesize(bpm: f64, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(AudioError::invalid_param(
            "bpm",
            format!("must be a positive number, got {}", bpm),
        ));
    }
    let sample_rate = config.resolve_rate(DEFAULT_SAMPLE_RATE)?;
    let n = num_samples(sample_rate, LOOP_SECONDS);
    let period = 60.0 / bpm;

    let mut work: Vec<f64> = (0..n)
        .map(|i| {
            let t = sample_time(i, sample_rate);
            beat_at(t, period, LOOP_SECONDS, &LUB, &DUB).clamp(-1.0, 1.0)
        })
        .collect();

    smooth(&mut work, SMOOTHING);

    tracing::debug!(bpm, samples = n, "rendered heartbeat");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let buffer = synthesize(DEFAULT_BPM, &SynthConfig::default()).expect("renders");
        assert_eq!(buffer.len(), 176_400);
    }

    #[test]
    fn test_invalid_bpm() {
        for bpm in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            assert!(synthesize(bpm, &SynthConfig::default()).is_err(), "bpm {}", bpm);
        }
    }

    #[test]
    fn test_gap_between_lub_and_dub_is_silent() {
        let buffer = synthesize(DEFAULT_BPM, &SynthConfig::default()).expect("renders");
        let sr = buffer.sample_rate() as f64;
        let gap = &buffer.as_slice()[(0.13 * sr) as usize..(0.17 * sr) as usize];
        assert!(gap.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn test_truncated_final_beat_is_dropped() {
        // At 63 BPM the beat starting at 3.81 s would run past the loop end.
        let buffer = synthesize(63.0, &SynthConfig::default()).expect("renders");
        let sr = buffer.sample_rate() as f64;
        let tail = &buffer.as_slice()[(3.80 * sr) as usize..];
        assert!(tail.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn test_faster_tempo_has_more_energy() {
        let slow = synthesize(60.0, &SynthConfig::default()).expect("renders");
        let fast = synthesize(140.0, &SynthConfig::default()).expect("renders");
        assert!(fast.rms() > slow.rms());
    }
}
