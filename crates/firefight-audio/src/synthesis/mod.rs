//! Sound synthesizers.
//!
//! Each module renders one family of sounds into a fresh [`SampleBuffer`]:
//! - `gunshot` - Layered rifle shots in three grades (player, enemy, super soldier)
//! - `shell_casing` - Brass casing bouncing on the ground
//! - `groan` - Randomized zombie vocal groan
//! - `heartbeat` - LUB-dub heartbeat loop at a given BPM
//! - `breathing` - Labored breathing loop with a racing heartbeat underneath
//! - `music` - Eight-layer ambient music bed with click-free loop edges
//!
//! Synthesizers share no state. Every call is a pure function of its
//! parameters and seed, so buffers can be rendered on any thread and cached.

pub mod breathing;
pub mod groan;
pub mod gunshot;
pub mod heartbeat;
pub mod music;
pub mod shell_casing;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Sample rate used by every sound unless the caller overrides it.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Longest sound any synthesizer will render, in seconds.
///
/// Buffers are allocated up front, so longer requests are rejected with
/// `InvalidDuration` instead of exhausting memory.
pub const MAX_DURATION_SECONDS: f64 = 600.0;

/// Checks a requested length: finite, non-negative and at most
/// [`MAX_DURATION_SECONDS`].
pub(crate) fn check_duration(duration: f64) -> AudioResult<()> {
    if duration.is_finite() && (0.0..=MAX_DURATION_SECONDS).contains(&duration) {
        Ok(())
    } else {
        Err(AudioError::InvalidDuration { duration })
    }
}

/// Rendering options shared by all synthesizers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Sample rate override in Hz. `None` keeps each sound's canonical rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

impl SynthConfig {
    /// Config that forces a specific sample rate on every sound.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate: Some(sample_rate),
        }
    }

    /// Resolves the rate to render at, rejecting a zero override.
    pub fn resolve_rate(&self, canonical: u32) -> AudioResult<u32> {
        match self.sample_rate {
            Some(0) => Err(AudioError::InvalidSampleRate { rate: 0 }),
            Some(rate) => Ok(rate),
            None => Ok(canonical),
        }
    }
}

/// Time in seconds of sample `i` at `sample_rate`.
#[inline]
pub(crate) fn sample_time(i: usize, sample_rate: u32) -> f64 {
    i as f64 / sample_rate as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rate() {
        assert_eq!(SynthConfig::default().resolve_rate(22050).ok(), Some(22050));
        assert_eq!(
            SynthConfig::with_sample_rate(48000).resolve_rate(22050).ok(),
            Some(48000)
        );
        assert!(matches!(
            SynthConfig::with_sample_rate(0).resolve_rate(44100),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_check_duration_bounds() {
        assert!(check_duration(0.0).is_ok());
        assert!(check_duration(MAX_DURATION_SECONDS).is_ok());
        for bad in [-0.5, MAX_DURATION_SECONDS + 1.0, 1e13, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_duration(bad),
                Err(AudioError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_config_json_defaults() {
        let cfg: SynthConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(cfg, SynthConfig::default());
    }
}
