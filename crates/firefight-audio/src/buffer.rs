//! Mono sample buffer produced by every synthesizer.

/// An owned, immutable buffer of mono PCM samples in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    samples: Vec<f32>,
}

impl SampleBuffer {
    /// Creates a buffer from already-normalized samples, clamping anything out of range.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| if s.is_nan() { 0.0 } else { s.clamp(-1.0, 1.0) })
            .collect();
        Self {
            sample_rate,
            samples,
        }
    }

    /// Finalizes an `f64` work buffer into a sample buffer.
    ///
    /// Non-finite work samples are a synthesis bug; debug builds assert on them.
    pub fn from_f64(sample_rate: u32, work: &[f64]) -> Self {
        debug_assert!(
            work.iter().all(|s| s.is_finite()),
            "synthesizer produced a non-finite sample"
        );
        let samples = work
            .iter()
            .map(|&s| {
                if s.is_nan() {
                    0.0
                } else {
                    s.clamp(-1.0, 1.0) as f32
                }
            })
            .collect();
        Self {
            sample_rate,
            samples,
        }
    }

    /// An empty buffer at the given rate.
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: Vec::new(),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count, always 1.
    pub fn channels(&self) -> u16 {
        1
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Borrows the samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |a, s| a.max(s.abs()))
    }

    /// Root mean square level.
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum / self.samples.len() as f64).sqrt() as f32
    }
}

/// Number of samples covering `seconds` at `sample_rate`, rounded to nearest.
///
/// Non-positive or non-finite durations give zero.
pub fn num_samples(sample_rate: u32, seconds: f64) -> usize {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (sample_rate as f64 * seconds).round() as usize
}
