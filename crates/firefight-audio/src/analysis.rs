//! Signal measurements used by tests and the `analyze` command.

use crate::buffer::SampleBuffer;
use crate::filter::BiquadFilter;

const BAND_Q: f64 = 0.707;

/// Root mean square of `samples`.
///
/// Returns 0.0 for empty input.
///
/// # Example
///
/// ```rust
/// use firefight_audio::analysis::rms;
///
/// assert_eq!(rms(&[0.0; 16]), 0.0);
/// assert_eq!(rms(&[0.5, -0.5]), 0.5);
/// ```
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_of_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_of_squares / samples.len() as f64).sqrt() as f32
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |a, s| a.max(s.abs()))
}

/// Returns true if no sample reaches `threshold`.
pub fn is_silent(samples: &[f32], threshold: f32) -> bool {
    samples.iter().all(|s| s.abs() < threshold)
}

/// RMS of `len_seconds` starting at `start_seconds`, clipped to the buffer.
pub fn window_rms(buffer: &SampleBuffer, start_seconds: f64, len_seconds: f64) -> f32 {
    let rate = buffer.sample_rate() as f64;
    let total = buffer.len();
    let start = ((start_seconds.max(0.0) * rate).round() as usize).min(total);
    let end = (((start_seconds + len_seconds).max(0.0) * rate).round() as usize).min(total);
    if end <= start {
        return 0.0;
    }
    rms(&buffer.as_slice()[start..end])
}

/// Band-limits the buffer with a highpass at `low_hz` cascaded into a
/// lowpass at `high_hz`.
///
/// A buffer without a sample rate has no frequency content and yields silence.
pub fn band_filtered(buffer: &SampleBuffer, low_hz: f64, high_hz: f64) -> Vec<f64> {
    if buffer.sample_rate() == 0 {
        return vec![0.0; buffer.len()];
    }
    let rate = buffer.sample_rate() as f64;
    let mut highpass = BiquadFilter::highpass(low_hz, BAND_Q, rate);
    let mut lowpass = BiquadFilter::lowpass(high_hz, BAND_Q, rate);
    buffer
        .as_slice()
        .iter()
        .map(|&s| lowpass.process(highpass.process(s as f64)))
        .collect()
}

/// Sum of squared band-limited samples.
pub fn band_energy(buffer: &SampleBuffer, low_hz: f64, high_hz: f64) -> f64 {
    band_filtered(buffer, low_hz, high_hz)
        .iter()
        .map(|s| s * s)
        .sum()
}

/// Largest absolute band-limited sample.
pub fn band_peak(buffer: &SampleBuffer, low_hz: f64, high_hz: f64) -> f64 {
    band_filtered(buffer, low_hz, high_hz)
        .iter()
        .fold(0.0_f64, |a, s| a.max(s.abs()))
}

/// Start times in seconds of loud events.
///
/// A sample at or above `threshold` starts a new event when at least
/// `min_gap_seconds` have passed since the previous loud sample, so brief
/// zero crossings inside one event do not split it.
pub fn onsets(buffer: &SampleBuffer, threshold: f32, min_gap_seconds: f64) -> Vec<f64> {
    let rate = buffer.sample_rate() as f64;
    let min_gap = (min_gap_seconds.max(0.0) * rate).round() as usize;
    let mut found = Vec::new();
    let mut last_loud: Option<usize> = None;

    for (i, &s) in buffer.as_slice().iter().enumerate() {
        if s.abs() < threshold {
            continue;
        }
        let starts_event = match last_loud {
            None => true,
            Some(prev) => i - prev >= min_gap,
        };
        if starts_event {
            found.push(i as f64 / rate);
        }
        last_loud = Some(i);
    }
    found
}

/// Summary of a buffer, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BufferStats {
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_seconds: f64,
    pub peak: f32,
    pub rms: f32,
    /// Energy in the 50-300 Hz band where the concussion and rumble live.
    pub low_band_energy: f64,
}

impl BufferStats {
    pub fn measure(buffer: &SampleBuffer) -> Self {
        Self {
            sample_rate: buffer.sample_rate(),
            samples: buffer.len(),
            duration_seconds: buffer.duration_seconds(),
            peak: peak(buffer.as_slice()),
            rms: rms(buffer.as_slice()),
            low_band_energy: band_energy(buffer, 50.0, 300.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn tone(freq: f64, rate: u32, seconds: f64) -> SampleBuffer {
        let n = (rate as f64 * seconds) as usize;
        let samples = (0..n)
            .map(|i| (TAU * freq * i as f64 / rate as f64).sin() * 0.5)
            .collect::<Vec<f64>>();
        SampleBuffer::from_f64(rate, &samples)
    }

    #[test]
    fn test_rms_and_peak() {
        assert_eq!(rms(&[]), 0.0);
        assert!((peak(&[0.1, -0.7, 0.3]) - 0.7).abs() < 1e-6);
        assert!(is_silent(&[0.001, -0.002], 0.01));
        assert!(!is_silent(&[0.5], 0.01));
    }

    #[test]
    fn test_window_rms() {
        let mut samples = vec![0.0_f32; 100];
        samples[50..].iter_mut().for_each(|s| *s = 0.5);
        let buffer = SampleBuffer::new(100, samples);
        assert_eq!(window_rms(&buffer, 0.0, 0.5), 0.0);
        assert!((window_rms(&buffer, 0.5, 0.5) - 0.5).abs() < 1e-6);
        assert!((window_rms(&buffer, 0.9, 5.0) - 0.5).abs() < 1e-6);
        assert_eq!(window_rms(&buffer, 2.0, 1.0), 0.0);
    }

    #[test]
    fn test_band_energy_selects_frequencies() {
        let low = tone(150.0, 8000, 1.0);
        let high = tone(2000.0, 8000, 1.0);
        let in_band = band_energy(&low, 50.0, 300.0);
        let out_band = band_energy(&high, 50.0, 300.0);
        assert!(in_band > out_band * 20.0, "{} vs {}", in_band, out_band);
        assert!(band_peak(&low, 50.0, 300.0) > 0.3);
    }

    #[test]
    fn test_band_energy_at_degenerate_rates() {
        for rate in [0, 1, 2] {
            let buffer = SampleBuffer::new(rate, vec![0.5, -0.5, 0.25, -0.25]);
            let energy = band_energy(&buffer, 50.0, 300.0);
            assert!(energy.is_finite(), "rate {}", rate);
            assert!(band_peak(&buffer, 50.0, 300.0).is_finite());

            let stats = BufferStats::measure(&buffer);
            assert_eq!(stats.samples, 4);
            assert!(stats.low_band_energy.is_finite());
        }
        assert_eq!(band_energy(&SampleBuffer::new(0, vec![1.0; 8]), 50.0, 300.0), 0.0);
    }

    #[test]
    fn test_onsets_merge_zero_crossings() {
        let rate = 1000;
        let mut samples = vec![0.0_f64; 1000];
        for (i, s) in samples.iter_mut().enumerate() {
            // Two 50 ms bursts of a 100 Hz tone at 100 ms and 600 ms.
            if (100..150).contains(&i) || (600..650).contains(&i) {
                *s = (TAU * 100.0 * i as f64 / rate as f64).sin();
            }
        }
        let buffer = SampleBuffer::from_f64(rate, &samples);
        let found = onsets(&buffer, 0.1, 0.02);
        assert_eq!(found.len(), 2, "{:?}", found);
        assert!((found[0] - 0.1).abs() < 0.005);
        assert!((found[1] - 0.6).abs() < 0.005);
    }

    #[test]
    fn test_stats() {
        let stats = BufferStats::measure(&tone(100.0, 8000, 0.5));
        assert_eq!(stats.samples, 4000);
        assert!((stats.peak - 0.5).abs() < 0.01);
        assert!(stats.low_band_energy > 0.0);
    }
}
