//! Biquad and one-pole filters.
//!
//! The biquads follow the Audio EQ Cookbook and are used by the analysis
//! helpers to isolate frequency bands. The one-pole filter is the smoothing
//! stage that every synthesizer runs last.

use std::f64::consts::PI;

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Lowpass coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor, 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_w, alpha) = Self::prewarp(cutoff, q, sample_rate);
        let b1 = 1.0 - cos_w;
        Self::normalize(b1 / 2.0, b1, b1 / 2.0, cos_w, alpha)
    }

    /// Highpass coefficients.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_w, alpha) = Self::prewarp(cutoff, q, sample_rate);
        let b1 = -(1.0 + cos_w);
        Self::normalize(-b1 / 2.0, b1, -b1 / 2.0, cos_w, alpha)
    }

    fn prewarp(freq: f64, q: f64, sample_rate: f64) -> (f64, f64) {
        // Q below 0.5 makes alpha blow up near Nyquist.
        let q = q.max(0.5);
        // Rates under about 2 Hz put the Nyquist guard below the 1 Hz floor.
        let nyquist_safe = freq.clamp(1.0, (sample_rate * 0.49).max(1.0));
        let omega = 2.0 * PI * nyquist_safe / sample_rate;
        (omega.cos(), omega.sin() / (2.0 * q))
    }

    fn normalize(b0: f64, b1: f64, b2: f64, cos_w: f64, alpha: f64) -> Self {
        let a0 = 1.0 + alpha;
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: -2.0 * cos_w / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Biquad filter in direct form I.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a lowpass filter.
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::lowpass(cutoff, q, sample_rate))
    }

    /// Creates a highpass filter.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::highpass(cutoff, q, sample_rate))
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// One-pole smoothing filter `y[i] = a * x[i] + (1 - a) * y[i - 1]`.
///
/// The first output equals the first input, so smoothing never introduces an
/// onset transient of its own.
#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    a: f64,
    y1: Option<f64>,
}

impl OnePoleFilter {
    /// Creates a filter from its feed-forward coefficient `a` in (0, 1].
    ///
    /// Smaller `a` gives a darker tone.
    pub fn from_coefficient(a: f64) -> Self {
        Self {
            a: a.clamp(f64::EPSILON, 1.0),
            y1: None,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let y = match self.y1 {
            Some(prev) => self.a * input + (1.0 - self.a) * prev,
            None => input,
        };
        self.y1 = Some(y);
        y
    }

    /// Processes a buffer in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
