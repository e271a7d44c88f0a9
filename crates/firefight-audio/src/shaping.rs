//! Nonlinear shaping and post-processing.
//!
//! Synthesizers sum their layers into an `f64` work buffer, pass each sample
//! through a [`SaturationCurve`], and finish with one or two smoothing passes.
//! Shaping always happens after summing; smoothing is always the last step.

use crate::filter::OnePoleFilter;

/// Asymmetric soft-clip transfer curve.
///
/// The input is multiplied by `drive`. Positive excursions map through
/// `s / (1 + s)`, negative ones through `s / (1 + s * negative_knee)` with a
/// knee below one, so troughs are compressed slightly less than peaks. Both
/// halves are then scaled by `boost` and hard-clamped to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationCurve {
    /// Pre-gain applied before the curve.
    pub drive: f64,
    /// Post-gain applied after the curve.
    pub boost: f64,
    /// Compression coefficient for negative excursions.
    pub negative_knee: f64,
}

impl SaturationCurve {
    /// Drives the mids of the close-up player rifle.
    pub const PLAYER: Self = Self::new(2.0, 1.5, 0.8);
    /// Distant enemy rifle.
    pub const ENEMY: Self = Self::new(1.8, 1.4, 0.8);
    /// Heavy saturation for the super soldier's cannon.
    pub const SUPER: Self = Self::new(2.2, 1.6, 0.7);

    /// Creates a curve.
    pub const fn new(drive: f64, boost: f64, negative_knee: f64) -> Self {
        Self {
            drive,
            boost,
            negative_knee,
        }
    }

    /// Shapes one sample.
    #[inline]
    pub fn shape(&self, sample: f64) -> f64 {
        let s = sample * self.drive;
        let curved = if s > 0.0 {
            s / (1.0 + s)
        } else {
            let mag = -s;
            -(mag / (1.0 + mag * self.negative_knee))
        };
        (curved * self.boost).clamp(-1.0, 1.0)
    }
}

/// Runs one smoothing pass with coefficient `a`.
pub fn smooth(samples: &mut [f64], a: f64) {
    OnePoleFilter::from_coefficient(a).process_buffer(samples);
}

/// Runs successive smoothing passes; more passes give a darker tone.
pub fn smooth_passes(samples: &mut [f64], coefficients: &[f64]) {
    for &a in coefficients {
        smooth(samples, a);
    }
}

/// Hard-clamps every sample to [-1, 1].
pub fn clamp_buffer(samples: &mut [f64]) {
    for sample in samples.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}

/// Linear fade-in over the first `len` samples (gain `i / len`).
pub fn fade_in(samples: &mut [f64], len: usize) {
    let len = len.min(samples.len());
    if len == 0 {
        return;
    }
    for (i, sample) in samples.iter_mut().take(len).enumerate() {
        *sample *= i as f64 / len as f64;
    }
}

/// Linear fade-out over the last `len` samples, reaching `1 / len` on the final sample.
pub fn fade_out(samples: &mut [f64], len: usize) {
    let total = samples.len();
    let len = len.min(total);
    if len == 0 {
        return;
    }
    for (i, sample) in samples.iter_mut().enumerate().skip(total - len) {
        *sample *= (total - i) as f64 / len as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_stays_in_range() {
        for curve in [
            SaturationCurve::PLAYER,
            SaturationCurve::ENEMY,
            SaturationCurve::SUPER,
        ] {
            for i in -200..=200 {
                let y = curve.shape(i as f64 * 0.1);
                assert!((-1.0..=1.0).contains(&y), "{:?} -> {}", curve, y);
            }
        }
    }

    #[test]
    fn test_shape_is_asymmetric() {
        let curve = SaturationCurve::PLAYER;
        let pos = curve.shape(0.3);
        let neg = curve.shape(-0.3);
        assert!(pos > 0.0 && neg < 0.0);
        // Negative excursions are compressed less.
        assert!(neg.abs() > pos);
    }

    #[test]
    fn test_shape_zero_and_monotonic() {
        let curve = SaturationCurve::ENEMY;
        assert_eq!(curve.shape(0.0), 0.0);
        let mut prev = curve.shape(-5.0);
        for i in -49..=50 {
            let y = curve.shape(i as f64 * 0.1);
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn test_two_passes_are_darker() {
        let alternating: Vec<f64> = (0..256).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let mut one = alternating.clone();
        smooth(&mut one, 0.82);
        let mut two = alternating;
        smooth_passes(&mut two, &[0.82, 0.85]);

        let energy = |s: &[f64]| s[16..].iter().map(|x| x * x).sum::<f64>();
        assert!(energy(&two) < energy(&one));
    }

    #[test]
    fn test_fades() {
        let mut samples = vec![1.0; 10];
        fade_in(&mut samples, 4);
        assert_eq!(samples[0], 0.0);
        assert!((samples[2] - 0.5).abs() < 1e-12);
        assert_eq!(samples[4], 1.0);

        let mut samples = vec![1.0; 10];
        fade_out(&mut samples, 4);
        assert_eq!(samples[5], 1.0);
        assert!((samples[6] - 1.0).abs() < 1e-12);
        assert!((samples[9] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fades_longer_than_buffer() {
        let mut samples = vec![1.0; 3];
        fade_in(&mut samples, 100);
        fade_out(&mut samples, 100);
        assert!(samples.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
