//! Stateless oscillator primitives.
//!
//! Oscillators here are evaluated at absolute time rather than by phase
//! accumulation, so any sample can be computed independently of the others.

use std::f64::consts::TAU;

/// `sin(2 * pi * freq * t)`.
#[inline]
pub fn sine(freq: f64, t: f64) -> f64 {
    (TAU * freq * t).sin()
}

/// Weighted sum of integer harmonics of `base_freq`.
///
/// `weights[0]` scales the fundamental, `weights[1]` the second harmonic and so on.
pub fn harmonic_stack(t: f64, base_freq: f64, weights: &[f64]) -> f64 {
    weights
        .iter()
        .enumerate()
        .map(|(k, &w)| w * sine(base_freq * (k + 1) as f64, t))
        .sum()
}

/// Weighted sum of partials at arbitrary ratios of `base_freq`.
///
/// Each entry is `(ratio, weight)`; slightly inharmonic ratios thicken vocal tones.
pub fn ratio_stack(t: f64, base_freq: f64, partials: &[(f64, f64)]) -> f64 {
    partials
        .iter()
        .map(|&(ratio, w)| w * sine(base_freq * ratio, t))
        .sum()
}

/// Weighted sum of partials at fixed frequencies, each entry `(freq_hz, weight)`.
pub fn partial_stack(t: f64, partials: &[(f64, f64)]) -> f64 {
    partials.iter().map(|&(freq, w)| w * sine(freq, t)).sum()
}

/// Frequency that slides linearly from `f_start` to `f_end` over `window`
/// seconds and then holds at `f_end`.
#[inline]
pub fn freq_lerp(t: f64, f_start: f64, f_end: f64, window: f64) -> f64 {
    let progress = if window <= 0.0 {
        1.0
    } else {
        (t / window).clamp(0.0, 1.0)
    };
    f_start + (f_end - f_start) * progress
}

/// Falling-pitch sine: the frequency follows `freq_lerp` over layer-local time
/// `local_t` and is evaluated against absolute time `t`.
#[inline]
pub fn chirp(t: f64, local_t: f64, f_start: f64, f_end: f64, window: f64) -> f64 {
    sine(freq_lerp(local_t, f_start, f_end, window), t)
}
