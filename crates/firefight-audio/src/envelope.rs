//! Envelope primitives.
//!
//! Every envelope is a pure function of elapsed time. Outside its support
//! window an envelope contributes zero, so layers can be summed blindly.

use std::f64::consts::PI;

/// Half-open time window `[start, end)` in seconds during which a layer is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerWindow {
    /// Start of the window in seconds.
    pub start: f64,
    /// End of the window in seconds (exclusive). `f64::INFINITY` runs to the end of the buffer.
    pub end: f64,
}

impl LayerWindow {
    /// Creates a window.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// A window that starts at `start` and never closes.
    pub const fn open_ended(start: f64) -> Self {
        Self {
            start,
            end: f64::INFINITY,
        }
    }

    /// Returns true if `t` lies inside the window.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Time elapsed since the window opened, or `None` when `t` is outside it.
    #[inline]
    pub fn local(&self, t: f64) -> Option<f64> {
        if self.contains(t) {
            Some(t - self.start)
        } else {
            None
        }
    }
}

/// Exponential decay `exp(-rate * t)` for `t >= 0`, zero before.
#[inline]
pub fn exp_decay(t: f64, rate: f64) -> f64 {
    if t < 0.0 {
        0.0
    } else {
        (-rate * t).exp()
    }
}

/// Smooth bump `sin(pi * t / duration)^2` on `[0, duration]`, zero elsewhere.
#[inline]
pub fn sine_squared_window(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 || t < 0.0 || t > duration {
        return 0.0;
    }
    let s = (PI * t / duration).sin();
    s * s
}

/// Half sine arch `sin(pi * t / duration)` on `[0, duration]`, zero elsewhere.
#[inline]
pub fn half_sine(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 || t < 0.0 || t > duration {
        return 0.0;
    }
    (PI * t / duration).sin()
}

/// Steep impulse `(1 - t / duration)^power` on `[0, duration)`, zero elsewhere.
///
/// Powers of three and up give the sharp "crack" onset used for detonations.
#[inline]
pub fn impulse(t: f64, duration: f64, power: i32) -> f64 {
    if duration <= 0.0 || t < 0.0 || t >= duration {
        return 0.0;
    }
    (1.0 - t / duration).powi(power)
}

/// Linear ramp from 1 at `t = 0` down to 0 at `t = duration`.
#[inline]
pub fn linear_decay(t: f64, duration: f64) -> f64 {
    impulse(t, duration, 1)
}

/// Friedlander blast-wave profile `(1 - t/tp) * exp(-k * t/tp)`.
///
/// `tp` is the positive-phase duration. The wave goes negative after `tp`
/// and is cut off at `cutoff_periods * tp`.
#[inline]
pub fn friedlander(t: f64, tp: f64, k: f64, cutoff_periods: f64) -> f64 {
    if tp <= 0.0 || t < 0.0 || t >= tp * cutoff_periods {
        return 0.0;
    }
    let tn = t / tp;
    (1.0 - tn) * (-k * tn).exp()
}

/// Cubic gate `max(0, x)^3`, used to let a slow LFO open only near its crest.
#[inline]
pub fn cubic_gate(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x * x * x
    }
}
