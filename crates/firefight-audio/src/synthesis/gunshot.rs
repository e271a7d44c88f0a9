//! Layered rifle shot synthesis.
//!
//! A gunshot is a fixed-length buffer in which every layer is evaluated for
//! every sample and contributes only while `t` lies inside its window:
//!
//! 1. Friedlander muzzle blast
//! 2. Broadband detonation impulse
//! 3. Supersonic crack (noise plus high tones)
//! 4. Barrel / body resonance
//! 5. Low concussion sweep, weighted to 80-400 Hz so small speakers carry it
//! 6. Mechanical action (player and standard enemy rifles)
//! 7. Echo / reverb stages
//! 8. Distant rumble (super soldier only)
//!
//! The summed layers go through the grade's saturation curve and then two
//! smoothing passes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{sample_time, SynthConfig, DEFAULT_SAMPLE_RATE};
use crate::buffer::{num_samples, SampleBuffer};
use crate::envelope::{exp_decay, friedlander, half_sine, impulse, LayerWindow};
use crate::error::{AudioError, AudioResult};
use crate::noise::generate_noise;
use crate::oscillator::{chirp, partial_stack};
use crate::shaping::{smooth_passes, SaturationCurve};

/// Seed of the player's rifle.
pub const PLAYER_SEED: u32 = 42;

/// Offset added to an actor id to seed a super soldier's cannon.
pub const SUPER_SEED_OFFSET: u32 = 999;

/// Intensity tier of a gunshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Close-up rifle heard from the shooter's position.
    Player,
    /// Standard enemy rifle heard at a distance.
    EnemyStandard,
    /// Super soldier cannon: longer, deeper, louder.
    EnemySuper,
}

impl Grade {
    /// All grades in catalogue order.
    pub const ALL: [Grade; 3] = [Grade::Player, Grade::EnemyStandard, Grade::EnemySuper];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Player => "player",
            Grade::EnemyStandard => "enemy_standard",
            Grade::EnemySuper => "enemy_super",
        }
    }

    /// Layer preset for this grade.
    pub fn preset(&self) -> &'static GunshotPreset {
        match self {
            Grade::Player => &PLAYER,
            Grade::EnemyStandard => &ENEMY_STANDARD,
            Grade::EnemySuper => &ENEMY_SUPER,
        }
    }

    /// Buffer length in seconds.
    pub fn duration(&self) -> f64 {
        self.preset().duration
    }

    /// Seed for an actor's rifle of this grade.
    ///
    /// Super soldiers offset their id so that a super soldier and a standard
    /// enemy sharing an id still sound different.
    pub fn actor_seed(&self, actor_id: u32) -> u32 {
        match self {
            Grade::EnemySuper => actor_id.wrapping_add(SUPER_SEED_OFFSET),
            _ => actor_id,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Grade::Player),
            "enemy_standard" | "enemy" | "standard" => Ok(Grade::EnemyStandard),
            "enemy_super" | "super" => Ok(Grade::EnemySuper),
            other => Err(AudioError::invalid_param(
                "grade",
                format!(
                    "unknown grade '{}' (expected player, enemy_standard or enemy_super)",
                    other
                ),
            )),
        }
    }
}

/// Friedlander blast wave parameters.
#[derive(Debug, Clone, Copy)]
pub struct BlastLayer {
    /// Positive-phase duration in seconds.
    pub tp: f64,
    /// Decay constant.
    pub k: f64,
    /// Cut-off in multiples of `tp`.
    pub periods: f64,
    pub gain: f64,
}

/// Noise impulse with a steep power-law decay.
#[derive(Debug, Clone, Copy)]
pub struct ImpulseLayer {
    pub duration: f64,
    pub power: i32,
    pub gain: f64,
}

/// Supersonic crack: noise plus high tones under a fast decay.
#[derive(Debug, Clone, Copy)]
pub struct CrackLayer {
    pub window: LayerWindow,
    pub decay: f64,
    pub noise: f64,
    pub tones: &'static [(f64, f64)],
    /// Length of the N-wave arch blended in half and half with the crack, if any.
    pub n_wave: Option<f64>,
    pub gain: f64,
}

/// A decaying mix of noise and fixed partials.
///
/// Used for barrel resonance, mechanical action, echo stages and the rumble tail.
#[derive(Debug, Clone, Copy)]
pub struct ToneNoiseLayer {
    pub window: LayerWindow,
    pub decay: f64,
    pub noise: f64,
    pub tone: f64,
    pub partials: &'static [(f64, f64)],
    pub gain: f64,
}

impl ToneNoiseLayer {
    #[inline]
    fn eval(&self, t: f64, noise: f64) -> f64 {
        match self.window.local(t) {
            Some(lt) => {
                let tone = partial_stack(t, self.partials);
                (noise * self.noise + tone * self.tone) * exp_decay(lt, self.decay) * self.gain
            }
            None => 0.0,
        }
    }
}

/// Falling sine sweep blended with a fixed mid-bass stack.
#[derive(Debug, Clone, Copy)]
pub struct ConcussionLayer {
    pub window: LayerWindow,
    pub decay: f64,
    pub sweep_from: f64,
    pub sweep_to: f64,
    pub sweep_time: f64,
    pub sweep_mix: f64,
    pub bass_mix: f64,
    pub bass: &'static [(f64, f64)],
    pub gain: f64,
}

/// Full layer table for one grade.
#[derive(Debug, Clone, Copy)]
pub struct GunshotPreset {
    pub duration: f64,
    pub blast: BlastLayer,
    pub impulse: ImpulseLayer,
    pub crack: CrackLayer,
    pub bodies: &'static [ToneNoiseLayer],
    pub concussion: ConcussionLayer,
    pub action: Option<ToneNoiseLayer>,
    pub echoes: &'static [ToneNoiseLayer],
    pub rumble: Option<ToneNoiseLayer>,
    pub saturation: SaturationCurve,
    pub smoothing: &'static [f64],
}

static PLAYER: GunshotPreset = GunshotPreset {
    duration: 1.8,
    blast: BlastLayer {
        tp: 0.003,
        k: 3.5,
        periods: 8.0,
        gain: 2.5,
    },
    impulse: ImpulseLayer {
        duration: 0.0015,
        power: 4,
        gain: 1.6,
    },
    crack: CrackLayer {
        window: LayerWindow::new(0.0003, 0.006),
        decay: 400.0,
        noise: 0.3,
        tones: &[(1800.0, 0.25), (2800.0, 0.15), (4000.0, 0.06)],
        n_wave: Some(0.004),
        gain: 1.4,
    },
    bodies: &[ToneNoiseLayer {
        window: LayerWindow::new(0.001, 0.04),
        decay: 70.0,
        noise: 0.3,
        tone: 0.7,
        partials: &[
            (250.0, 0.25),
            (500.0, 0.35),
            (800.0, 0.25),
            (1200.0, 0.15),
            (1800.0, 0.08),
        ],
        gain: 2.0,
    }],
    concussion: ConcussionLayer {
        window: LayerWindow::new(0.001, 0.2),
        decay: 13.0,
        sweep_from: 300.0,
        sweep_to: 80.0,
        sweep_time: 0.08,
        sweep_mix: 0.4,
        bass_mix: 0.6,
        bass: &[
            (100.0, 0.4),
            (150.0, 0.5),
            (200.0, 0.6),
            (300.0, 0.5),
            (400.0, 0.3),
        ],
        gain: 1.8,
    },
    action: Some(ToneNoiseLayer {
        window: LayerWindow::new(0.02, 0.08),
        decay: 80.0,
        noise: 0.25,
        tone: 0.75,
        partials: &[(2200.0, 0.2), (3500.0, 0.12), (800.0, 0.15)],
        gain: 0.25,
    }),
    echoes: &[
        ToneNoiseLayer {
            window: LayerWindow::new(0.03, 0.25),
            decay: 10.0,
            noise: 0.12,
            tone: 1.0,
            partials: &[(150.0, 0.3), (300.0, 0.25), (500.0, 0.15)],
            gain: 0.7,
        },
        ToneNoiseLayer {
            window: LayerWindow::new(0.15, 1.0),
            decay: 4.0,
            noise: 0.08,
            tone: 1.0,
            partials: &[(120.0, 0.3), (200.0, 0.25), (350.0, 0.15)],
            gain: 0.45,
        },
        ToneNoiseLayer {
            window: LayerWindow::open_ended(0.4),
            decay: 2.5,
            noise: 0.1,
            tone: 0.9,
            partials: &[(100.0, 0.25), (160.0, 0.3), (250.0, 0.2)],
            gain: 0.25,
        },
    ],
    rumble: None,
    saturation: SaturationCurve::PLAYER,
    smoothing: &[0.82, 0.85],
};

static ENEMY_STANDARD: GunshotPreset = GunshotPreset {
    duration: 1.0,
    blast: BlastLayer {
        tp: 0.0025,
        k: 4.0,
        periods: 6.0,
        gain: 1.5,
    },
    impulse: ImpulseLayer {
        duration: 0.001,
        power: 3,
        gain: 1.4,
    },
    crack: CrackLayer {
        window: LayerWindow::new(0.0002, 0.005),
        decay: 450.0,
        noise: 0.25,
        tones: &[(1500.0, 0.25), (2500.0, 0.15), (3500.0, 0.06)],
        n_wave: None,
        gain: 1.3,
    },
    bodies: &[ToneNoiseLayer {
        window: LayerWindow::new(0.001, 0.025),
        decay: 90.0,
        noise: 0.25,
        tone: 0.75,
        partials: &[(250.0, 0.25), (500.0, 0.3), (800.0, 0.2), (1200.0, 0.1)],
        gain: 1.4,
    }],
    concussion: ConcussionLayer {
        window: LayerWindow::new(0.002, 0.12),
        decay: 18.0,
        sweep_from: 280.0,
        sweep_to: 100.0,
        sweep_time: 0.06,
        sweep_mix: 0.4,
        bass_mix: 0.6,
        bass: &[(120.0, 0.35), (180.0, 0.45), (250.0, 0.4), (350.0, 0.3)],
        gain: 1.2,
    },
    // Distance dulls the bolt: quieter and lower than the player's.
    action: Some(ToneNoiseLayer {
        window: LayerWindow::new(0.025, 0.085),
        decay: 90.0,
        noise: 0.25,
        tone: 0.75,
        partials: &[(1900.0, 0.2), (3000.0, 0.1), (700.0, 0.15)],
        gain: 0.15,
    }),
    echoes: &[ToneNoiseLayer {
        window: LayerWindow::open_ended(0.05),
        decay: 4.0,
        noise: 0.08,
        tone: 1.0,
        partials: &[(120.0, 0.25), (220.0, 0.2), (350.0, 0.12)],
        gain: 0.4,
    }],
    rumble: None,
    saturation: SaturationCurve::ENEMY,
    smoothing: &[0.82, 0.88],
};

static ENEMY_SUPER: GunshotPreset = GunshotPreset {
    duration: 2.0,
    blast: BlastLayer {
        tp: 0.0035,
        k: 3.0,
        periods: 8.0,
        gain: 2.0,
    },
    impulse: ImpulseLayer {
        duration: 0.003,
        power: 3,
        gain: 2.5,
    },
    crack: CrackLayer {
        window: LayerWindow::new(0.0002, 0.004),
        decay: 500.0,
        noise: 0.3,
        tones: &[(1200.0, 0.25), (2000.0, 0.15), (3000.0, 0.05)],
        n_wave: None,
        gain: 1.0,
    },
    bodies: &[
        ToneNoiseLayer {
            window: LayerWindow::new(0.0, 0.05),
            decay: 50.0,
            noise: 0.2,
            tone: 0.8,
            partials: &[(120.0, 0.5), (200.0, 0.4), (350.0, 0.3), (500.0, 0.15)],
            gain: 2.2,
        },
        ToneNoiseLayer {
            window: LayerWindow::new(0.01, 0.15),
            decay: 25.0,
            noise: 0.15,
            tone: 0.85,
            partials: &[(180.0, 0.4), (280.0, 0.3), (450.0, 0.2)],
            gain: 1.5,
        },
    ],
    concussion: ConcussionLayer {
        window: LayerWindow::new(0.002, 0.3),
        decay: 8.0,
        sweep_from: 350.0,
        sweep_to: 60.0,
        sweep_time: 0.1,
        sweep_mix: 0.3,
        bass_mix: 0.7,
        bass: &[(80.0, 0.5), (130.0, 0.6), (200.0, 0.5), (300.0, 0.35)],
        gain: 2.0,
    },
    action: None,
    echoes: &[ToneNoiseLayer {
        window: LayerWindow::new(0.1, 1.5),
        decay: 2.5,
        noise: 0.06,
        tone: 1.0,
        partials: &[(100.0, 0.3), (180.0, 0.25), (280.0, 0.15)],
        gain: 0.5,
    }],
    rumble: Some(ToneNoiseLayer {
        window: LayerWindow::open_ended(0.5),
        decay: 2.0,
        noise: 0.05,
        tone: 0.95,
        partials: &[(80.0, 0.3), (140.0, 0.25), (220.0, 0.15)],
        gain: 0.3,
    }),
    saturation: SaturationCurve::SUPER,
    smoothing: &[0.78, 0.82],
};

impl GunshotPreset {
    /// Sum of all active layers at time `t` before shaping.
    fn layer_sum(&self, t: f64, noise: f64) -> f64 {
        let mut sample = 0.0;

        let b = &self.blast;
        sample += friedlander(t, b.tp, b.k, b.periods) * b.gain;

        let imp = &self.impulse;
        sample += noise * impulse(t, imp.duration, imp.power) * imp.gain;

        let c = &self.crack;
        if let Some(lt) = c.window.local(t) {
            let crack = noise * c.noise + partial_stack(t, c.tones);
            let body = match c.n_wave {
                Some(len) => half_sine(lt, len) * 0.5 + crack * 0.5,
                None => crack,
            };
            sample += body * exp_decay(lt, c.decay) * c.gain;
        }

        for body in self.bodies {
            sample += body.eval(t, noise);
        }

        let con = &self.concussion;
        if let Some(lt) = con.window.local(t) {
            let sweep = chirp(t, lt, con.sweep_from, con.sweep_to, con.sweep_time);
            let bass = partial_stack(t, con.bass);
            sample += (sweep * con.sweep_mix + bass * con.bass_mix)
                * exp_decay(lt, con.decay)
                * con.gain;
        }

        if let Some(action) = &self.action {
            sample += action.eval(t, noise);
        }

        for echo in self.echoes {
            sample += echo.eval(t, noise);
        }

        if let Some(rumble) = &self.rumble {
            sample += rumble.eval(t, noise);
        }

        sample
    }
}

/// Renders a gunshot of the given grade.
///
/// # Arguments
/// * `grade` - Intensity tier
/// * `seed` - Noise seed; identical seed and grade give identical buffers
/// * `config` - Sample rate override
pub fn synthesize(grade: Grade, seed: u32, config: &SynthConfig) -> AudioResult<SampleBuffer> {
    let sample_rate = config.resolve_rate(DEFAULT_SAMPLE_RATE)?;
    let preset = grade.preset();
    let n = num_samples(sample_rate, preset.duration);
    let noise = generate_noise(n, seed);

    let mut work: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(i, &nz)| {
            let t = sample_time(i, sample_rate);
            preset.saturation.shape(preset.layer_sum(t, nz))
        })
        .collect();

    smooth_passes(&mut work, preset.smoothing);

    tracing::debug!(%grade, seed, samples = n, "rendered gunshot");
    Ok(SampleBuffer::from_f64(sample_rate, &work))
}
