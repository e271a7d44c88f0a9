//! Playback contract and the game's sound cues.
//!
//! The core never plays audio itself. A host implements [`Playback`] on top
//! of whatever audio device it owns; [`Cue`]s pair a cached buffer with the
//! volume, pitch and looping the game uses for it.

use std::sync::Arc;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::buffer::SampleBuffer;
use crate::cache::SoundCache;
use crate::error::AudioResult;
use crate::request::{SoundKind, SoundRequest};
use crate::rng::derive_component_seed;
use crate::synthesis::gunshot::Grade;

/// Number of groan voices each actor cycles through.
///
/// Every voice is a separate cache entry, so this bounds the groan buffers
/// held per actor.
pub const GROAN_VARIANTS: u32 = 4;

/// Groan seed for an actor's voice `variant`, taken modulo [`GROAN_VARIANTS`].
pub fn groan_voice_seed(actor_id: u32, variant: u32) -> u32 {
    derive_component_seed(actor_id, &format!("groan_voice_{}", variant % GROAN_VARIANTS))
}

/// How a buffer should be played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayOptions {
    /// Gain in [0, 1].
    pub volume: f32,
    /// Playback rate multiplier, always positive.
    pub pitch: f32,
    pub looped: bool,
    /// Seconds to wait before the sound starts.
    pub delay_seconds: f64,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            looped: false,
            delay_seconds: 0.0,
        }
    }
}

impl PlayOptions {
    /// One-shot at `volume`, clamped to [0, 1].
    pub fn at_volume(volume: f32) -> Self {
        Self::default().with_volume(volume)
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the pitch multiplier. Non-positive or non-finite values keep 1.0.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = if pitch.is_finite() && pitch > 0.0 {
            pitch
        } else {
            1.0
        };
        self
    }

    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }

    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay_seconds = seconds.max(0.0);
        self
    }
}

/// Something that can play sample buffers.
pub trait Playback {
    /// Identifies a playing sound so it can be stopped.
    type Handle;

    /// Starts playing `buffer`.
    fn play(&mut self, buffer: Arc<SampleBuffer>, options: PlayOptions) -> Self::Handle;

    /// Stops a sound started by [`Playback::play`].
    fn stop(&mut self, handle: Self::Handle);

    /// Changes the volume of a playing sound. Backends without live volume
    /// control may ignore it.
    fn set_volume(&mut self, _handle: &Self::Handle, _volume: f32) {}
}

/// A sound request paired with the way the game plays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub request: SoundRequest,
    pub options: PlayOptions,
}

/// Player rifle volume.
pub const PLAYER_GUNSHOT_VOLUME: f32 = 1.0;
/// Standard enemy rifle volume.
pub const ENEMY_GUNSHOT_VOLUME: f32 = 0.5;
/// Super soldier cannon volume.
pub const SUPER_GUNSHOT_VOLUME: f32 = 0.8;
/// Shell casing volume.
pub const SHELL_CASING_VOLUME: f32 = 0.25;
/// Casing lands this long after the shot.
pub const SHELL_CASING_DELAY: f64 = 0.08;
/// Music bed volume.
pub const MUSIC_VOLUME: f32 = 0.35;

impl Cue {
    pub fn new(request: SoundRequest, options: PlayOptions) -> Self {
        Self { request, options }
    }

    /// The player's rifle.
    pub fn player_gunshot() -> Self {
        Self::new(
            SoundRequest::new(SoundKind::Gunshot).with_grade(Grade::Player),
            PlayOptions::at_volume(PLAYER_GUNSHOT_VOLUME),
        )
    }

    /// The casing ejected by the player's rifle.
    pub fn shell_casing() -> Self {
        Self::new(
            SoundRequest::new(SoundKind::ShellCasing),
            PlayOptions::at_volume(SHELL_CASING_VOLUME).with_delay(SHELL_CASING_DELAY),
        )
    }

    /// An enemy's rifle; super soldiers are louder.
    pub fn enemy_gunshot(grade: Grade, actor_id: u32) -> Self {
        let volume = match grade {
            Grade::EnemySuper => SUPER_GUNSHOT_VOLUME,
            Grade::EnemyStandard => ENEMY_GUNSHOT_VOLUME,
            Grade::Player => PLAYER_GUNSHOT_VOLUME,
        };
        Self::new(
            SoundRequest::gunshot(grade, actor_id),
            PlayOptions::at_volume(volume),
        )
    }

    /// One groan from an actor in voice `variant`, with volume 0.15-0.3 and
    /// pitch 0.8-1.2 drawn from `rng`.
    pub fn groan(actor_id: u32, variant: u32, rng: &mut Pcg32) -> Self {
        let volume = rng.gen_range(0.15..0.3);
        let pitch = rng.gen_range(0.8..1.2);
        Self::new(
            SoundRequest::new(SoundKind::Groan).with_seed(groan_voice_seed(actor_id, variant)),
            PlayOptions::at_volume(volume).with_pitch(pitch),
        )
    }

    /// The looping music bed.
    pub fn music() -> Self {
        Self::new(
            SoundRequest::new(SoundKind::Music),
            PlayOptions::at_volume(MUSIC_VOLUME).looped(),
        )
    }

    /// A health loop (heartbeat or breathing) at `volume`.
    pub fn health_loop(kind: SoundKind, volume: f32) -> Self {
        Self::new(
            SoundRequest::new(kind),
            PlayOptions::at_volume(volume).looped(),
        )
    }

    /// Fetches the cue's buffer from `cache` and plays it.
    pub fn play<P: Playback>(&self, cache: &SoundCache, playback: &mut P) -> AudioResult<P::Handle> {
        let buffer = cache.get(&self.request)?;
        Ok(playback.play(buffer, self.options))
    }
}

/// Handle issued by [`RecordingPlayback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordedHandle(pub u64);

/// One call made on a [`RecordingPlayback`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    Play {
        handle: RecordedHandle,
        samples: usize,
        sample_rate: u32,
        options: PlayOptions,
    },
    Stop {
        handle: RecordedHandle,
    },
    Volume {
        handle: RecordedHandle,
        volume: f32,
    },
}

/// In-memory [`Playback`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingPlayback {
    next_handle: u64,
    events: Vec<PlaybackEvent>,
    active: Vec<RecordedHandle>,
}

impl RecordingPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls in order.
    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    /// Handles that were played and not yet stopped.
    pub fn active(&self) -> &[RecordedHandle] {
        &self.active
    }

    /// Options a handle was played with.
    pub fn options_of(&self, handle: RecordedHandle) -> Option<PlayOptions> {
        self.events.iter().rev().find_map(|event| match event {
            PlaybackEvent::Play {
                handle: h, options, ..
            } if *h == handle => Some(*options),
            _ => None,
        })
    }
}

impl Playback for RecordingPlayback {
    type Handle = RecordedHandle;

    fn play(&mut self, buffer: Arc<SampleBuffer>, options: PlayOptions) -> RecordedHandle {
        let handle = RecordedHandle(self.next_handle);
        self.next_handle += 1;
        self.events.push(PlaybackEvent::Play {
            handle,
            samples: buffer.len(),
            sample_rate: buffer.sample_rate(),
            options,
        });
        self.active.push(handle);
        handle
    }

    fn stop(&mut self, handle: RecordedHandle) {
        self.events.push(PlaybackEvent::Stop { handle });
        self.active.retain(|h| *h != handle);
    }

    fn set_volume(&mut self, handle: &RecordedHandle, volume: f32) {
        self.events.push(PlaybackEvent::Volume {
            handle: *handle,
            volume,
        });
    }
}
