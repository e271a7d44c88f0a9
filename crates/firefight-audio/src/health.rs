//! Health-driven ambience.
//!
//! Below half health the player hears a heartbeat; at a fifth or less it
//! turns into labored breathing (which carries its own racing heartbeat).
//! Loop volume rises as health falls within each band.

use std::sync::Arc;

use crate::cache::SoundCache;
use crate::error::AudioResult;
use crate::playback::{Cue, Playback};
use crate::request::SoundKind;

/// Ratio at or below which the heartbeat starts.
pub const WOUNDED_RATIO: f32 = 0.5;
/// Ratio at or below which breathing replaces the heartbeat.
pub const CRITICAL_RATIO: f32 = 0.2;

const HEARTBEAT_VOLUME: (f32, f32) = (0.25, 0.5);
const BREATHING_VOLUME: (f32, f32) = (0.45, 0.75);

/// Which health loop is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLoop {
    Heartbeat,
    Breathing,
}

impl HealthLoop {
    pub fn kind(&self) -> SoundKind {
        match self {
            HealthLoop::Heartbeat => SoundKind::Heartbeat,
            HealthLoop::Breathing => SoundKind::Breathing,
        }
    }
}

/// What the host must do after a health update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTransition {
    /// Stop whatever plays and start this loop.
    Start(HealthLoop),
    /// Stop the current loop.
    Stop,
    Unchanged,
}

fn lerp(range: (f32, f32), t: f32) -> f32 {
    range.0 + (range.1 - range.0) * t.clamp(0.0, 1.0)
}

/// Health loop selection state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthAudio {
    current: Option<HealthLoop>,
    volume: f32,
}

impl HealthAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loop that should be playing, if any.
    pub fn current(&self) -> Option<HealthLoop> {
        self.current
    }

    /// Volume for the current loop; 0 when silent.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Feeds the current health ratio (health / max health).
    ///
    /// A NaN ratio changes nothing.
    pub fn update(&mut self, ratio: f32) -> HealthTransition {
        if ratio.is_nan() {
            return HealthTransition::Unchanged;
        }

        let wanted = if ratio <= CRITICAL_RATIO {
            Some(HealthLoop::Breathing)
        } else if ratio <= WOUNDED_RATIO {
            Some(HealthLoop::Heartbeat)
        } else {
            None
        };

        let transition = match (self.current, wanted) {
            (current, wanted) if current == wanted => HealthTransition::Unchanged,
            (_, Some(next)) => HealthTransition::Start(next),
            (Some(_), None) => HealthTransition::Stop,
            (None, None) => HealthTransition::Unchanged,
        };
        self.current = wanted;

        self.volume = match wanted {
            Some(HealthLoop::Breathing) => lerp(BREATHING_VOLUME, 1.0 - ratio / CRITICAL_RATIO),
            Some(HealthLoop::Heartbeat) => lerp(
                HEARTBEAT_VOLUME,
                1.0 - (ratio - CRITICAL_RATIO) / (WOUNDED_RATIO - CRITICAL_RATIO),
            ),
            None => 0.0,
        };
        transition
    }
}

/// Applies [`HealthAudio`] transitions to a [`Playback`].
pub struct HealthAudioDriver<P: Playback> {
    state: HealthAudio,
    cache: Arc<SoundCache>,
    handle: Option<P::Handle>,
}

impl<P: Playback> HealthAudioDriver<P> {
    pub fn new(cache: Arc<SoundCache>) -> Self {
        Self {
            state: HealthAudio::new(),
            cache,
            handle: None,
        }
    }

    pub fn state(&self) -> &HealthAudio {
        &self.state
    }

    /// Updates the loop for `ratio`, starting, stopping or re-leveling it.
    ///
    /// If an earlier start failed, the wanted loop is started again on the
    /// next update and reported as [`HealthTransition::Start`].
    pub fn update(&mut self, ratio: f32, playback: &mut P) -> AudioResult<HealthTransition> {
        let transition = match (self.state.update(ratio), self.state.current()) {
            (HealthTransition::Unchanged, Some(wanted)) if self.handle.is_none() => {
                HealthTransition::Start(wanted)
            }
            (transition, _) => transition,
        };
        match transition {
            HealthTransition::Start(next) => {
                if let Some(handle) = self.handle.take() {
                    playback.stop(handle);
                }
                let cue = Cue::health_loop(next.kind(), self.state.volume());
                self.handle = Some(cue.play(&self.cache, playback)?);
                tracing::debug!(?next, volume = self.state.volume(), "health loop started");
            }
            HealthTransition::Stop => {
                if let Some(handle) = self.handle.take() {
                    playback.stop(handle);
                }
                tracing::debug!("health loop stopped");
            }
            HealthTransition::Unchanged => {
                if let Some(handle) = &self.handle {
                    playback.set_volume(handle, self.state.volume());
                }
            }
        }
        Ok(transition)
    }
}
