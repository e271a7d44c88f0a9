//! Per-actor groan timing.

use std::ops::Range;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::playback::{Cue, GROAN_VARIANTS};
use crate::rng::create_component_rng;

/// Delay before an actor's first groan, in seconds.
pub const FIRST_GROAN: Range<f64> = 2.0..6.0;
/// Delay between later groans, in seconds.
pub const GROAN_INTERVAL: Range<f64> = 4.0..10.0;

/// Counts down to an actor's next groan.
///
/// All randomness comes from the actor's id, so two schedulers for the same
/// actor groan at the same times with the same cues. Successive groans rotate
/// through the actor's [`GROAN_VARIANTS`] voices.
#[derive(Debug, Clone)]
pub struct GroanScheduler {
    actor_id: u32,
    rng: Pcg32,
    remaining: f64,
    groans: u32,
}

impl GroanScheduler {
    pub fn new(actor_id: u32) -> Self {
        let mut rng = create_component_rng(actor_id, "groan_timer");
        let remaining = rng.gen_range(FIRST_GROAN);
        Self {
            actor_id,
            rng,
            remaining,
            groans: 0,
        }
    }

    /// Seconds until the next groan is due.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Advances the timer by `dt` seconds.
    ///
    /// Returns the cue to play when a groan falls due. If the actor's
    /// previous groan is still playing (`busy`) the groan is dropped, but
    /// the timer restarts either way.
    pub fn tick(&mut self, dt: f64, busy: bool) -> Option<Cue> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return None;
        }
        self.remaining = self.rng.gen_range(GROAN_INTERVAL);
        if busy {
            tracing::debug!(actor = self.actor_id, "groan skipped, still playing");
            return None;
        }
        let variant = self.groans % GROAN_VARIANTS;
        self.groans = self.groans.wrapping_add(1);
        Some(Cue::groan(self.actor_id, variant, &mut self.rng))
    }
}
