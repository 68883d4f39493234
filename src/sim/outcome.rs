//! How a run ends: the jumpscare and the offering fade

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::host::{AudioCue, Cue, Presentation, Screen};
use super::state::{GameMode, SessionState};
use crate::consts::*;

pub const DEATH_TEXT: &str = "Nyanners consumed your sanity.\n\nClick anywhere to play again.";
pub const ENDING_TEXT: &str =
    "Nyanners enjoyed your offering of Moo Goo Gai Pan.\n\nYou shall be spared.\n\nGame Over.";

/// Kill the player if the active hazard has outlived the timeout.
///
/// Only acts while Playing, so it fires at most once per run.
pub fn resolve_timeouts<H: AudioCue + Presentation>(
    state: &mut SessionState,
    now: Timestamp,
    host: &mut H,
) -> bool {
    if state.mode != GameMode::Playing {
        return false;
    }
    let Some(active) = state.hazards.active().copied() else {
        return false;
    };
    if !active.timed_out(now, state.tuning.timeout_ms) {
        return false;
    }

    log::info!(
        "{:?} attack unresolved for {}ms; player died",
        active.kind(),
        now.elapsed_since(active.since())
    );
    state.mode = GameMode::Died;
    state.jumpscare = Some(Jumpscare::new(now));
    host.set_message("");
    host.show_screen(Screen::Jumpscare);
    host.play(Cue::Scream);
    true
}

/// Jumpscare overlay geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: SCARE_START_TOP,
            width: SCARE_START_WIDTH,
            height: SCARE_START_HEIGHT,
        }
    }
}

/// A running jumpscare
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jumpscare {
    pub started_at: Timestamp,
    pub overlay: Overlay,
}

impl Jumpscare {
    pub fn new(now: Timestamp) -> Self {
        Self {
            started_at: now,
            overlay: Overlay::default(),
        }
    }

    /// Shake and grow the overlay. Returns true once the scare is over; the
    /// caller drops it then.
    pub fn step<R: Rng, P: Presentation>(
        &mut self,
        now: Timestamp,
        duration_ms: u64,
        shake: bool,
        rng: &mut R,
        host: &mut P,
    ) -> bool {
        if shake {
            self.overlay.left += rng.random_range(-SCARE_JITTER..SCARE_JITTER);
        }
        if self.overlay.width < SCARE_MAX_WIDTH {
            self.overlay.width *= SCARE_GROWTH;
            self.overlay.height *= SCARE_GROWTH;
        }

        if now.elapsed_since(self.started_at) > duration_ms {
            host.hide_screen(Screen::Jumpscare);
            host.set_message(DEATH_TEXT);
            host.show_screen(Screen::Death);
            log::info!("Jumpscare finished; death screen up");
            return true;
        }
        false
    }
}

/// The meal fading in on the altar after a successful offering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub alpha: f32,
    pub ending_shown: bool,
}

impl Offering {
    pub fn step<P: Presentation>(&mut self, host: &mut P) {
        if self.alpha < OFFERING_FAST_LIMIT {
            self.alpha += OFFERING_FAST_STEP;
        } else if self.alpha < 1.0 {
            self.alpha = (self.alpha + OFFERING_SLOW_STEP).min(1.0);
        } else if !self.ending_shown {
            self.ending_shown = true;
            host.set_message(ENDING_TEXT);
            host.show_screen(Screen::Ending);
            log::info!("Offering complete; ending shown");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
