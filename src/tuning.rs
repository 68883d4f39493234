//! Data-driven game balance
//!
//! Every timing and reach value the simulation reads lives here so a build can
//! ship a different balance without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("vary_delay_ms must be at least 1 so the delay draw has a range")]
    EmptyDelayRange,
    #[error("min_delay_ms + vary_delay_ms overflows")]
    DelayOverflow,
}

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Minimum delay between attacks (ms)
    pub min_delay_ms: u64,
    /// Spread added to the minimum delay; the draw is `[min, min + vary)`
    pub vary_delay_ms: u64,
    /// Time an attack may stay unresolved before the jumpscare
    pub timeout_ms: u64,
    /// Attack timer is armed this far in the future when a run starts
    pub first_attack_grace_ms: u64,
    /// Delay before the first attack, counted from the end of the grace
    pub first_attack_delay_ms: u64,
    /// Jumpscare overlay duration
    pub jumpscare_ms: u64,
    /// Walking speed per tick (strafing uses half)
    pub player_speed: f32,
    /// Downward acceleration per tick
    pub gravity_step: f32,
    /// Terminal fall speed per tick
    pub max_fall_speed: f32,
    pub door_reach: f32,
    pub toilet_reach: f32,
    pub tv_reach: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_delay_ms: MIN_DELAY_MS,
            vary_delay_ms: VARY_DELAY_MS,
            timeout_ms: TIMEOUT_MS,
            first_attack_grace_ms: FIRST_ATTACK_GRACE_MS,
            first_attack_delay_ms: FIRST_ATTACK_DELAY_MS,
            jumpscare_ms: JUMPSCARE_MS,
            player_speed: PLAYER_SPEED,
            gravity_step: GRAVITY_STEP,
            max_fall_speed: MAX_FALL_SPEED,
            door_reach: DOOR_REACH,
            toilet_reach: TOILET_REACH,
            tv_reach: TV_REACH,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: delay {}+{}ms, timeout {}ms",
            tuning.min_delay_ms,
            tuning.vary_delay_ms,
            tuning.timeout_ms
        );
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.vary_delay_ms == 0 {
            return Err(TuningError::EmptyDelayRange);
        }
        if self.min_delay_ms.checked_add(self.vary_delay_ms).is_none() {
            return Err(TuningError::DelayOverflow);
        }
        let positive_ms = [
            ("min_delay_ms", self.min_delay_ms),
            ("timeout_ms", self.timeout_ms),
            ("jumpscare_ms", self.jumpscare_ms),
        ];
        for (field, value) in positive_ms {
            if value == 0 {
                return Err(TuningError::NotPositive { field });
            }
        }
        let positive_f32 = [
            ("player_speed", self.player_speed),
            ("gravity_step", self.gravity_step),
            ("max_fall_speed", self.max_fall_speed),
            ("door_reach", self.door_reach),
            ("toilet_reach", self.toilet_reach),
            ("tv_reach", self.tv_reach),
        ];
        for (field, value) in positive_f32 {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field });
            }
        }
        Ok(())
    }

    /// Exclusive upper bound of the attack delay draw
    pub fn max_delay_ms(&self) -> u64 {
        self.min_delay_ms.saturating_add(self.vary_delay_ms)
    }
}
