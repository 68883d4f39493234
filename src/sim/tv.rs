//! The TV at the front of the hallway

use serde::{Deserialize, Serialize};

use crate::consts::TV_FADE_STEP;

/// Logically on/off; `alpha` only drives the picture fade
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tv {
    pub on: bool,
    pub alpha: f32,
}

impl Tv {
    pub fn switch_on(&mut self) {
        self.on = true;
    }

    pub fn switch_off(&mut self) {
        self.on = false;
    }

    pub fn step(&mut self) {
        if self.on {
            self.alpha = 1.0;
        } else if self.alpha > 0.0 {
            self.alpha = (self.alpha - TV_FADE_STEP).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
