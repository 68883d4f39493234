//! The arm that rises out of the toilet

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArmState {
    #[default]
    Hidden,
    Rising,
    Up,
    Lowering,
}

impl ArmState {
    /// Rising or fully up: flushing sends it back down
    pub fn is_flushable(self) -> bool {
        matches!(self, ArmState::Rising | ArmState::Up)
    }
}

/// Arm pose relative to the toilet bowl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToiletArm {
    pub state: ArmState,
    /// Height above the rim; 0 while hidden
    pub height: f32,
    /// Pitch, jittered while the arm is out
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Default for ToiletArm {
    fn default() -> Self {
        Self {
            state: ArmState::Hidden,
            height: 0.0,
            pitch: ARM_REST_PITCH,
            yaw: ARM_REST_YAW,
            roll: ARM_REST_ROLL,
        }
    }
}

impl ToiletArm {
    pub fn is_visible(&self) -> bool {
        self.state != ArmState::Hidden
    }

    /// Begin rising from wherever the arm currently is
    pub fn raise(&mut self) {
        self.state = ArmState::Rising;
    }

    /// Send the arm back down the drain
    pub fn flush(&mut self) {
        self.state = ArmState::Lowering;
    }

    fn jitter<R: Rng>(&mut self, rng: &mut R) {
        if rng.random_bool(0.5) {
            self.pitch -= ARM_JITTER;
        } else {
            self.pitch += ARM_JITTER;
        }
    }

    /// Advance one tick
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        match self.state {
            ArmState::Hidden => {}
            ArmState::Rising => {
                self.height = (self.height + ARM_RISE_STEP).min(ARM_MAX_HEIGHT);
                self.jitter(rng);
                if self.height >= ARM_MAX_HEIGHT {
                    self.state = ArmState::Up;
                }
            }
            ArmState::Up => self.jitter(rng),
            ArmState::Lowering => {
                self.height = (self.height - ARM_LOWER_STEP).max(0.0);
                if self.height <= 0.0 {
                    self.state = ArmState::Hidden;
                    self.pitch = ARM_REST_PITCH;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_hidden_is_inert() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut arm = ToiletArm::default();
        arm.step(&mut rng);
        assert_eq!(arm.state, ArmState::Hidden);
        assert_eq!(arm.height, 0.0);
    }

    #[test]
    fn test_reaches_up_on_threshold_tick() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut arm = ToiletArm::default();
        arm.raise();
        arm.height = ARM_MAX_HEIGHT - 2.0 * ARM_RISE_STEP;

        arm.step(&mut rng);
        assert_eq!(arm.state, ArmState::Rising);
        assert_eq!(arm.height, ARM_MAX_HEIGHT - ARM_RISE_STEP);

        // The tick that lands exactly on the threshold flips the state
        arm.step(&mut rng);
        assert_eq!(arm.height, ARM_MAX_HEIGHT);
        assert_eq!(arm.state, ArmState::Up);
    }

    #[test]
    fn test_full_rise_tick_count() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut arm = ToiletArm::default();
        arm.raise();
        let mut ticks = 0;
        while arm.state == ArmState::Rising {
            arm.step(&mut rng);
            ticks += 1;
        }
        assert_eq!(ticks, (ARM_MAX_HEIGHT / ARM_RISE_STEP) as u32);
    }

    #[test]
    fn test_up_only_jitters() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut arm = ToiletArm {
            state: ArmState::Up,
            height: ARM_MAX_HEIGHT,
            ..Default::default()
        };
        arm.step(&mut rng);
        assert!((arm.pitch - ARM_REST_PITCH).abs() > ARM_JITTER / 2.0);
        for _ in 0..500 {
            arm.step(&mut rng);
        }
        assert_eq!(arm.state, ArmState::Up);
        assert_eq!(arm.height, ARM_MAX_HEIGHT);
    }

    #[test]
    fn test_lowering_hides_and_restores_pose() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut arm = ToiletArm {
            state: ArmState::Up,
            height: 5.0,
            pitch: 0.3,
            ..Default::default()
        };
        arm.flush();
        arm.step(&mut rng);
        assert_eq!(arm.state, ArmState::Lowering);
        arm.step(&mut rng);
        assert_eq!(arm.height, 1.0);
        arm.step(&mut rng);
        assert_eq!(arm.height, 0.0);
        assert_eq!(arm.state, ArmState::Hidden);
        assert_eq!(arm.pitch, ARM_REST_PITCH);
    }
}
