//! Player movement and collision
//!
//! Each axis of intent is tried on its own: strafe first, then walk. A move
//! that would overlap an obstacle is dropped, not slid along. Gravity runs
//! every tick against a probe just below the collider.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::tick::{Direction, TickInput};
use super::world::World;
use crate::consts::*;
use crate::tuning::Tuning;

/// The player's body; the camera copies `position` every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position
    pub position: Vec3,
    pub vel_y: f32,
    pub speed: f32,
    /// Eye height above the feet
    pub height: f32,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y, z) = PLAYER_START;
        Self {
            position: Vec3::new(x, y, z),
            vel_y: 0.0,
            speed: tuning.player_speed,
            height: PLAYER_HEIGHT,
        }
    }

    /// Offset from the eye to the collider centre
    fn collider_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.height / 2.0 - COLLIDER_LIFT, 0.0)
    }

    /// Centre of the collision volume
    pub fn collider_center(&self) -> Vec3 {
        self.position - self.collider_offset()
    }

    /// Horizontal displacement for one held direction at camera `yaw`
    fn displacement(&self, dir: Direction, yaw: f32) -> Vec3 {
        let (step, heading) = match dir {
            Direction::Forward => (self.speed, yaw),
            Direction::Back => (-self.speed, yaw),
            // Strafing runs at half speed, a quarter turn off the heading
            Direction::Right => (-self.speed / 2.0, yaw - FRAC_PI_2),
            Direction::Left => (-self.speed / 2.0, yaw + FRAC_PI_2),
        };
        Vec3::new(step * heading.sin(), 0.0, step * heading.cos())
    }

    /// Try to move by `delta`; returns whether the move was committed
    fn try_move<W: World>(&mut self, delta: Vec3, world: &W) -> bool {
        let candidate = self.collider_center() + delta;
        if world.would_collide(candidate) {
            return false;
        }
        self.position += delta;
        true
    }

    /// Advance one tick of walking and falling
    pub fn step<W: World>(&mut self, input: &TickInput, world: &W, tuning: &Tuning) {
        // Right wins over left, back wins over forward
        let strafe = if input.pressed(Direction::Right) {
            Some(Direction::Right)
        } else if input.pressed(Direction::Left) {
            Some(Direction::Left)
        } else {
            None
        };
        let walk = if input.pressed(Direction::Back) {
            Some(Direction::Back)
        } else if input.pressed(Direction::Forward) {
            Some(Direction::Forward)
        } else {
            None
        };

        for dir in [strafe, walk].into_iter().flatten() {
            let delta = self.displacement(dir, input.yaw);
            if !self.try_move(delta, world) {
                log::trace!("{:?} blocked at {:?}", dir, self.position);
            }
        }

        let probe = self.collider_center() - Vec3::Y * GROUND_PROBE;
        if world.would_collide(probe) {
            self.vel_y = 0.0;
        } else if self.vel_y > -tuning.max_fall_speed {
            self.vel_y = (self.vel_y - tuning.gravity_step).max(-tuning.max_fall_speed);
        }
        self.position.y += self.vel_y;
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }
}
