//! Hallway doors and the monster that peeks through them
//!
//! A door swings `Closed -> Opening -> Open -> Closing -> Closed`. Left-hand
//! doors rotate negatively and close fast; right-hand doors rotate positively
//! and close at half that speed.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layout::door_position;
use crate::consts::*;

/// Swing state of a single door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl DoorState {
    /// Open or still swinging open: the player can slam it
    pub fn is_closable(self) -> bool {
        matches!(self, DoorState::Opening | DoorState::Open)
    }
}

/// Which wall a door is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub fn of(index: usize) -> Self {
        if index < LEFT_DOOR_COUNT {
            DoorSide::Left
        } else {
            DoorSide::Right
        }
    }

    /// Sign of the opening rotation
    fn sign(self) -> f32 {
        match self {
            DoorSide::Left => -1.0,
            DoorSide::Right => 1.0,
        }
    }

    fn close_step(self) -> f32 {
        match self {
            DoorSide::Left => LEFT_DOOR_CLOSE_STEP,
            DoorSide::Right => RIGHT_DOOR_CLOSE_STEP,
        }
    }
}

/// One physical door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorRecord {
    pub index: usize,
    pub side: DoorSide,
    pub state: DoorState,
    /// Rotation about the hinge (radians, 0 = shut)
    pub angle: f32,
    pub position: Vec3,
}

impl DoorRecord {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            side: DoorSide::of(index),
            state: DoorState::Closed,
            angle: 0.0,
            position: door_position(index),
        }
    }

    /// Rotation magnitude in the door's opening direction
    fn swing(&self) -> f32 {
        self.angle * self.side.sign()
    }

    /// Advance one tick of animation. Returns true if the door just finished closing.
    pub fn step(&mut self) -> bool {
        match self.state {
            DoorState::Opening => {
                if self.swing() < DOOR_OPEN_ANGLE {
                    self.angle += DOOR_OPEN_STEP * self.side.sign();
                } else {
                    self.state = DoorState::Open;
                }
                false
            }
            DoorState::Closing => {
                if self.swing() > 0.0 {
                    self.angle -= self.side.close_step() * self.side.sign();
                    false
                } else {
                    self.angle = 0.0;
                    self.state = DoorState::Closed;
                    true
                }
            }
            DoorState::Closed | DoorState::Open => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = DoorState::Closed;
        self.angle = 0.0;
    }
}

/// All doors of the hallway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doors {
    doors: Vec<DoorRecord>,
}

impl Default for Doors {
    fn default() -> Self {
        Self {
            doors: (0..NUM_DOORS).map(DoorRecord::new).collect(),
        }
    }
}

impl Doors {
    pub fn get(&self, index: usize) -> Option<&DoorRecord> {
        self.doors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DoorRecord> {
        self.doors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoorRecord> {
        self.doors.iter()
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn all_closed(&self) -> bool {
        self.doors.iter().all(|d| d.state == DoorState::Closed)
    }

    /// First `Closed` door at or after `start`, wrapping around.
    ///
    /// Visits every door at most once, so a hallway with no closed door yields
    /// `None` instead of spinning.
    pub fn next_closed_from(&self, start: usize) -> Option<usize> {
        let n = self.doors.len();
        if n == 0 {
            return None;
        }
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&i| self.doors[i].state == DoorState::Closed)
    }

    /// Animate every swinging door. Returns the indices that finished closing.
    pub fn step(&mut self) -> Vec<usize> {
        self.doors
            .iter_mut()
            .filter_map(|door| door.step().then_some(door.index))
            .collect()
    }

    pub fn reset(&mut self) {
        for door in &mut self.doors {
            door.reset();
        }
    }
}

/// The figure that steps out of an opened door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorMonster {
    /// Door it came through, while active
    pub door: Option<usize>,
    pub position: Vec3,
    /// Yaw so the monster faces the hallway
    pub yaw: f32,
}

impl Default for DoorMonster {
    fn default() -> Self {
        Self {
            door: None,
            position: Vec3::new(0.0, MONSTER_Y, MONSTER_HIDDEN_Z),
            yaw: 0.0,
        }
    }
}

impl DoorMonster {
    pub fn is_active(&self) -> bool {
        self.door.is_some()
    }

    /// Place the monster in the room behind `door`
    pub fn emerge(&mut self, door: &DoorRecord) {
        let (z, yaw) = match door.side {
            DoorSide::Left => (-MONSTER_SPAWN_Z, std::f32::consts::PI),
            DoorSide::Right => (MONSTER_SPAWN_Z, 0.0),
        };
        self.position = Vec3::new(door.position.x, MONSTER_Y, z);
        self.yaw = yaw;
        self.door = Some(door.index);
        log::debug!("Door monster emerging behind door {}", door.index);
    }

    /// Creep toward the doorway and sway side to side
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        if !self.is_active() {
            return;
        }
        if self.position.z.abs() > MONSTER_STOP_Z {
            // Step toward z = 0
            self.position.z -= self.position.z.signum();
        }
        if rng.random_bool(0.5) {
            self.position.x -= 1.0;
        } else {
            self.position.x += 1.0;
        }
    }

    /// Leave the monster where it stands; it no longer tracks a door
    pub fn dismiss(&mut self) {
        self.door = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
