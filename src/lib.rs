//! Haunted Hallway - a first-person browser horror game
//!
//! Core modules:
//! - `sim`: Deterministic game core (attack scheduling, hazards, motion, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `platform`: Browser host bridge (wasm only)
//! - `audio`: Cue playback through the browser (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Number of doors along the hallway
    pub const NUM_DOORS: usize = 11;
    /// Doors `0..LEFT_DOOR_COUNT` are on the left wall, the rest on the right
    pub const LEFT_DOOR_COUNT: usize = 6;

    /// Minimum delay between attacks (ms)
    pub const MIN_DELAY_MS: u64 = 14_000;
    /// Random spread added on top of the minimum delay (ms)
    pub const VARY_DELAY_MS: u64 = 8_000;
    /// Time from attack start until the player dies (ms)
    pub const TIMEOUT_MS: u64 = 16_000;
    /// The first attack timer starts this far in the future when a run begins
    pub const FIRST_ATTACK_GRACE_MS: u64 = 5_000;
    /// Delay used for the very first attack of a run
    pub const FIRST_ATTACK_DELAY_MS: u64 = 5_000;
    /// How long the jumpscare overlay stays up before the death screen
    pub const JUMPSCARE_MS: u64 = 1_400;

    /// Door swing
    pub const DOOR_OPEN_ANGLE: f32 = PI * 0.75;
    pub const DOOR_OPEN_STEP: f32 = PI / 100.0;
    pub const LEFT_DOOR_CLOSE_STEP: f32 = PI / 25.0;
    pub const RIGHT_DOOR_CLOSE_STEP: f32 = PI / 50.0;
    /// Door hinge x for door `i` on either side is `DOOR_X0 - i * DOOR_SPACING`
    pub const DOOR_X0: f32 = 1896.0;
    pub const DOOR_SPACING: f32 = 700.0;
    pub const DOOR_Z: f32 = 320.0;
    pub const DOOR_WIDTH: f32 = 153.0;
    pub const DOOR_HEIGHT: f32 = 340.0;
    pub const DOOR_THICKNESS: f32 = 11.0;

    /// Door monster
    pub const MONSTER_SPAWN_Z: f32 = 700.0;
    pub const MONSTER_STOP_Z: f32 = 380.0;
    pub const MONSTER_Y: f32 = 185.0;
    pub const MONSTER_HIDDEN_Z: f32 = 2000.0;

    /// Toilet arm
    pub const ARM_MAX_HEIGHT: f32 = 70.0;
    pub const ARM_RISE_STEP: f32 = 1.0;
    pub const ARM_LOWER_STEP: f32 = 2.0;
    pub const ARM_JITTER: f32 = 0.01;
    pub const ARM_REST_PITCH: f32 = -PI / 3.0;
    pub const ARM_REST_YAW: f32 = PI / 1.5;
    pub const ARM_REST_ROLL: f32 = -PI / 4.0;

    /// TV fade-out per tick once switched off
    pub const TV_FADE_STEP: f32 = 0.05;

    /// Interaction anchors on the floor plane (x, z)
    pub const TOILET_XZ: (f32, f32) = (1950.0, 1500.0);
    pub const TV_XZ: (f32, f32) = (-2000.0, 0.0);
    /// Altar zone: |z| below this and x beyond `ALTAR_MIN_X`
    pub const ALTAR_HALF_WIDTH: f32 = 100.0;
    pub const ALTAR_MIN_X: f32 = 1585.0;

    /// Interaction reach
    pub const DOOR_REACH: f32 = 800.0;
    pub const TOILET_REACH: f32 = 500.0;
    pub const TV_REACH: f32 = 500.0;
    /// Tip radii (slightly wider than reach so the hint shows on approach)
    pub const TOILET_TIP_RADIUS: f32 = 600.0;
    pub const TV_TIP_RADIUS: f32 = 700.0;

    /// Player
    pub const PLAYER_START: (f32, f32, f32) = (0.0, 300.0, 0.0);
    pub const PLAYER_SPEED: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 270.0;
    pub const PLAYER_DIAMETER: f32 = 10.0;
    /// Collider is this much shorter than the player's eye height
    pub const COLLIDER_HEADROOM: f32 = 50.0;
    /// Collider centre sits `PLAYER_HEIGHT / 2 - COLLIDER_LIFT` below the eye
    pub const COLLIDER_LIFT: f32 = 10.0;
    pub const GRAVITY_STEP: f32 = 0.5;
    pub const MAX_FALL_SPEED: f32 = 5.0;
    /// How far below the collider the ground probe looks
    pub const GROUND_PROBE: f32 = 10.0;

    /// Items needed for the offering
    pub const ITEMS_REQUIRED: u8 = 3;

    /// Ending fade
    pub const OFFERING_FAST_LIMIT: f32 = 0.8;
    pub const OFFERING_FAST_STEP: f32 = 0.01;
    pub const OFFERING_SLOW_STEP: f32 = 0.001;

    /// Jumpscare overlay
    pub const SCARE_START_WIDTH: f32 = 800.0;
    pub const SCARE_START_HEIGHT: f32 = 1600.0;
    pub const SCARE_START_TOP: f32 = 450.0;
    pub const SCARE_MAX_WIDTH: f32 = 900.0;
    pub const SCARE_GROWTH: f32 = 1.01;
    pub const SCARE_JITTER: f32 = 20.0;
}

/// Distance between two points on the floor plane
#[inline]
pub fn distance_xz(a: Vec3, b: (f32, f32)) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.0, b.1))
}

/// True when the point lies inside the altar zone at the end of the hallway
#[inline]
pub fn in_altar_zone(pos: Vec3) -> bool {
    pos.z.abs() < consts::ALTAR_HALF_WIDTH && pos.x > consts::ALTAR_MIN_X
}
