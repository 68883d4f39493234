//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard codes to movement directions
//! - The exported wasm API the page drives every frame
//! - DOM presentation and audio (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::tick::{Direction, TickInput};

/// Movement direction bound to a `KeyboardEvent.code`
pub fn direction_for_key(code: &str) -> Option<Direction> {
    match code {
        "KeyW" | "ArrowUp" => Some(Direction::Forward),
        "KeyS" | "ArrowDown" => Some(Direction::Back),
        "KeyA" | "ArrowLeft" => Some(Direction::Left),
        "KeyD" | "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Update the held-key flags for a key press or release.
///
/// Returns false for keys that are not bound.
pub fn apply_key(input: &mut TickInput, code: &str, down: bool) -> bool {
    let Some(dir) = direction_for_key(code) else {
        return false;
    };
    let flag = match dir {
        Direction::Forward => &mut input.forward,
        Direction::Back => &mut input.back,
        Direction::Left => &mut input.left,
        Direction::Right => &mut input.right,
    };
    *flag = down;
    true
}
