//! The three hazards and the single active-hazard slot
//!
//! Doors, the toilet arm and the TV animate independently, but only one of
//! them can be *timed* at once: starting a hazard fills `active`, resolving it
//! empties it, and the resolver only ever looks at that slot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arm::ToiletArm;
use super::clock::Timestamp;
use super::door::{DoorMonster, DoorState, Doors};
use super::tv::Tv;

/// Kind of attack the scheduler can launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Door,
    Tv,
    Toilet,
}

impl HazardKind {
    /// Draw order used by the scheduler
    pub const ALL: [HazardKind; 3] = [HazardKind::Door, HazardKind::Tv, HazardKind::Toilet];
}

/// A hazard whose timeout is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveHazard {
    Door { door_index: usize, since: Timestamp },
    Tv { since: Timestamp },
    Toilet { since: Timestamp },
}

impl ActiveHazard {
    pub fn kind(&self) -> HazardKind {
        match self {
            ActiveHazard::Door { .. } => HazardKind::Door,
            ActiveHazard::Tv { .. } => HazardKind::Tv,
            ActiveHazard::Toilet { .. } => HazardKind::Toilet,
        }
    }

    pub fn since(&self) -> Timestamp {
        match *self {
            ActiveHazard::Door { since, .. }
            | ActiveHazard::Tv { since }
            | ActiveHazard::Toilet { since } => since,
        }
    }

    /// Strictly more than `timeout_ms` has passed since the hazard started
    pub fn timed_out(&self, now: Timestamp, timeout_ms: u64) -> bool {
        now.elapsed_since(self.since()) > timeout_ms
    }
}

/// Every hazard machine plus the active slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hazards {
    pub doors: Doors,
    pub monster: DoorMonster,
    pub arm: ToiletArm,
    pub tv: Tv,
    active: Option<ActiveHazard>,
}

impl Hazards {
    pub fn active(&self) -> Option<&ActiveHazard> {
        self.active.as_ref()
    }

    /// Door index of the running door attack, if any
    pub fn active_door(&self) -> Option<usize> {
        match self.active {
            Some(ActiveHazard::Door { door_index, .. }) => Some(door_index),
            _ => None,
        }
    }

    /// Whether the machine for `kind` is still doing something, timed or not
    pub fn is_busy(&self, kind: HazardKind) -> bool {
        match kind {
            HazardKind::Door => !self.doors.all_closed(),
            HazardKind::Tv => self.tv.on,
            HazardKind::Toilet => self.arm.is_visible(),
        }
    }

    /// A new attack of `kind` may begin
    pub fn can_start(&self, kind: HazardKind) -> bool {
        self.active.is_none() && !self.is_busy(kind)
    }

    /// Swing open the first closed door at or after `preferred`.
    ///
    /// Returns the opened door, or `None` if the start guard refused or no door
    /// was closed.
    pub fn start_door(&mut self, preferred: usize, now: Timestamp) -> Option<usize> {
        if !self.can_start(HazardKind::Door) {
            return None;
        }
        let Some(index) = self.doors.next_closed_from(preferred) else {
            log::warn!("No closed door to open; skipping door attack");
            return None;
        };
        let door = self.doors.get_mut(index)?;
        debug_assert_eq!(door.state, DoorState::Closed);
        door.state = DoorState::Opening;
        self.active = Some(ActiveHazard::Door {
            door_index: index,
            since: now,
        });
        Some(index)
    }

    pub fn start_tv(&mut self, now: Timestamp) -> bool {
        if !self.can_start(HazardKind::Tv) {
            return false;
        }
        self.tv.switch_on();
        self.active = Some(ActiveHazard::Tv { since: now });
        true
    }

    pub fn start_toilet(&mut self, now: Timestamp) -> bool {
        if !self.can_start(HazardKind::Toilet) {
            return false;
        }
        self.arm.raise();
        self.active = Some(ActiveHazard::Toilet { since: now });
        true
    }

    /// Slam door `index` if it is open or opening
    pub fn close_door(&mut self, index: usize) -> bool {
        let Some(door) = self.doors.get_mut(index) else {
            log::warn!("Close requested for unknown door {}", index);
            return false;
        };
        if !door.state.is_closable() {
            return false;
        }
        door.state = DoorState::Closing;
        if self.active_door() == Some(index) {
            self.active = None;
        }
        true
    }

    /// Flush the arm back down if it is out
    pub fn flush(&mut self) -> bool {
        if !self.arm.state.is_flushable() {
            return false;
        }
        self.arm.flush();
        if matches!(self.active, Some(ActiveHazard::Toilet { .. })) {
            self.active = None;
        }
        true
    }

    pub fn turn_off_tv(&mut self) -> bool {
        if !self.tv.on {
            return false;
        }
        self.tv.switch_off();
        if matches!(self.active, Some(ActiveHazard::Tv { .. })) {
            self.active = None;
        }
        true
    }

    /// Animate all hazards for one tick.
    ///
    /// `arm_loaded` is false while the arm model is missing from the scene;
    /// the arm then holds still for this tick.
    pub fn step<R: Rng>(&mut self, rng: &mut R, arm_loaded: bool) {
        for closed in self.doors.step() {
            if self.monster.door == Some(closed) {
                self.monster.dismiss();
            }
        }

        if let Some(index) = self.active_door() {
            if !self.monster.is_active() {
                if let Some(door) = self.doors.get(index) {
                    self.monster.emerge(door);
                }
            }
        }
        self.monster.step(rng);

        if arm_loaded {
            self.arm.step(rng);
        } else {
            log::trace!("Arm not loaded; skipping arm step");
        }

        self.tv.step();
    }

    pub fn reset(&mut self) {
        self.doors.reset();
        self.monster.reset();
        self.arm.reset();
        self.tv.reset();
        self.active = None;
    }
}
