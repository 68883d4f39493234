//! Clicking on things in the hallway
//!
//! The host reports the name of whatever object the pointer ray hit. Names
//! map onto a small set of targets; anything else is scenery.

use serde::{Deserialize, Serialize};

use super::hazard::HazardKind;
use super::host::{AudioCue, Cue, Presentation};
use super::state::{GameMode, SessionState};
use crate::{distance_xz, in_altar_zone};
use crate::consts::*;

/// The three ingredients of the offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Wok,
    Chicken,
    Mushrooms,
}

impl Item {
    pub const ALL: [Item; 3] = [Item::Wok, Item::Chicken, Item::Mushrooms];

    /// Scene object removed when the item is taken
    pub fn object_name(self) -> &'static str {
        match self {
            Item::Wok => "wok",
            Item::Chicken => "chicken",
            Item::Mushrooms => "mushrooms",
        }
    }

    fn pickup_message(self) -> &'static str {
        match self {
            Item::Wok => "You got the wok.",
            Item::Chicken => "You got the chicken.",
            Item::Mushrooms => "You got the mushrooms.",
        }
    }
}

/// Something the player can click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickTarget {
    Door(usize),
    ToiletLever,
    Tv,
    Chest,
    Milk,
    Item(Item),
    Key,
    Altar,
}

/// Mesh names exported with the models, alongside the plain object ids
const ALIASES: &[(&str, PickTarget)] = &[
    ("toilet_lever", PickTarget::ToiletLever),
    ("pCylinder5_lambert2_0", PickTarget::ToiletLever),
    ("pCube24_lambert2_0", PickTarget::ToiletLever),
    ("tv", PickTarget::Tv),
    ("stream", PickTarget::Tv),
    ("led_tv_phong1_0", PickTarget::Tv),
    ("chest", PickTarget::Chest),
    ("ChestLowPoly_ChestFull_0", PickTarget::Chest),
    ("Object_10", PickTarget::Chest),
    ("wok", PickTarget::Item(Item::Wok)),
    ("Handle.001_Material_0", PickTarget::Item(Item::Wok)),
    ("Wok.001_Material_0", PickTarget::Item(Item::Wok)),
    ("chicken", PickTarget::Item(Item::Chicken)),
    ("chickenobj", PickTarget::Item(Item::Chicken)),
    ("mushrooms", PickTarget::Item(Item::Mushrooms)),
    ("mushrooms_lambert1_0", PickTarget::Item(Item::Mushrooms)),
    ("mushrooms_lambert2_0", PickTarget::Item(Item::Mushrooms)),
    ("key", PickTarget::Key),
    ("defaultMaterial", PickTarget::Key),
    ("altar", PickTarget::Altar),
    ("Altar_Altar_Material_0", PickTarget::Altar),
];

impl PickTarget {
    pub fn from_object_name(name: &str) -> Option<Self> {
        // Doors are the only objects named with one or two digits
        if (1..=2).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_digit()) {
            return name.parse().ok().map(PickTarget::Door);
        }
        if name.starts_with("milk") {
            return Some(PickTarget::Milk);
        }
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, target)| *target)
    }
}

pub const CHEST_UNLOCKED: &str = "Unlocked the chest.";
pub const CHEST_LOCKED: &str = "You need the key to unlock the chest.";
pub const KEY_TAKEN: &str = "You got the key.";
pub const NOTHING_TO_OFFER: &str = "You have nothing to sacrifice to Nyatasha Nyanners.";
pub const STEP_UP_TO_ALTAR: &str = "Stand before the altar to make your offering.";

pub const TIP_CLOSE_DOOR: &str = "Click on a nearby open door to close it.";
pub const TIP_FLUSH: &str = "Use the lever to flush the toilet.";
pub const TIP_TV: &str = "Click the TV to turn it off.";
pub const TIP_ALTAR: &str = "Click the altar to sacrifice your Moo Goo Gai Pan.";

/// Apply a click on the object called `name`.
///
/// Returns the target that was acted on, or `None` if the click changed
/// nothing (out of reach, already resolved, not Playing, scenery).
pub fn apply_pick<H: AudioCue + Presentation>(
    state: &mut SessionState,
    name: &str,
    host: &mut H,
) -> Option<PickTarget> {
    if state.mode != GameMode::Playing {
        return None;
    }
    let Some(target) = PickTarget::from_object_name(name) else {
        log::trace!("Pick on scenery '{}'", name);
        return None;
    };
    let player = state.player.position;

    let acted = match target {
        PickTarget::Door(index) => {
            let in_reach = state
                .hazards
                .doors
                .get(index)
                .map(|d| distance_xz(player, (d.position.x, d.position.z)) < state.tuning.door_reach)
                .unwrap_or(false);
            if in_reach && state.hazards.close_door(index) {
                host.play(Cue::DoorClose);
                log::debug!("Door {} closed by player", index);
                true
            } else {
                false
            }
        }
        PickTarget::ToiletLever => {
            if distance_xz(player, TOILET_XZ) < state.tuning.toilet_reach && state.hazards.flush() {
                host.play(Cue::Flush);
                log::debug!("Toilet flushed");
                true
            } else {
                false
            }
        }
        PickTarget::Tv => {
            if distance_xz(player, TV_XZ) < state.tuning.tv_reach && state.hazards.turn_off_tv() {
                log::debug!("TV switched off");
                true
            } else {
                false
            }
        }
        PickTarget::Chest => {
            if state.inventory.chest_open {
                false
            } else if state.inventory.has_key {
                state.inventory.chest_open = true;
                host.set_message(CHEST_UNLOCKED);
                true
            } else {
                host.set_message(CHEST_LOCKED);
                true
            }
        }
        PickTarget::Milk => {
            if state.inventory.hide(name) {
                host.set_object_visible(name, false);
                true
            } else {
                false
            }
        }
        PickTarget::Item(item) => {
            if state.inventory.collect(item) {
                state.inventory.hide(item.object_name());
                host.set_object_visible(item.object_name(), false);
                host.set_message(item.pickup_message());
                host.play(Cue::Collect);
                log::info!("Collected {:?} ({}/{})", item, state.inventory.items_found(), ITEMS_REQUIRED);
                true
            } else {
                false
            }
        }
        PickTarget::Key => {
            if state.inventory.has_key {
                false
            } else {
                state.inventory.has_key = true;
                state.inventory.hide("key");
                host.set_object_visible("key", false);
                host.set_message(KEY_TAKEN);
                host.play(Cue::Collect);
                true
            }
        }
        PickTarget::Altar => {
            if !state.inventory.has_all_items() {
                host.set_message(NOTHING_TO_OFFER);
            } else if !in_altar_zone(player) {
                host.set_message(STEP_UP_TO_ALTAR);
            } else {
                state.mode = GameMode::Escaped;
                host.play(Cue::Devotion);
                log::info!("Offering accepted; escaped");
            }
            true
        }
    };

    acted.then_some(target)
}

/// Hint for whatever the player is standing near, highest priority first
pub fn contextual_tip(state: &SessionState) -> Option<&'static str> {
    let player = state.player.position;
    let hazards = &state.hazards;

    let near_open_door = hazards
        .active_door()
        .and_then(|i| hazards.doors.get(i))
        .map(|d| distance_xz(player, (d.position.x, d.position.z)) < DOOR_REACH)
        .unwrap_or(false);

    if near_open_door {
        Some(TIP_CLOSE_DOOR)
    } else if hazards.arm.state.is_flushable() && distance_xz(player, TOILET_XZ) < TOILET_TIP_RADIUS {
        Some(TIP_FLUSH)
    } else if hazards.is_busy(HazardKind::Tv) && distance_xz(player, TV_XZ) < TV_TIP_RADIUS {
        Some(TIP_TV)
    } else if state.inventory.has_all_items() && in_altar_zone(player) {
        Some(TIP_ALTAR)
    } else {
        None
    }
}
