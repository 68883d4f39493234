//! Per-frame simulation tick
//!
//! The host calls `tick` once per rendered frame with the current wall-clock
//! time. Every step runs synchronously in a fixed order; timers are polled,
//! never awaited.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::host::{AudioCue, Cue, Presentation, Screen};
use super::interact::{apply_pick, contextual_tip};
use super::layout::ARM_OBJECT;
use super::outcome::{Overlay, resolve_timeouts};
use super::state::{GameMode, SessionState};
use super::world::World;

pub const START_PROMPT: &str = "Click anywhere to start.";

/// A held movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Camera yaw in radians; 0 looks down +z
    pub yaw: f32,
    /// Name of the object under the pointer when it was clicked
    pub pick: Option<String>,
    /// Click on a full-screen panel (start or death screen)
    pub screen_click: bool,
}

impl TickInput {
    pub fn pressed(&self, dir: Direction) -> bool {
        match dir {
            Direction::Forward => self.forward,
            Direction::Back => self.back,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Advance the session by one frame
pub fn tick<W: World, H: AudioCue + Presentation>(
    state: &mut SessionState,
    input: &TickInput,
    now: Timestamp,
    world: &W,
    host: &mut H,
) {
    match state.mode {
        GameMode::Loading => {
            if state.manifest.is_complete() {
                enter_start(state, host);
            } else {
                host.show_screen(Screen::Loading);
                host.set_message(&state.manifest.status_line());
            }
        }
        GameMode::Start => {
            if input.screen_click {
                host.hide_screen(Screen::Start);
                host.set_message("");
                state.scheduler.rearm(now, &state.tuning);
                state.mode = GameMode::Playing;
                host.play(Cue::Collect);
                log::info!("Run started at {}ms", now.as_millis());
            }
        }
        GameMode::Playing => tick_playing(state, input, now, world, host),
        GameMode::Died => {
            step_jumpscare(state, now, host);
            if input.screen_click && state.jumpscare.is_none() {
                restart(state, now, host);
            }
        }
        GameMode::Escaped => state.offering.step(host),
    }
}

fn enter_start<H: AudioCue + Presentation>(state: &mut SessionState, host: &mut H) {
    host.hide_screen(Screen::Loading);
    host.show_screen(Screen::Start);
    host.set_message(START_PROMPT);
    host.play(Cue::Start);
    state.mode = GameMode::Start;
    log::info!("All {} assets loaded", state.manifest.total());
}

fn tick_playing<W: World, H: AudioCue + Presentation>(
    state: &mut SessionState,
    input: &TickInput,
    now: Timestamp,
    world: &W,
    host: &mut H,
) {
    if let Some(name) = input.pick.as_deref() {
        apply_pick(state, name, host);
        if state.mode != GameMode::Playing {
            // The offering ended the run
            return;
        }
    }

    state.scheduler.tick(
        now,
        &mut state.hazards,
        &state.tuning,
        &mut state.rng,
        host,
    );

    let arm_loaded = world.object_position(ARM_OBJECT).is_some();
    state.hazards.step(&mut state.rng, arm_loaded);

    if let Some(tip) = contextual_tip(state) {
        host.set_message(tip);
    }

    resolve_timeouts(state, now, host);
    step_jumpscare(state, now, host);

    state.player.step(input, world, &state.tuning);
}

fn step_jumpscare<H: Presentation>(state: &mut SessionState, now: Timestamp, host: &mut H) {
    let Some(scare) = state.jumpscare.as_mut() else {
        return;
    };
    let shake = !state.settings.reduced_motion;
    if scare.step(now, state.tuning.jumpscare_ms, shake, &mut state.rng, host) {
        state.jumpscare = None;
    }
}

/// Replay from the death screen
fn restart<H: Presentation>(state: &mut SessionState, now: Timestamp, host: &mut H) {
    for name in state.inventory.hidden() {
        host.set_object_visible(name, true);
    }
    host.hide_screen(Screen::Death);
    host.set_message("");
    state.reset(now);
}

/// Read-only view of everything the host draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub camera: Vec3,
    pub door_angles: Vec<f32>,
    pub arm_visible: bool,
    pub arm_height: f32,
    /// Pitch, yaw and roll of the arm
    pub arm_rotation: Vec3,
    pub tv_alpha: f32,
    pub monster_visible: bool,
    pub monster_position: Vec3,
    pub monster_yaw: f32,
    pub jumpscare: Option<Overlay>,
    pub offering_alpha: f32,
    pub items_found: u8,
    pub has_key: bool,
    pub chest_open: bool,
    pub loading_percent: u32,
}

impl GameSnapshot {
    pub fn capture(state: &SessionState) -> Self {
        let hazards = &state.hazards;
        let arm = &hazards.arm;
        Self {
            mode: state.mode,
            camera: state.player.position,
            door_angles: hazards.doors.iter().map(|d| d.angle).collect(),
            arm_visible: arm.is_visible(),
            arm_height: arm.height,
            arm_rotation: Vec3::new(arm.pitch, arm.yaw, arm.roll),
            tv_alpha: hazards.tv.alpha,
            monster_visible: hazards.monster.is_active(),
            monster_position: hazards.monster.position,
            monster_yaw: hazards.monster.yaw,
            jumpscare: state.jumpscare.map(|s| s.overlay),
            offering_alpha: state.offering.alpha,
            items_found: state.inventory.items_found(),
            has_key: state.inventory.has_key,
            chest_open: state.inventory.chest_open,
            loading_percent: state.manifest.progress_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::door::DoorState;
    use crate::sim::hazard::{ActiveHazard, HazardKind};
    use crate::sim::host::RecordingHost;
    use crate::sim::interact::Item;
    use crate::sim::layout::HallwayWorld;
    use crate::sim::loading::LoadManifest;
    use crate::sim::world::Aabb;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Frame interval used by the tests (about 60 fps)
    const FRAME_MS: u64 = 16;

    fn world_with_arm() -> HallwayWorld {
        let mut world = HallwayWorld::default();
        world.register_prop(
            ARM_OBJECT,
            Aabb::from_center_size(Vec3::new(1950.0, 40.0, 1500.0), Vec3::splat(20.0)),
            false,
        );
        world
    }

    /// Session already past loading and the start screen, started at `now`
    fn running(seed: u64, tuning: Tuning, now: Timestamp) -> SessionState {
        let mut state = SessionState::with_manifest(seed, tuning, LoadManifest::new(["hallway"]).unwrap());
        state.manifest.mark_loaded("hallway").unwrap();
        let world = HallwayWorld::default();
        let mut host = RecordingHost::new();
        tick(&mut state, &TickInput::default(), now, &world, &mut host);
        let click = TickInput {
            screen_click: true,
            ..Default::default()
        };
        tick(&mut state, &click, now, &world, &mut host);
        assert_eq!(state.mode, GameMode::Playing);
        state
    }

    #[test]
    fn test_loading_to_start_to_playing() {
        let mut state =
            SessionState::with_manifest(1, Tuning::default(), LoadManifest::new(["a", "b"]).unwrap());
        let world = HallwayWorld::default();
        let mut host = RecordingHost::new();
        let idle = TickInput::default();

        tick(&mut state, &idle, Timestamp(0), &world, &mut host);
        assert_eq!(host.message, "Loading 0% complete");
        assert!(host.is_showing(Screen::Loading));

        state.manifest.mark_loaded("a").unwrap();
        tick(&mut state, &idle, Timestamp(16), &world, &mut host);
        assert_eq!(host.message, "Loading 50% complete");

        state.manifest.mark_loaded("b").unwrap();
        tick(&mut state, &idle, Timestamp(32), &world, &mut host);
        assert_eq!(state.mode, GameMode::Start);
        assert!(host.is_showing(Screen::Start));
        assert!(!host.is_showing(Screen::Loading));
        assert_eq!(host.message, START_PROMPT);
        assert_eq!(host.count_cue(Cue::Start), 1);

        // Waiting on the start screen
        tick(&mut state, &idle, Timestamp(48), &world, &mut host);
        assert_eq!(state.mode, GameMode::Start);

        let click = TickInput {
            screen_click: true,
            ..Default::default()
        };
        tick(&mut state, &click, Timestamp(1_000), &world, &mut host);
        assert_eq!(state.mode, GameMode::Playing);
        assert!(!host.is_showing(Screen::Start));
        assert_eq!(host.message, "");
        assert_eq!(host.count_cue(Cue::Collect), 1);
        assert_eq!(state.scheduler.last_attack, Timestamp(6_000));
    }

    #[test]
    fn test_unresolved_first_attack_kills_on_schedule() {
        let tuning = Tuning {
            first_attack_grace_ms: 0,
            first_attack_delay_ms: 4_999,
            ..Default::default()
        };
        let mut state = running(77, tuning, Timestamp(0));
        let world = world_with_arm();
        let mut host = RecordingHost::new();
        let idle = TickInput::default();

        let mut t = 0;
        let mut died_at = None;
        while t <= 30_000 {
            tick(&mut state, &idle, Timestamp(t), &world, &mut host);
            if state.mode == GameMode::Died && died_at.is_none() {
                died_at = Some(t);
            }
            t += 1;
        }

        // First attack at 5000, unresolved for more than 16000
        assert_eq!(died_at, Some(21_001));
        assert_eq!(host.count_cue(Cue::Scream), 1);
        assert!(host.is_showing(Screen::Death));
        assert!(state.jumpscare.is_none());
    }

    #[test]
    fn test_resolved_door_attack_survives() {
        let tuning = Tuning {
            first_attack_grace_ms: 0,
            first_attack_delay_ms: 0,
            ..Default::default()
        };
        let mut state = running(3, tuning, Timestamp(0));
        let world = world_with_arm();
        let mut host = RecordingHost::new();

        // Force a door attack right away
        state.hazards.start_door(0, Timestamp(0));
        state.scheduler.last_attack = Timestamp(0);
        state.scheduler.next_delay_ms = 60_000;
        let door = state.hazards.doors.get(0).unwrap().position;
        state.player.position = Vec3::new(door.x, 300.0, 0.0);

        let mut t = 0;
        while t < 1_000 {
            tick(&mut state, &TickInput::default(), Timestamp(t), &world, &mut host);
            t += FRAME_MS;
        }
        assert_eq!(host.message, crate::sim::interact::TIP_CLOSE_DOOR);

        let close = TickInput {
            pick: Some("0".into()),
            ..Default::default()
        };
        tick(&mut state, &close, Timestamp(t), &world, &mut host);
        assert!(!state.under_attack());

        while t < 30_000 {
            tick(&mut state, &TickInput::default(), Timestamp(t), &world, &mut host);
            t += FRAME_MS;
        }
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.hazards.doors.get(0).unwrap().state, DoorState::Closed);
    }

    #[test]
    fn test_death_click_restarts() {
        let tuning = Tuning {
            first_attack_grace_ms: 0,
            first_attack_delay_ms: 0,
            ..Default::default()
        };
        let mut state = running(8, tuning, Timestamp(0));
        let world = world_with_arm();
        let mut host = RecordingHost::new();
        let click = TickInput {
            screen_click: true,
            ..Default::default()
        };

        tick(
            &mut state,
            &TickInput {
                pick: Some("milk_2".into()),
                ..Default::default()
            },
            Timestamp(0),
            &world,
            &mut host,
        );
        state.inventory.has_key = true;
        state.hazards.reset();
        state.hazards.start_tv(Timestamp(0));

        let mut t = 0;
        while state.mode == GameMode::Playing {
            t += FRAME_MS;
            tick(&mut state, &TickInput::default(), Timestamp(t), &world, &mut host);
        }
        assert_eq!(state.mode, GameMode::Died);

        // Clicks during the scare are ignored
        tick(&mut state, &click, Timestamp(t + 100), &world, &mut host);
        assert_eq!(state.mode, GameMode::Died);

        tick(&mut state, &TickInput::default(), Timestamp(t + 1_500), &world, &mut host);
        assert!(state.jumpscare.is_none());
        tick(&mut state, &click, Timestamp(t + 2_000), &world, &mut host);

        assert_eq!(state.mode, GameMode::Playing);
        assert!(!state.inventory.has_key);
        assert_eq!(state.inventory.items_found(), 0);
        assert!(!state.under_attack());
        assert!(!host.is_showing(Screen::Death));
        assert!(host.hidden_objects.is_empty());
    }

    #[test]
    fn test_offering_ends_once() {
        let mut state = running(4, Tuning::default(), Timestamp(0));
        let world = world_with_arm();
        let mut host = RecordingHost::new();
        for item in Item::ALL {
            state.inventory.collect(item);
        }
        state.player.position = Vec3::new(1800.0, 300.0, 0.0);

        let offer = TickInput {
            pick: Some("altar".into()),
            ..Default::default()
        };
        tick(&mut state, &offer, Timestamp(100), &world, &mut host);
        assert_eq!(state.mode, GameMode::Escaped);

        for i in 0..400 {
            tick(&mut state, &offer, Timestamp(200 + i), &world, &mut host);
        }
        assert_eq!(state.mode, GameMode::Escaped);
        assert_eq!(host.count_cue(Cue::Devotion), 1);
        assert!(host.is_showing(Screen::Ending));
        assert_eq!(GameSnapshot::capture(&state).offering_alpha, 1.0);
    }

    #[test]
    fn test_snapshot_tracks_hazards() {
        let mut state = running(5, Tuning::default(), Timestamp(0));
        state.hazards.start_door(6, Timestamp(0));
        let world = world_with_arm();
        let mut host = RecordingHost::new();
        tick(&mut state, &TickInput::default(), Timestamp(16), &world, &mut host);

        let snap = GameSnapshot::capture(&state);
        assert_eq!(snap.door_angles.len(), crate::consts::NUM_DOORS);
        assert!(snap.door_angles[6] != 0.0);
        assert!(snap.monster_visible);
        assert!(serde_json::to_string(&snap).is_ok());
    }

    fn active_count(state: &SessionState) -> usize {
        let hazards = &state.hazards;
        let door_timed = hazards.active_door().is_some() as usize;
        let tv_timed = matches!(hazards.active(), Some(ActiveHazard::Tv { .. })) as usize;
        let arm_timed = matches!(hazards.active(), Some(ActiveHazard::Toilet { .. })) as usize;
        door_timed + tv_timed + arm_timed
    }

    proptest! {
        #[test]
        fn prop_single_active_hazard(seed in any::<u64>(), steps in proptest::collection::vec((1u64..4_000, any::<bool>()), 1..60)) {
            let tuning = Tuning {
                first_attack_grace_ms: 0,
                first_attack_delay_ms: 0,
                min_delay_ms: 1,
                vary_delay_ms: 3_000,
                ..Default::default()
            };
            let mut state = running(seed, tuning, Timestamp(0));
            let world = world_with_arm();
            let mut host = RecordingHost::new();
            let mut t = 0;
            for (dt, resolve) in steps {
                t += dt;
                let pick = match state.hazards.active().copied() {
                    Some(ActiveHazard::Door { door_index, .. }) if resolve => {
                        let door = state.hazards.doors.get(door_index).unwrap().position;
                        state.player.position = Vec3::new(door.x, state.player.position.y, 0.0);
                        Some(door_index.to_string())
                    }
                    _ => None,
                };
                let input = TickInput { pick, ..Default::default() };
                tick(&mut state, &input, Timestamp(t), &world, &mut host);
                prop_assert!(active_count(&state) <= 1);
                if let Some(active) = state.hazards.active() {
                    if active.kind() == HazardKind::Door {
                        let open = state.hazards.doors.iter().filter(|d| d.state != DoorState::Closed).count();
                        prop_assert!(open >= 1);
                    }
                }
                if state.mode != GameMode::Playing {
                    break;
                }
            }
        }

        #[test]
        fn prop_reset_is_idempotent(seed in any::<u64>(), run_ms in 0u64..40_000) {
            let tuning = Tuning {
                first_attack_grace_ms: 0,
                first_attack_delay_ms: 0,
                ..Default::default()
            };
            let mut state = running(seed, tuning, Timestamp(0));
            let world = world_with_arm();
            let mut host = RecordingHost::new();
            let mut t = 0;
            while t < run_ms {
                tick(&mut state, &TickInput::default(), Timestamp(t), &world, &mut host);
                t += 50;
            }

            // Normal pacing after the replay so no attack lands in the next few frames
            state.tuning = Tuning::default();
            state.reset(Timestamp(t));
            let first = GameSnapshot::capture(&state);
            state.reset(Timestamp(t));
            prop_assert_eq!(&first, &GameSnapshot::capture(&state));

            for _ in 0..3 {
                t += FRAME_MS;
                tick(&mut state, &TickInput::default(), Timestamp(t), &world, &mut host);
            }
            prop_assert_eq!(state.mode, GameMode::Playing);
            prop_assert_eq!(state.inventory.items_found(), 0);
            prop_assert!(!state.inventory.has_key);
            prop_assert!(!state.under_attack());
        }
    }
}
