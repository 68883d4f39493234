//! Haunted Hallway entry point
//!
//! On the web the page drives the exported API in `platform::web`. Natively
//! this runs two scripted sessions headless (one player who answers every
//! attack and makes the offering, one who ignores them) and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec3;

    use haunted_hallway::Tuning;
    use haunted_hallway::sim::{
        Aabb, ActiveHazard, GameClock, GameMode, GameSnapshot, HallwayWorld, Item, ManualClock,
        RecordingHost, SessionState, TickInput, tick,
    };

    /// Frame interval (about 60 fps)
    const FRAME_MS: u64 = 16;
    /// How long the scripted player takes to react to an attack
    const REACTION_MS: u64 = 3_000;
    /// Game time the survivor spends dodging before making the offering
    const SURVIVE_MS: u64 = 60_000;
    /// Hard stop for a scripted run
    const RUN_LIMIT_MS: u64 = 180_000;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Script {
        Survivor,
        Idle,
    }

    fn world() -> HallwayWorld {
        let mut world = HallwayWorld::default();
        world.register_named_prop(
            "arm",
            Aabb::from_center_size(Vec3::new(1950.0, 40.0, 1500.0), Vec3::new(20.0, 80.0, 20.0)),
        );
        world.register_named_prop(
            "table",
            Aabb::from_center_size(Vec3::new(-1000.0, 40.0, 1300.0), Vec3::new(150.0, 80.0, 150.0)),
        );
        world
    }

    /// Move next to whatever is attacking and click it
    fn respond(state: &mut SessionState, active: ActiveHazard) -> String {
        let y = state.player.position.y;
        match active {
            ActiveHazard::Door { door_index, .. } => {
                let x = state
                    .hazards
                    .doors
                    .get(door_index)
                    .map(|d| d.position.x)
                    .unwrap_or(0.0);
                state.player.position = Vec3::new(x, y, 0.0);
                door_index.to_string()
            }
            ActiveHazard::Tv { .. } => {
                state.player.position = Vec3::new(-1700.0, y, 0.0);
                "tv".to_string()
            }
            ActiveHazard::Toilet { .. } => {
                state.player.position = Vec3::new(1950.0, y, 1200.0);
                "toilet_lever".to_string()
            }
        }
    }

    /// Pick the survivor's next click, if any
    fn survivor_pick(state: &mut SessionState, now: u64, started: u64) -> Option<String> {
        if let Some(active) = state.hazards.active().copied() {
            if now.saturating_sub(active.since().as_millis()) >= REACTION_MS {
                return Some(respond(state, active));
            }
            return None;
        }
        if now.saturating_sub(started) < SURVIVE_MS {
            return None;
        }
        if let Some(item) = Item::ALL.into_iter().find(|i| !state.inventory.has_item(*i)) {
            return Some(item.object_name().to_string());
        }
        let y = state.player.position.y;
        state.player.position = Vec3::new(1800.0, y, 0.0);
        Some("altar".to_string())
    }

    pub fn run(seed: u64, tuning: Tuning, script: Script) -> GameSnapshot {
        let clock = ManualClock::new(0);
        let world = world();
        let mut host = RecordingHost::new();
        let mut state = SessionState::new(seed, tuning);
        let mut mode = state.mode;
        let mut started = 0;
        let mut restarted = false;

        log::info!("{:?} run (seed {})", script, seed);
        while clock.now().as_millis() < RUN_LIMIT_MS {
            let now = clock.advance(FRAME_MS);
            let mut input = TickInput::default();

            match state.mode {
                GameMode::Loading => {
                    let next = state.manifest.pending().next().map(str::to_string);
                    if let Some(id) = next {
                        if let Err(e) = state.manifest.mark_loaded(&id) {
                            log::warn!("{}", e);
                        }
                    }
                }
                GameMode::Start => {
                    input.screen_click = true;
                    started = now.as_millis();
                }
                GameMode::Playing => {
                    input.forward = (now.as_millis() / 2_000) % 2 == 0;
                    input.back = !input.forward;
                    if script == Script::Survivor {
                        input.pick = survivor_pick(&mut state, now.as_millis(), started);
                    }
                }
                GameMode::Died => {
                    if state.jumpscare.is_none() && !restarted {
                        input.screen_click = true;
                        restarted = true;
                    }
                }
                GameMode::Escaped => {}
            }

            tick(&mut state, &input, now, &world, &mut host);

            if state.mode != mode {
                log::info!("{}ms: {:?} -> {:?}", now.as_millis(), mode, state.mode);
                mode = state.mode;
            }
            if state.offering.ending_shown || (restarted && state.mode == GameMode::Died) {
                break;
            }
        }

        log::info!(
            "{:?} run finished at {}ms: {} cues, {} messages",
            script,
            clock.now().as_millis(),
            host.cues.len(),
            host.messages.len()
        );
        GameSnapshot::capture(&state)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use haunted_hallway::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Haunted Hallway (native) starting...");
    log::info!("The playable build is the wasm one; running scripted sessions");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => 2024,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    for script in [headless::Script::Survivor, headless::Script::Idle] {
        let snapshot = headless::run(seed, tuning.clone(), script);
        println!("{}", serde_json::to_string(&snapshot)?);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in platform::web, this is just to satisfy the compiler
}
