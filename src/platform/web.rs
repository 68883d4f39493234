//! Browser bridge
//!
//! The page owns the 3D scene. It reports loaded models, key presses and
//! pointer picks, calls `frame` once per rendered frame, and draws from the
//! returned JSON snapshot.

use std::cell::RefCell;

use glam::Vec3;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::apply_key;
use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::sim::clock::{GameClock, SystemClock, Timestamp};
use crate::sim::host::{AudioCue, Cue, Presentation, Screen};
use crate::sim::layout::HallwayWorld;
use crate::sim::state::SessionState;
use crate::sim::tick::{GameSnapshot, TickInput, tick};
use crate::sim::world::Aabb;
use crate::tuning::Tuning;

const MESSAGE_ID: &str = "message";

fn screen_id(screen: Screen) -> &'static str {
    match screen {
        Screen::Loading => "loading-screen",
        Screen::Start => "start-screen",
        Screen::Jumpscare => "jumpscare",
        Screen::Death => "death-screen",
        Screen::Ending => "ending-screen",
    }
}

/// DOM presentation plus audio
struct WebHost {
    document: Option<Document>,
    audio: AudioManager,
    /// Visibility changes since the last frame, for the page to apply to meshes
    visibility: Vec<(String, bool)>,
}

impl WebHost {
    fn new(settings: &Settings) -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            log::warn!("No document; screens and messages disabled");
        }
        Self {
            document,
            audio: AudioManager::new(settings),
            visibility: Vec::new(),
        }
    }

    fn set_hidden(&self, screen: Screen, hidden: bool) {
        let Some(el) = self
            .document
            .as_ref()
            .and_then(|d| d.get_element_by_id(screen_id(screen)))
        else {
            log::warn!("Missing element #{}", screen_id(screen));
            return;
        };
        let classes = el.class_list();
        let result = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle #{}: {:?}", screen_id(screen), e);
        }
    }
}

impl AudioCue for WebHost {
    fn play(&mut self, cue: Cue) {
        self.audio.play(cue);
    }
}

impl Presentation for WebHost {
    fn set_message(&mut self, text: &str) {
        if let Some(el) = self
            .document
            .as_ref()
            .and_then(|d| d.get_element_by_id(MESSAGE_ID))
        {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn show_screen(&mut self, screen: Screen) {
        self.set_hidden(screen, false);
    }

    fn hide_screen(&mut self, screen: Screen) {
        self.set_hidden(screen, true);
    }

    fn set_object_visible(&mut self, name: &str, visible: bool) {
        self.visibility.push((name.to_string(), visible));
    }
}

/// Game instance holding all state
struct Game {
    state: SessionState,
    world: HallwayWorld,
    host: WebHost,
    input: TickInput,
}

#[derive(Serialize)]
struct FrameReport<'a> {
    #[serde(flatten)]
    snapshot: GameSnapshot,
    visibility: &'a [(String, bool)],
}

thread_local! {
    static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
}

fn with_game<T>(f: impl FnOnce(&mut Game) -> T) -> Option<T> {
    GAME.with(|g| g.borrow_mut().as_mut().map(f))
}

/// Create the session. A seed of 0 picks one from the clock.
#[wasm_bindgen]
pub fn start(seed: u64, tuning_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }

    let tuning = match tuning_json {
        Some(json) => Tuning::from_json(&json)?,
        None => Tuning::default(),
    };
    let seed = if seed == 0 {
        SystemClock.now().as_millis()
    } else {
        seed
    };

    let settings = Settings::load();
    let mut state = SessionState::new(seed, tuning);
    state.settings = settings.clone();
    let host = WebHost::new(&settings);

    log::info!("Haunted Hallway starting (seed {})", seed);
    GAME.with(|g| {
        *g.borrow_mut() = Some(Game {
            state,
            world: HallwayWorld::default(),
            host,
            input: TickInput::default(),
        })
    });
    Ok(())
}

/// Report a finished model load. Returns false if it was already reported.
#[wasm_bindgen]
pub fn asset_loaded(id: &str) -> Result<bool, JsError> {
    match with_game(|g| g.state.manifest.mark_loaded(id)) {
        Some(result) => Ok(result?),
        None => Err(JsError::new("start() has not been called")),
    }
}

/// Register a loaded prop's bounds; only furniture collides
#[wasm_bindgen]
pub fn register_prop(name: &str, cx: f32, cy: f32, cz: f32, sx: f32, sy: f32, sz: f32) {
    let bounds = Aabb::from_center_size(Vec3::new(cx, cy, cz), Vec3::new(sx, sy, sz));
    with_game(|g| g.world.register_named_prop(name, bounds));
}

/// Forget a prop whose model the page disposed of
#[wasm_bindgen]
pub fn remove_prop(name: &str) -> bool {
    with_game(|g| g.world.remove_prop(name)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn key_down(code: &str) {
    with_game(|g| apply_key(&mut g.input, code, true));
}

#[wasm_bindgen]
pub fn key_up(code: &str) {
    with_game(|g| apply_key(&mut g.input, code, false));
}

/// Pointer click that hit the object called `name`
#[wasm_bindgen]
pub fn pick(name: &str) {
    with_game(|g| g.input.pick = Some(name.to_string()));
}

/// Click on a full-screen panel
#[wasm_bindgen]
pub fn screen_click() {
    with_game(|g| g.input.screen_click = true);
}

/// Window focus changes; mutes while unfocused if the player asked for it
#[wasm_bindgen]
pub fn set_focus(focused: bool) {
    with_game(|g| {
        let mute = !focused && g.state.settings.mute_on_blur;
        g.host.audio.set_muted(mute);
    });
}

/// Update and persist the player's preferences
#[wasm_bindgen]
pub fn update_settings(json: &str) -> Result<(), JsError> {
    let settings = serde_json::from_str::<Settings>(json)?.sanitized();
    settings.save();
    with_game(|g| {
        g.host.audio.apply_settings(&settings);
        g.state.settings = settings;
    });
    Ok(())
}

#[wasm_bindgen]
pub fn look_sensitivity() -> f32 {
    with_game(|g| g.state.settings.look_sensitivity).unwrap_or_else(|| Settings::default().look_sensitivity)
}

/// Advance one frame and return the snapshot as JSON
#[wasm_bindgen]
pub fn frame(now_ms: f64, yaw: f32) -> Result<String, JsError> {
    let report = with_game(|g| {
        g.input.yaw = yaw;
        let now = Timestamp::from_millis(now_ms.max(0.0) as u64);
        tick(&mut g.state, &g.input, now, &g.world, &mut g.host);

        // One-shot inputs are consumed by the tick that saw them
        g.input.pick = None;
        g.input.screen_click = false;

        let report = FrameReport {
            snapshot: GameSnapshot::capture(&g.state),
            visibility: &g.host.visibility,
        };
        let json = serde_json::to_string(&report);
        g.host.visibility.clear();
        json
    });
    match report {
        Some(json) => Ok(json?),
        None => Err(JsError::new("start() has not been called")),
    }
}
