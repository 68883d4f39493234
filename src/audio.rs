//! Audio cues using HTML audio elements
//!
//! One element per cue, created up front and rewound on every play so a cue
//! that fires twice restarts instead of stacking.

use std::collections::HashMap;

use web_sys::HtmlAudioElement;

use crate::settings::Settings;
use crate::sim::host::{AudioCue, Cue};

/// Directory the page serves sound files from
const SOUND_DIR: &str = "sounds";

const ALL_CUES: [Cue; 12] = [
    Cue::DoorCreak,
    Cue::Laugh,
    Cue::DoorClose,
    Cue::Static,
    Cue::Crack,
    Cue::Ripples,
    Cue::Pee,
    Cue::Flush,
    Cue::Scream,
    Cue::Collect,
    Cue::Devotion,
    Cue::Start,
];

fn file_name(cue: Cue) -> &'static str {
    match cue {
        Cue::DoorCreak => "door_creak.mp3",
        Cue::Laugh => "laugh.mp3",
        Cue::DoorClose => "door_close.mp3",
        Cue::Static => "static.mp3",
        Cue::Crack => "crack.mp3",
        Cue::Ripples => "ripples.mp3",
        Cue::Pee => "pee.mp3",
        Cue::Flush => "flush.mp3",
        Cue::Scream => "scream.mp3",
        Cue::Collect => "collect.mp3",
        Cue::Devotion => "devotion.mp3",
        Cue::Start => "start.mp3",
    }
}

/// Plays cues through the page's audio elements
pub struct AudioManager {
    sounds: HashMap<Cue, HtmlAudioElement>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut sounds = HashMap::with_capacity(ALL_CUES.len());
        for cue in ALL_CUES {
            let src = format!("{}/{}", SOUND_DIR, file_name(cue));
            match HtmlAudioElement::new_with_src(&src) {
                Ok(el) => {
                    sounds.insert(cue, el);
                }
                Err(e) => log::warn!("Failed to create audio element for {}: {:?}", src, e),
            }
        }
        Self {
            sounds,
            volume: settings.cue_volume(),
            muted: false,
        }
    }

    /// Pick up new volume settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.cue_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl AudioCue for AudioManager {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(el) = self.sounds.get(&cue) else {
            log::warn!("No audio element for {:?}", cue);
            return;
        };
        el.set_volume(vol as f64);
        el.set_current_time(0.0);
        // Autoplay may be refused before the first user gesture
        if let Err(e) = el.play() {
            log::debug!("Playback of {:?} refused: {:?}", cue, e);
        }
    }
}
