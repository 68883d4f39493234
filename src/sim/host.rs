//! Output collaborators: sound cues and on-screen presentation
//!
//! Both are fire-and-forget. The simulation never reads anything back from
//! them, so a host may drop calls it cannot honour.

use serde::{Deserialize, Serialize};

/// Sound cues the simulation can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Door swings open
    DoorCreak,
    /// Antagonist laughs (door attack)
    Laugh,
    /// Door slammed shut by the player
    DoorClose,
    /// TV static burst
    Static,
    /// Screen cracking (TV attack)
    Crack,
    /// Water rippling in the toilet
    Ripples,
    /// Urination (toilet attack)
    Pee,
    /// Toilet flushed by the player
    Flush,
    /// Jumpscare
    Scream,
    /// Item picked up / run started
    Collect,
    /// Offering accepted
    Devotion,
    /// Title screen sweep
    Start,
}

/// Full-screen panels the host can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Loading,
    Start,
    Jumpscare,
    Death,
    Ending,
}

/// Plays sound cues
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}

/// Message line, full-screen panels and pickable object visibility
pub trait Presentation {
    fn set_message(&mut self, text: &str);
    fn show_screen(&mut self, screen: Screen);
    fn hide_screen(&mut self, screen: Screen);
    /// Collected objects are hidden until the next reset
    fn set_object_visible(&mut self, _name: &str, _visible: bool) {}
}

/// A host that records everything, for tests and the headless driver
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub cues: Vec<Cue>,
    pub message: String,
    pub messages: Vec<String>,
    pub visible_screens: Vec<Screen>,
    pub hidden_objects: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self, screen: Screen) -> bool {
        self.visible_screens.contains(&screen)
    }

    pub fn count_cue(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AudioCue for RecordingHost {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

impl Presentation for RecordingHost {
    fn set_message(&mut self, text: &str) {
        if self.message != text {
            self.message = text.to_string();
            self.messages.push(self.message.clone());
        }
    }

    fn show_screen(&mut self, screen: Screen) {
        if !self.visible_screens.contains(&screen) {
            self.visible_screens.push(screen);
        }
    }

    fn hide_screen(&mut self, screen: Screen) {
        self.visible_screens.retain(|s| *s != screen);
    }

    fn set_object_visible(&mut self, name: &str, visible: bool) {
        if visible {
            self.hidden_objects.retain(|n| n != name);
        } else if !self.hidden_objects.iter().any(|n| n == name) {
            self.hidden_objects.push(name.to_string());
        }
    }
}
