//! Session state and core progress types
//!
//! One `SessionState` owns everything a run mutates. Replay goes through
//! `reset`, never through a fresh constructor, so the RNG stream and the load
//! manifest carry over.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::hazard::Hazards;
use super::interact::Item;
use super::loading::LoadManifest;
use super::motion::PlayerState;
use super::outcome::{Jumpscare, Offering};
use super::scheduler::AttackScheduler;
use crate::consts::ITEMS_REQUIRED;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Models still arriving
    Loading,
    /// Title screen, waiting for a click
    Start,
    /// A run is in progress
    Playing,
    /// Timed out; jumpscare then death screen
    Died,
    /// Offering accepted
    Escaped,
}

/// What the player has picked up this run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub has_key: bool,
    pub chest_open: bool,
    collected: Vec<Item>,
    /// Objects taken out of the scene, restored on reset
    hidden: Vec<String>,
}

impl Inventory {
    pub fn items_found(&self) -> u8 {
        self.collected.len() as u8
    }

    pub fn has_item(&self, item: Item) -> bool {
        self.collected.contains(&item)
    }

    pub fn has_all_items(&self) -> bool {
        self.items_found() >= ITEMS_REQUIRED
    }

    /// Add `item` once; returns false if it was already held
    pub fn collect(&mut self, item: Item) -> bool {
        if self.has_item(item) || self.has_all_items() {
            return false;
        }
        self.collected.push(item);
        true
    }

    /// Mark an object as removed from the scene; false if it already was
    pub fn hide(&mut self, name: &str) -> bool {
        if self.is_hidden(name) {
            return false;
        }
        self.hidden.push(name.to_string());
        true
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.iter().any(|n| n == name)
    }

    pub fn hidden(&self) -> &[String] {
        &self.hidden
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: GameMode,
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub settings: Settings,
    pub rng: Pcg32,
    pub player: PlayerState,
    pub hazards: Hazards,
    pub scheduler: AttackScheduler,
    pub inventory: Inventory,
    /// Set while the jumpscare overlay is up
    pub jumpscare: Option<Jumpscare>,
    pub offering: Offering,
    pub manifest: LoadManifest,
}

impl SessionState {
    /// New session waiting for the default asset list
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_manifest(seed, tuning, LoadManifest::default())
    }

    pub fn with_manifest(seed: u64, tuning: Tuning, manifest: LoadManifest) -> Self {
        log::info!("New session (seed {})", seed);
        Self {
            mode: GameMode::Loading,
            seed,
            player: PlayerState::new(&tuning),
            scheduler: AttackScheduler::new(Timestamp::ZERO, &tuning),
            tuning,
            settings: Settings::default(),
            rng: Pcg32::seed_from_u64(seed),
            hazards: Hazards::default(),
            inventory: Inventory::default(),
            jumpscare: None,
            offering: Offering::default(),
            manifest,
        }
    }

    /// Put everything back for a fresh run starting at `now` and enter Playing
    pub fn reset(&mut self, now: Timestamp) {
        self.player.reset(&self.tuning);
        self.hazards.reset();
        self.scheduler.rearm(now, &self.tuning);
        self.inventory.reset();
        self.jumpscare = None;
        self.offering.reset();
        self.mode = GameMode::Playing;
        log::info!("Session reset at {}ms", now.as_millis());
    }

    /// A hazard's timeout is running
    pub fn under_attack(&self) -> bool {
        self.hazards.active().is_some()
    }
}
