//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Time comes in as a polled `Timestamp`, never read from a global clock
//! - Seeded RNG only
//! - Fixed step order within a tick
//! - No DOM, audio or rendering dependencies; those sit behind `host` traits

pub mod arm;
pub mod clock;
pub mod door;
pub mod hazard;
pub mod host;
pub mod interact;
pub mod layout;
pub mod loading;
pub mod motion;
pub mod outcome;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod tv;
pub mod world;

pub use arm::{ArmState, ToiletArm};
pub use clock::{GameClock, ManualClock, SystemClock, Timestamp};
pub use door::{DoorMonster, DoorRecord, DoorSide, DoorState, Doors};
pub use hazard::{ActiveHazard, HazardKind, Hazards};
pub use host::{AudioCue, Cue, Presentation, RecordingHost, Screen};
pub use interact::{Item, PickTarget, apply_pick, contextual_tip};
pub use layout::HallwayWorld;
pub use loading::{LoadManifest, ManifestError};
pub use motion::PlayerState;
pub use outcome::{Jumpscare, Offering, Overlay, resolve_timeouts};
pub use scheduler::{AttackOutcome, AttackScheduler};
pub use state::{GameMode, Inventory, SessionState};
pub use tick::{Direction, GameSnapshot, TickInput, tick};
pub use tv::Tv;
pub use world::{Aabb, World};
