//! Wall-clock time for the simulation
//!
//! Timers are polled, never scheduled: every system compares a stored
//! `Timestamp` against the tick's `now`.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Milliseconds on the host's wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`; a timestamp still in the future reads as 0
    pub fn elapsed_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp shifted forward by `ms`
    pub fn offset(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Source of `now` for the tick loop
pub trait GameClock {
    fn now(&self) -> Timestamp;

    fn elapsed_since(&self, t: Timestamp) -> u64 {
        self.now().elapsed_since(t)
    }
}

/// Host wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl GameClock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Timestamp {
        Timestamp(js_sys::Date::now() as u64)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Timestamp {
        let ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(ms)
    }
}

/// Hand-driven clock for tests and the headless driver
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) -> Timestamp {
        self.now.set(self.now.get().saturating_add(ms));
        self.now()
    }
}

impl GameClock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_saturates_for_future() {
        let now = Timestamp(1_000);
        assert_eq!(now.elapsed_since(Timestamp(400)), 600);
        assert_eq!(now.elapsed_since(now.offset(5_000)), 0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now(), Timestamp(10));
        clock.advance(16);
        assert_eq!(clock.elapsed_since(Timestamp(10)), 16);
        clock.set(0);
        assert_eq!(clock.now(), Timestamp::ZERO);
    }
}
