//! Attack scheduling
//!
//! When the delay since the last attack has passed, the scheduler draws an
//! attack kind and a fresh delay. The draw is spent even if the chosen hazard
//! cannot start, so a busy hazard quietly skips a beat.
//!
//! The delay range never narrows: every draw comes from the same
//! `[min_delay, min_delay + vary_delay)` window.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::hazard::{ActiveHazard, HazardKind, Hazards};
use super::host::{AudioCue, Cue};
use crate::tuning::Tuning;

/// What happened on a scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Not yet time
    Waiting,
    /// A hazard started
    Started(ActiveHazard),
    /// The draw was spent but the chosen hazard was busy
    Skipped(HazardKind),
}

/// Attack timing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackScheduler {
    pub last_attack: Timestamp,
    pub next_delay_ms: u64,
}

impl AttackScheduler {
    /// Timer for a fresh run starting at `now`
    pub fn new(now: Timestamp, tuning: &Tuning) -> Self {
        Self {
            last_attack: now.offset(tuning.first_attack_grace_ms),
            next_delay_ms: tuning.first_attack_delay_ms,
        }
    }

    pub fn rearm(&mut self, now: Timestamp, tuning: &Tuning) {
        *self = Self::new(now, tuning);
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        now.elapsed_since(self.last_attack) > self.next_delay_ms
    }

    /// Milliseconds until the next draw (0 once due)
    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        let due_at = self.last_attack.offset(self.next_delay_ms);
        due_at.elapsed_since(now)
    }

    /// Draw a delay from `[min_delay, min_delay + vary_delay)`
    fn draw_delay<R: Rng>(rng: &mut R, tuning: &Tuning) -> u64 {
        let max = tuning.max_delay_ms();
        if max <= tuning.min_delay_ms {
            return tuning.min_delay_ms;
        }
        rng.random_range(tuning.min_delay_ms..max)
    }

    /// Launch an attack if one is due
    pub fn tick<R: Rng, A: AudioCue>(
        &mut self,
        now: Timestamp,
        hazards: &mut Hazards,
        tuning: &Tuning,
        rng: &mut R,
        audio: &mut A,
    ) -> AttackOutcome {
        if !self.is_due(now) {
            return AttackOutcome::Waiting;
        }

        let kind = HazardKind::ALL[rng.random_range(0..HazardKind::ALL.len())];
        self.next_delay_ms = Self::draw_delay(rng, tuning);
        self.last_attack = now;

        let started = match kind {
            HazardKind::Door => {
                let preferred = rng.random_range(0..hazards.doors.len().max(1));
                hazards.start_door(preferred, now).is_some()
            }
            HazardKind::Tv => hazards.start_tv(now),
            HazardKind::Toilet => hazards.start_toilet(now),
        };

        if !started {
            log::debug!(
                "{:?} attack skipped (busy); next draw in {}ms",
                kind,
                self.next_delay_ms
            );
            return AttackOutcome::Skipped(kind);
        }

        let (first, second) = match kind {
            HazardKind::Door => (Cue::DoorCreak, Cue::Laugh),
            HazardKind::Tv => (Cue::Static, Cue::Crack),
            HazardKind::Toilet => (Cue::Ripples, Cue::Pee),
        };
        audio.play(first);
        audio.play(second);

        match hazards.active().copied() {
            Some(active) => {
                log::info!(
                    "{:?} attack started at {}ms; next draw in {}ms",
                    kind,
                    now.as_millis(),
                    self.next_delay_ms
                );
                AttackOutcome::Started(active)
            }
            None => AttackOutcome::Skipped(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::door::DoorState;
    use crate::sim::host::RecordingHost;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quick_tuning() -> Tuning {
        Tuning {
            first_attack_grace_ms: 0,
            first_attack_delay_ms: 4_999,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_attack_after_grace() {
        let tuning = Tuning::default();
        let sched = AttackScheduler::new(Timestamp(0), &tuning);
        // Grace 5s + first delay 5s, strictly greater
        assert!(!sched.is_due(Timestamp(10_000)));
        assert!(sched.is_due(Timestamp(10_001)));
        assert_eq!(sched.remaining_ms(Timestamp(4_000)), 6_000);
    }

    #[test]
    fn test_huge_delay_does_not_panic() {
        let tuning = Tuning {
            min_delay_ms: u64::MAX,
            vary_delay_ms: 1_000,
            ..quick_tuning()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut host = RecordingHost::new();
        let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
        let mut hazards = Hazards::default();
        sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host);
        assert_eq!(sched.next_delay_ms, u64::MAX);
    }

    #[test]
    fn test_fire_redraws_delay_in_range() {
        let tuning = quick_tuning();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut host = RecordingHost::new();
        for _ in 0..50 {
            let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
            let mut hazards = Hazards::default();
            let outcome = sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host);
            assert!(matches!(outcome, AttackOutcome::Started(_)));
            assert_eq!(sched.last_attack, Timestamp(5_000));
            assert!(sched.next_delay_ms >= tuning.min_delay_ms);
            assert!(sched.next_delay_ms < tuning.max_delay_ms());
        }
    }

    #[test]
    fn test_waiting_has_no_side_effects() {
        let tuning = quick_tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut host = RecordingHost::new();
        let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
        let mut hazards = Hazards::default();
        let outcome = sched.tick(Timestamp(4_999), &mut hazards, &tuning, &mut rng, &mut host);
        assert_eq!(outcome, AttackOutcome::Waiting);
        assert!(host.cues.is_empty());
        assert!(hazards.active().is_none());
    }

    #[test]
    fn test_busy_draw_is_spent() {
        let tuning = quick_tuning();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut host = RecordingHost::new();
        let mut hazards = Hazards::default();
        hazards.start_tv(Timestamp(0));

        let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
        let outcome = sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host);
        assert!(matches!(outcome, AttackOutcome::Skipped(_)));
        // Timer still reset
        assert_eq!(sched.last_attack, Timestamp(5_000));
        assert!(!sched.is_due(Timestamp(5_001)));
        assert!(host.cues.is_empty());
        assert!(matches!(hazards.active(), Some(ActiveHazard::Tv { .. })));
    }

    #[test]
    fn test_started_attack_plays_two_cues() {
        let tuning = quick_tuning();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut host = RecordingHost::new();
        let mut hazards = Hazards::default();
        let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
        let outcome = sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host);
        let AttackOutcome::Started(active) = outcome else {
            panic!("expected an attack, got {:?}", outcome);
        };
        assert_eq!(host.cues.len(), 2);
        assert_eq!(active.since(), Timestamp(5_000));
    }

    #[test]
    fn test_every_kind_eventually_drawn() {
        let tuning = quick_tuning();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut host = RecordingHost::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let mut hazards = Hazards::default();
            let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
            host.cues.clear();
            if let AttackOutcome::Started(a) =
                sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host)
            {
                if a.kind() == HazardKind::Toilet {
                    assert_eq!(host.cues, vec![Cue::Ripples, Cue::Pee]);
                }
                seen.insert(a.kind());
            }
        }
        assert_eq!(seen.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_scan_only_lands_on_closed(start in 0usize..11, busy in proptest::collection::vec(0usize..11, 0..12)) {
            let mut hazards = Hazards::default();
            for i in &busy {
                hazards.doors.get_mut(*i).unwrap().state = DoorState::Closing;
            }
            match hazards.doors.next_closed_from(start) {
                Some(index) => prop_assert_eq!(hazards.doors.get(index).unwrap().state, DoorState::Closed),
                None => prop_assert!(!hazards.doors.iter().any(|d| d.state == DoorState::Closed)),
            }
        }

        #[test]
        fn prop_started_door_was_closed(seed in any::<u64>()) {
            let tuning = quick_tuning();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut host = RecordingHost::new();
            let mut hazards = Hazards::default();
            let before: Vec<DoorState> = hazards.doors.iter().map(|d| d.state).collect();

            let mut sched = AttackScheduler::new(Timestamp(0), &tuning);
            if let AttackOutcome::Started(ActiveHazard::Door { door_index, .. }) =
                sched.tick(Timestamp(5_000), &mut hazards, &tuning, &mut rng, &mut host)
            {
                prop_assert_eq!(before[door_index], DoorState::Closed);
                prop_assert_eq!(hazards.doors.get(door_index).unwrap().state, DoorState::Opening);
            }
        }
    }
}
