//! Spin controller
//!
//! Owns the one `SpinState` of a wheel and advances it one tick per frame.
//! Angle integration is per tick; `dt` only drives the announcement timer.

use super::geometry::{pointed_index, segment_angle, target_angle};
use super::prizes::PrizeRegistry;
use super::probability::{RandomSource, cumulative_table, select_index};
use super::state::{Deferred, LandedPrize, SpinPhase, SpinState, WheelEvent};
use crate::consts::POINTER_ANGLE;
use crate::settings::SpinTuning;

/// Ease-out velocity for the remaining distance, never past the target
#[inline]
pub fn decelerate_velocity(remaining: f64, tuning: &SpinTuning) -> f64 {
    (remaining * tuning.decay_factor)
        .max(tuning.min_velocity)
        .min(remaining)
}

/// Ticks the ease-out needs to cover `remaining` before it snaps
pub fn ticks_to_land(mut remaining: f64, tuning: &SpinTuning) -> u32 {
    let mut ticks = 0;
    while remaining > tuning.landing_epsilon {
        remaining -= decelerate_velocity(remaining, tuning);
        ticks += 1;
    }
    ticks
}

/// The wheel's state machine
#[derive(Debug)]
pub struct SpinController {
    state: SpinState,
    tuning: SpinTuning,
    prizes: PrizeRegistry,
    /// Prize list swapped in by the editor mid-spin, applied on next Idle
    queued_prizes: Option<PrizeRegistry>,
    announcement: Option<Deferred<LandedPrize>>,
    pointed: usize,
    last_result: Option<LandedPrize>,
    events: Vec<WheelEvent>,
}

impl SpinController {
    pub fn new(prizes: PrizeRegistry, tuning: SpinTuning) -> Self {
        let pointed = pointed_index(0.0, prizes.len());
        Self {
            state: SpinState::default(),
            tuning,
            prizes,
            queued_prizes: None,
            announcement: None,
            pointed,
            last_result: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase
    }

    /// Prize list the wheel is currently drawn with
    pub fn prizes(&self) -> &PrizeRegistry {
        &self.prizes
    }

    /// Segment under the pointer
    pub fn pointed(&self) -> usize {
        self.pointed
    }

    pub fn last_result(&self) -> Option<&LandedPrize> {
        self.last_result.as_ref()
    }

    pub fn announcement_pending(&self) -> bool {
        self.announcement.is_some()
    }

    /// Swap the prize list. Takes effect now if Idle, else once the spin ends.
    ///
    /// Returns true when applied immediately.
    pub fn replace_prizes(&mut self, prizes: PrizeRegistry) -> bool {
        if self.state.is_spinning() {
            log::debug!("Prize list queued until the wheel stops");
            self.queued_prizes = Some(prizes);
            false
        } else {
            self.apply_prizes(prizes);
            true
        }
    }

    /// Idle -> Accelerating. No-op while spinning or announcing.
    pub fn start(&mut self) -> bool {
        if self.state.is_spinning() || self.announcement.is_some() {
            log::debug!("start ignored in {:?}", self.state.phase);
            return false;
        }
        self.state.reset();
        self.state.phase = SpinPhase::Accelerating;
        self.state.angular_velocity = self.tuning.spin_velocity;
        self.events.push(WheelEvent::Started);
        log::debug!("Spin started at angle {:.3}", self.state.current_angle);
        true
    }

    /// Accelerating -> Decelerating: draw a prize and aim for it. No-op otherwise.
    pub fn stop(&mut self, rng: &mut dyn RandomSource) -> bool {
        if self.state.phase != SpinPhase::Accelerating {
            log::debug!("stop ignored in {:?}", self.state.phase);
            return false;
        }

        let table = cumulative_table(self.prizes.entries());
        let sample = rng.sample();
        let chosen = select_index(&table, sample);
        let target = target_angle(
            self.state.current_angle,
            chosen,
            self.prizes.len(),
            self.tuning.extra_rotations,
        );

        self.state.phase = SpinPhase::Decelerating;
        self.state.chosen_index = Some(chosen);
        self.state.target_angle = Some(target);
        self.events.push(WheelEvent::Stopping {
            chosen_index: chosen,
            target_angle: target,
        });
        log::debug!(
            "Stopping: sample {sample:.6} -> prize {chosen}, target {target:.3} (from {:.3})",
            self.state.current_angle
        );
        true
    }

    /// The single overloaded trigger: start when idle, stop when spinning
    pub fn activate(&mut self, rng: &mut dyn RandomSource) -> bool {
        self.events.push(WheelEvent::Click);
        match self.state.phase {
            SpinPhase::Idle => self.start(),
            SpinPhase::Accelerating => self.stop(rng),
            SpinPhase::Decelerating => false,
        }
    }

    /// Drop a pending announcement
    pub fn cancel_announcement(&mut self) -> bool {
        self.announcement.take().is_some()
    }

    /// Advance one frame. `dt` is seconds since the previous frame.
    pub fn tick(&mut self, dt: f64) {
        if let Some(pending) = self.announcement.take() {
            match pending.advance(dt) {
                Ok(result) => {
                    log::info!("Announcing prize {}: {}", result.index, result.label);
                    self.events.push(WheelEvent::Announce(result));
                }
                Err(pending) => self.announcement = Some(pending),
            }
        }

        let from = self.state.current_angle;
        match self.state.phase {
            SpinPhase::Idle => return,
            SpinPhase::Accelerating => {
                self.state.current_angle += self.state.angular_velocity;
            }
            SpinPhase::Decelerating => {
                let Some(target) = self.state.target_angle else {
                    // Unreachable through the public API
                    self.state.reset();
                    return;
                };
                let remaining = target - self.state.current_angle;
                if remaining <= self.tuning.landing_epsilon {
                    self.land(from, target);
                    return;
                }
                self.state.angular_velocity = decelerate_velocity(remaining, &self.tuning);
                self.state.current_angle += self.state.angular_velocity;
            }
        }

        self.track_pointer(from);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        std::mem::take(&mut self.events)
    }

    fn land(&mut self, from: f64, target: f64) {
        self.state.current_angle = target;
        let index = self.state.chosen_index.unwrap_or(0);
        let label = self
            .prizes
            .get(index)
            .map(|p| p.label.clone())
            .unwrap_or_default();
        let result = LandedPrize {
            index,
            label,
            is_first_prize: index == 0,
        };
        log::info!("Landed on prize {}: {}", result.index, result.label);

        self.track_pointer(from);
        self.events.push(WheelEvent::Landed(result.clone()));
        self.announcement = Some(Deferred::new(self.tuning.announce_delay_secs, result.clone()));
        self.last_result = Some(result);
        self.state.reset();

        if let Some(prizes) = self.queued_prizes.take() {
            self.apply_prizes(prizes);
        }
    }

    fn apply_prizes(&mut self, prizes: PrizeRegistry) {
        self.pointed = pointed_index(self.state.current_angle, prizes.len());
        self.prizes = prizes;
    }

    /// Emit one `TickBoundary` per segment that passed the pointer since `from`
    fn track_pointer(&mut self, from: f64) {
        let n = self.prizes.len();
        let index = pointed_index(self.state.current_angle, n);
        if n < 2 {
            self.pointed = index;
            return;
        }

        // Boundaries sit where (POINTER_ANGLE - angle) is a whole number of segments
        let segment = segment_angle(n);
        let boundary = |angle: f64| ((POINTER_ANGLE - angle) / segment).floor();
        let crossed = (boundary(from) - boundary(self.state.current_angle)).max(0.0) as usize;

        if crossed == 0 {
            // Rounding at an exact boundary
            if index != self.pointed {
                self.events.push(WheelEvent::TickBoundary { index });
            }
        } else {
            // The pointed index counts down as the wheel turns
            for step in (0..crossed).rev() {
                self.events.push(WheelEvent::TickBoundary {
                    index: (index + step) % n,
                });
            }
        }
        self.pointed = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::probability::ReplayRandom;
    use std::f64::consts::TAU;

    fn controller() -> SpinController {
        SpinController::new(PrizeRegistry::default(), SpinTuning::default())
    }

    /// Tick until Idle, returning the number of ticks taken
    fn run_to_rest(c: &mut SpinController) -> u32 {
        let mut ticks = 0;
        while c.phase() != SpinPhase::Idle {
            c.tick(1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 10_000, "wheel never landed");
        }
        ticks
    }

    #[test]
    fn test_start_spins_at_constant_velocity() {
        let mut c = controller();
        assert!(c.start());
        assert_eq!(c.phase(), SpinPhase::Accelerating);
        c.tick(1.0 / 60.0);
        c.tick(1.0 / 60.0);
        assert!((c.state().current_angle - 0.6).abs() < 1e-12);
        assert_eq!(c.state().angular_velocity, 0.3);
    }

    #[test]
    fn test_idle_tick_does_not_move() {
        let mut c = controller();
        c.tick(1.0);
        assert_eq!(c.state().current_angle, 0.0);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_stop_chooses_and_aims() {
        let mut c = controller();
        c.start();
        for _ in 0..10 {
            c.tick(1.0 / 60.0);
        }
        let before = c.state().current_angle;
        assert!(c.stop(&mut ReplayRandom::new(vec![0.5])));
        assert_eq!(c.phase(), SpinPhase::Decelerating);
        assert_eq!(c.state().chosen_index, Some(4));
        let target = c.state().target_angle.unwrap();
        assert!(target > before);
        assert!(target - before >= 3.0 * TAU);
    }

    #[test]
    fn test_lands_exactly_on_target() {
        let mut c = controller();
        c.start();
        c.tick(1.0 / 60.0);
        c.stop(&mut ReplayRandom::new(vec![0.0005]));
        let target = c.state().target_angle.unwrap();
        run_to_rest(&mut c);

        assert_eq!(c.state().current_angle, target);
        assert_eq!(c.state().angular_velocity, 0.0);
        assert!(c.state().target_angle.is_none());
        assert!(c.state().chosen_index.is_none());
        assert_eq!(c.pointed(), 0);

        let result = c.last_result().unwrap();
        assert_eq!(result.index, 0);
        assert!(result.is_first_prize);
    }

    #[test]
    fn test_angle_never_decreases() {
        let mut c = controller();
        c.start();
        let mut last = c.state().current_angle;
        for i in 0..400 {
            if i == 20 {
                c.stop(&mut ReplayRandom::new(vec![0.9]));
            }
            c.tick(1.0 / 60.0);
            assert!(c.state().current_angle >= last);
            last = c.state().current_angle;
        }
        assert_eq!(c.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_redundant_triggers_are_noops() {
        let mut c = controller();
        let mut rng = ReplayRandom::new(vec![0.5, 0.0005]);
        assert!(!c.stop(&mut rng));
        assert!(c.start());
        assert!(!c.start());
        assert!(c.stop(&mut rng));

        let snapshot = c.state().clone();
        assert!(!c.stop(&mut rng));
        assert!(!c.activate(&mut rng));
        assert_eq!(c.state(), &snapshot);
        assert_eq!(c.state().chosen_index, Some(4));
    }

    #[test]
    fn test_activate_cycles_start_then_stop() {
        let mut c = controller();
        let mut rng = ReplayRandom::new(vec![0.2]);
        assert!(c.activate(&mut rng));
        assert_eq!(c.phase(), SpinPhase::Accelerating);
        assert!(c.activate(&mut rng));
        assert_eq!(c.phase(), SpinPhase::Decelerating);
        let events = c.drain_events();
        assert_eq!(events.iter().filter(|e| **e == WheelEvent::Click).count(), 2);
        assert!(events.contains(&WheelEvent::Started));
    }

    #[test]
    fn test_announcement_after_delay_blocks_restart() {
        let mut c = controller();
        c.start();
        c.stop(&mut ReplayRandom::new(vec![0.5]));
        while c.phase() != SpinPhase::Idle {
            c.tick(0.0);
        }
        let events = c.drain_events();
        assert!(matches!(events.last(), Some(WheelEvent::Landed(p)) if p.index == 4));
        assert!(c.announcement_pending());

        assert!(!c.start());
        c.tick(0.1);
        assert!(c.drain_events().is_empty());
        c.tick(0.1);
        let events = c.drain_events();
        assert!(
            matches!(&events[..], [WheelEvent::Announce(p)] if p.label == "3천원 할인")
        );
        assert!(c.start());
    }

    #[test]
    fn test_cancel_announcement() {
        let mut c = controller();
        c.start();
        c.stop(&mut ReplayRandom::new(vec![0.5]));
        run_to_rest(&mut c);
        assert!(c.cancel_announcement());
        assert!(!c.cancel_announcement());
        assert!(c.start());
    }

    fn boundaries(events: Vec<WheelEvent>) -> Vec<usize> {
        events
            .into_iter()
            .filter_map(|e| match e {
                WheelEvent::TickBoundary { index } => Some(index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_segment_passed_emits_a_boundary() {
        let mut c = controller();
        assert_eq!(c.pointed(), 4);
        c.start();
        c.stop(&mut ReplayRandom::new(vec![0.2]));
        run_to_rest(&mut c);
        let boundaries = boundaries(c.drain_events());

        // From 1.5 segments before the pointer to 26.5: four turns plus one segment
        assert_eq!(boundaries.len(), 25);
        assert_eq!(boundaries[0], 3);
        for pair in boundaries.windows(2) {
            assert_eq!(pair[1], (pair[0] + 5) % 6);
        }
        assert_eq!(*boundaries.last().unwrap(), 3);
        assert_eq!(c.pointed(), 3);
    }

    #[test]
    fn test_fast_tick_emits_each_skipped_segment() {
        let tuning = SpinTuning {
            spin_velocity: 2.5,
            ..SpinTuning::default()
        };
        let mut c = SpinController::new(PrizeRegistry::default(), tuning);
        c.start();
        c.tick(1.0 / 60.0);
        // 2.5 rad from angle 0 passes two boundaries (at 0.524 and 1.571)
        assert_eq!(boundaries(c.drain_events()), vec![3, 2]);
        assert_eq!(c.pointed(), 2);
    }

    #[test]
    fn test_single_segment_never_emits_boundaries() {
        let only = PrizeRegistry::new(vec![crate::wheel::PrizeEntry::new("all", 1.0)]).unwrap();
        let mut c = SpinController::new(only, SpinTuning::default());
        c.start();
        c.stop(&mut ReplayRandom::new(vec![0.5]));
        run_to_rest(&mut c);
        assert!(boundaries(c.drain_events()).is_empty());
        assert_eq!(c.last_result().unwrap().index, 0);
    }

    #[test]
    fn test_replace_prizes_waits_for_idle() {
        let mut c = controller();
        let two = PrizeRegistry::new(vec![
            crate::wheel::PrizeEntry::new("a", 0.5),
            crate::wheel::PrizeEntry::new("b", 0.5),
        ])
        .unwrap();
        c.start();
        assert!(!c.replace_prizes(two.clone()));
        assert_eq!(c.prizes().len(), 6);
        c.stop(&mut ReplayRandom::new(vec![0.99]));
        run_to_rest(&mut c);
        assert_eq!(c.last_result().unwrap().index, 5);
        assert_eq!(c.prizes(), &two);

        c.cancel_announcement();
        assert!(c.replace_prizes(PrizeRegistry::default()));
    }

    #[test]
    fn test_deceleration_terminates_within_bound() {
        let tuning = SpinTuning::default();
        let mut worst = 0;
        let mut remaining = 0.011;
        while remaining <= 6.0 * TAU {
            worst = worst.max(ticks_to_land(remaining, &tuning));
            remaining *= 1.1;
        }
        assert!(worst > 0);
        assert!(worst < 200, "worst case {worst} ticks");
        assert_eq!(ticks_to_land(0.005, &tuning), 0);
    }

    #[test]
    fn test_decelerate_velocity_floor_and_cap() {
        let tuning = SpinTuning::default();
        assert!((decelerate_velocity(10.0, &tuning) - 0.6).abs() < 1e-12);
        assert_eq!(decelerate_velocity(0.02, &tuning), 0.002);
        assert_eq!(decelerate_velocity(0.001, &tuning), 0.001);
    }
}
