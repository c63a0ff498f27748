//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! once per second while the countdown runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle
//! ```
//!
//! When a phase runs down to zero the engine flips to the other phase
//! (work <-> break) and keeps running; no user action is required.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(durations);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseCompleted) on a flip
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{Phase, PhaseDurations};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Never persisted -- timer state lives only for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    durations: PhaseDurations,
    state: TimerState,
    phase: Phase,
    /// Seconds elapsed within the current phase. Never exceeds the
    /// phase duration.
    elapsed_secs: u64,
}

impl TimerEngine {
    /// Create a new timer engine with the given phase durations.
    ///
    /// Starts in the `Idle` state on the work phase.
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            state: TimerState::Idle,
            phase: Phase::Work,
            elapsed_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.for_phase(self.phase)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.total_secs().saturating_sub(self.elapsed_secs)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn fraction_passed(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        self.elapsed_secs as f64 / total as f64
    }

    /// Remaining time formatted as mm:ss.
    pub fn seconds_left_string(&self) -> String {
        let remaining = self.remaining_secs();
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            fraction_passed: self.fraction_passed(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running. No-op in any other state.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.phase = Phase::Work;
                self.elapsed_secs = 0;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    duration_secs: self.total_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Running -> Paused. No-op in any other state.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Paused -> Running, continuing from the frozen elapsed time.
    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Any state -> Idle, back to the start of the work phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.phase = Phase::Work;
        self.elapsed_secs = 0;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance one second of countdown. Call once per wall-clock second.
    ///
    /// Returns `Some(Event::PhaseCompleted)` when the current phase runs
    /// out; the engine flips to the other phase and keeps running.
    /// No-op while Idle or Paused.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.total_secs() {
            let finished = self.phase;
            let duration_secs = self.total_secs();
            self.phase = finished.next();
            self.elapsed_secs = 0;
            return Some(Event::PhaseCompleted {
                phase: finished,
                next_phase: self.phase,
                duration_secs,
                at: Utc::now(),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(work_secs: u64, break_secs: u64) -> TimerEngine {
        TimerEngine::new(PhaseDurations::new(work_secs, break_secs).unwrap())
    }

    #[test]
    fn start_pause_resume() {
        let mut e = engine(10, 5);
        assert_eq!(e.state(), TimerState::Idle);

        assert!(e.start().is_some());
        assert_eq!(e.state(), TimerState::Running);

        assert!(e.pause().is_some());
        assert_eq!(e.state(), TimerState::Paused);

        assert!(e.resume().is_some());
        assert_eq!(e.state(), TimerState::Running);
    }

    #[test]
    fn undefined_transitions_are_noops() {
        let mut e = engine(10, 5);
        assert!(e.pause().is_none());
        assert!(e.resume().is_none());

        e.start();
        e.tick();
        let elapsed = e.elapsed_secs();
        assert!(e.start().is_none());
        assert!(e.resume().is_none());
        assert_eq!(e.elapsed_secs(), elapsed);
        assert_eq!(e.state(), TimerState::Running);
    }

    #[test]
    fn ticks_flip_phase_exactly_once() {
        let mut e = engine(3, 2);
        e.start();
        let mut flips = 0;
        for _ in 0..3 {
            if e.tick().is_some() {
                flips += 1;
            }
        }
        assert_eq!(flips, 1);
        assert_eq!(e.phase(), Phase::Break);
        assert_eq!(e.elapsed_secs(), 0);
        assert_eq!(e.state(), TimerState::Running);
    }

    #[test]
    fn countdown_continues_through_break_back_to_work() {
        let mut e = engine(2, 1);
        e.start();
        e.tick();
        let completed = e.tick();
        assert!(matches!(
            completed,
            Some(Event::PhaseCompleted {
                phase: Phase::Work,
                next_phase: Phase::Break,
                ..
            })
        ));
        let completed = e.tick();
        assert!(matches!(
            completed,
            Some(Event::PhaseCompleted {
                phase: Phase::Break,
                next_phase: Phase::Work,
                ..
            })
        ));
        assert_eq!(e.state(), TimerState::Running);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut e = engine(10, 5);
        e.start();
        e.tick();
        e.tick();
        e.pause();
        for _ in 0..20 {
            assert!(e.tick().is_none());
        }
        assert_eq!(e.elapsed_secs(), 2);
    }

    #[test]
    fn reset_from_any_state() {
        let mut e = engine(10, 5);
        e.start();
        e.tick();
        e.reset();
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.phase(), Phase::Work);
        assert_eq!(e.elapsed_secs(), 0);

        e.start();
        e.pause();
        e.reset();
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.phase(), Phase::Work);
        assert_eq!(e.elapsed_secs(), 0);
    }

    #[test]
    fn display_outputs() {
        let mut e = engine(90, 30);
        assert_eq!(e.seconds_left_string(), "01:30");
        assert_eq!(e.fraction_passed(), 0.0);

        e.start();
        e.tick();
        assert_eq!(e.seconds_left_string(), "01:29");
        assert!((e.fraction_passed() - 1.0 / 90.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reports_idle_work() {
        let e = engine(25 * 60, 5 * 60);
        match e.snapshot() {
            Event::StateSnapshot {
                state,
                phase,
                remaining_secs,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(phase, Phase::Work);
                assert_eq!(remaining_secs, 25 * 60);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
