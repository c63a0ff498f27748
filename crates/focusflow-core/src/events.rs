use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::goal::GoalPeriod;
use crate::timer::{Phase, TimerState};

/// Every state change in the system produces an Event.
/// The CLI prints them; the timer loop reacts to phase completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero; the engine rolled into `next_phase`.
    PhaseCompleted {
        phase: Phase,
        next_phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Phase,
        remaining_secs: u64,
        total_secs: u64,
        fraction_passed: f64,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: Uuid,
        title: String,
        category: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: Uuid,
        completed: bool,
        at: DateTime<Utc>,
    },
    TasksDeleted {
        ids: Vec<Uuid>,
        at: DateTime<Utc>,
    },
    /// Result of applying a priority ordering to the task list.
    TasksPrioritized {
        matched: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    GoalSet {
        period: GoalPeriod,
        title: String,
        at: DateTime<Utc>,
    },
    GoalCompleted {
        id: Uuid,
        period: GoalPeriod,
        title: String,
        at: DateTime<Utc>,
    },
}
