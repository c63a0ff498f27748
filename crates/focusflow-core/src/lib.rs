//! # Focusflow Core Library
//!
//! This library provides the core business logic for Focusflow, a
//! personal productivity tool combining a to-do list, period-based goal
//! tracking, a Pomodoro-style focus timer, and AI-assisted task
//! prioritization. All operations are available via a standalone CLI
//! binary; any other front end is a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine that requires the
//!   caller to invoke `tick()` once per second for progress updates;
//!   timer state is never persisted
//! - **Task / Goal Stores**: in-memory collections mirrored to a SQLite
//!   key-value store on every mutation
//! - **Prioritizer**: one-shot generative-language call that reorders
//!   the task list by relevance to the active goals
//! - **Storage**: SQLite-based local state and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`TaskStore`] / [`GoalStore`]: persisted user state
//! - [`Prioritizer`]: external ranking call
//! - [`Database`] / [`Config`]: persistence and configuration

pub mod error;
pub mod events;
pub mod goal;
pub mod prioritize;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, PrioritizeError, ValidationError};
pub use events::Event;
pub use goal::{CompletedGoal, GoalPeriod, GoalStore};
pub use prioritize::Prioritizer;
pub use storage::{Config, Database, SessionRecord, Stats};
pub use task::{TaskStore, TodoItem, WILDCARD_CATEGORY};
pub use timer::{Phase, PhaseDurations, TimerEngine, TimerState};
