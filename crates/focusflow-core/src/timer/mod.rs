mod engine;
mod phase;

pub use engine::{TimerEngine, TimerState};
pub use phase::{Phase, PhaseDurations};
