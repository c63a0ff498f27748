//! Focus timer command.
//!
//! Timer state lives only for the lifetime of this process; nothing is
//! persisted across restarts except the completed-phase session log.

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use focusflow_core::storage::{Config, Database};
use focusflow_core::timer::{PhaseDurations, TimerEngine};
use focusflow_core::Event;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the work/break countdown in the foreground
    Run {
        /// Work phase length in minutes (defaults to the configured value)
        #[arg(long)]
        work: Option<u64>,
        /// Break phase length in minutes (defaults to the configured value)
        #[arg(long = "break")]
        break_minutes: Option<u64>,
        /// Stop after this many completed phases (runs until Ctrl-C otherwise)
        #[arg(long)]
        phases: Option<u64>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            work,
            break_minutes,
            phases,
        } => run_countdown(work, break_minutes, phases),
    }
}

fn run_countdown(
    work: Option<u64>,
    break_minutes: Option<u64>,
    phases: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if !config.notifications.enabled {
        eprintln!("warning: notifications are disabled; phase changes appear only in this terminal");
    }

    let durations = PhaseDurations::from_minutes(
        work.unwrap_or(config.timer.work_minutes),
        break_minutes.unwrap_or(config.timer.break_minutes),
    )?;

    let db = Database::open()?;
    let mut engine = TimerEngine::new(durations);
    let mut phase_started = Utc::now();
    let mut completed: u64 = 0;

    if let Some(event) = engine.start() {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    loop {
        std::thread::sleep(Duration::from_secs(1));
        if let Some(Event::PhaseCompleted {
            phase,
            duration_secs,
            ..
        }) = engine.tick()
        {
            let now = Utc::now();
            db.record_session(phase, phase.label(), duration_secs, phase_started, now)?;
            phase_started = now;
            completed += 1;
            println!();
            println!("{} phase complete ({completed} so far)", phase.label());
            if phases.is_some_and(|max| completed >= max) {
                break;
            }
        }
        print!(
            "\r{} {}  {:3.0}%  ",
            engine.phase().label(),
            engine.seconds_left_string(),
            engine.fraction_passed() * 100.0
        );
        std::io::stdout().flush()?;
    }
    println!();
    Ok(())
}
