//! Goal management commands for CLI.

use clap::Subcommand;
use focusflow_core::goal::{GoalPeriod, GoalStore};
use focusflow_core::storage::Database;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set the active goal for a period (yearly, monthly, weekly, daily)
    Set {
        period: GoalPeriod,
        /// Goal text
        text: String,
    },
    /// Complete the active goal for a period, moving it to the log
    Complete { period: GoalPeriod },
    /// Show the active goals
    List,
    /// Show the completed-goals log
    Completed,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut goals = GoalStore::load(&db)?;

    match action {
        GoalAction::Set { period, text } => match goals.set(&db, period, &text)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("Goal rejected: text must be non-empty"),
        },
        GoalAction::Complete { period } => match goals.complete(&db, period)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("No active {period} goal to complete"),
        },
        GoalAction::List => {
            for period in GoalPeriod::ALL {
                match goals.goal(period) {
                    Some(text) => println!("[{period}] {text}"),
                    None => println!("[{period}] -"),
                }
            }
        }
        GoalAction::Completed => {
            if goals.completed().is_empty() {
                println!("No completed goals yet.");
            } else {
                println!("{}", serde_json::to_string_pretty(goals.completed())?);
            }
        }
    }
    Ok(())
}
