//! Session statistics commands for CLI.

use clap::Subcommand;
use focusflow_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's completed phases
    Today,
    /// All-time statistics
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = match action {
        StatsAction::Today => db.stats_today()?,
        StatsAction::All => db.stats_all()?,
    };
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
