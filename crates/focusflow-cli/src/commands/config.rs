//! Configuration management commands for CLI.

use clap::Subcommand;
use focusflow_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as TOML
    Show,
    /// Set a configuration key
    /// (timer.work_minutes, timer.break_minutes, tasks.categories,
    /// tasks.default_category, prioritizer.model, prioritizer.base_url,
    /// notifications.enabled)
    Set { key: String, value: String },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
