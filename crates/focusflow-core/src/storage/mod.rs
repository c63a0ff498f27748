mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, PrioritizerConfig, TasksConfig, TimerConfig};
pub use database::{Database, SessionRecord, Stats};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Storage keys for the string key-value store.
pub mod keys {
    pub const TODO_ITEMS: &str = "todoItems";
    pub const YEARLY_GOAL: &str = "yearlyGoal";
    pub const MONTHLY_GOAL: &str = "monthlyGoal";
    pub const WEEKLY_GOAL: &str = "weeklyGoal";
    pub const DAILY_GOAL: &str = "dailyGoal";
    pub const COMPLETED_GOALS: &str = "completedGoals";
}

/// Returns `~/.config/focusflow[-dev]/` based on FOCUSFLOW_ENV.
///
/// Set FOCUSFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusflow-dev")
    } else {
        base_dir.join("focusflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
