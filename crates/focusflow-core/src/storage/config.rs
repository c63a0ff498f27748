//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timer phase durations
//! - Task category labels
//! - Prioritizer model and endpoint
//! - Notification preferences
//!
//! Configuration is stored at `~/.config/focusflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::PhaseDurations;

/// Timer phase durations in whole minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
}

/// Task category labels. The wildcard "All" selector is implicit and is
/// never a storable category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// Prioritizer service configuration. The API key is read from the
/// GEMINI_API_KEY environment variable, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizerConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Notification configuration. Drives the CLI warning banner only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub prioritizer: PrioritizerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_work_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    5
}
fn default_categories() -> Vec<String> {
    vec!["Personal".into(), "Work".into(), "Others".into()]
}
fn default_category() -> String {
    "Personal".into()
}
fn default_model() -> String {
    "gemini-pro".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: default_category(),
        }
    }
}

impl Default for PrioritizerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Phase durations derived from the timer section.
    pub fn durations(&self) -> Result<PhaseDurations, ConfigError> {
        PhaseDurations::from_minutes(self.timer.work_minutes, self.timer.break_minutes).map_err(
            |e| ConfigError::InvalidValue {
                key: "timer".into(),
                message: e.to_string(),
            },
        )
    }

    /// Set a known config key from its string representation and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "timer.work_minutes" => {
                self.timer.work_minutes = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as a number of minutes"))
                })?;
            }
            "timer.break_minutes" => {
                self.timer.break_minutes = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as a number of minutes"))
                })?;
            }
            "tasks.categories" => {
                let categories: Vec<String> = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if categories.is_empty() {
                    return Err(invalid("category list is empty".into()));
                }
                self.tasks.categories = categories;
            }
            "tasks.default_category" => {
                if value.trim().is_empty() {
                    return Err(invalid("category is empty".into()));
                }
                self.tasks.default_category = value.trim().to_string();
            }
            "prioritizer.model" => {
                self.prioritizer.model = value.to_string();
            }
            "prioritizer.base_url" => {
                url::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
                self.prioritizer.base_url = value.trim_end_matches('/').to_string();
            }
            "notifications.enabled" => {
                self.notifications.enabled = value
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a boolean")))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.work_minutes, 25);
        assert_eq!(parsed.timer.break_minutes, 5);
        assert_eq!(parsed.tasks.default_category, "Personal");
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn missing_sections_get_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 50);
        assert_eq!(parsed.timer.break_minutes, 5);
        assert_eq!(parsed.prioritizer.model, "gemini-pro");
    }

    #[test]
    fn durations_follow_timer_section() {
        let mut cfg = Config::default();
        cfg.timer.work_minutes = 50;
        cfg.timer.break_minutes = 10;
        let d = cfg.durations().unwrap();
        assert_eq!(d.work_secs, 50 * 60);
        assert_eq!(d.break_secs, 10 * 60);
    }

    #[test]
    fn zero_minutes_rejected() {
        let mut cfg = Config::default();
        cfg.timer.work_minutes = 0;
        assert!(cfg.durations().is_err());
    }
}
