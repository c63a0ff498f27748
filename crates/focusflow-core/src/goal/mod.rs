//! Goal slots and the completed-goals log.
//!
//! One slot per period (yearly/monthly/weekly/daily), each holding at
//! most one active goal text. Slots are persisted as plain text under
//! their own keys, empty string meaning "no active goal"; the completed
//! log is an append-only JSON list under `completedGoals`. Every
//! mutation persists both before returning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::events::Event;
use crate::storage::{keys, Database};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl GoalPeriod {
    /// Fixed period order used everywhere goals are enumerated.
    pub const ALL: [GoalPeriod; 4] = [
        GoalPeriod::Yearly,
        GoalPeriod::Monthly,
        GoalPeriod::Weekly,
        GoalPeriod::Daily,
    ];

    /// Display label for the period.
    pub fn label(self) -> &'static str {
        match self {
            GoalPeriod::Yearly => "Yearly",
            GoalPeriod::Monthly => "Monthly",
            GoalPeriod::Weekly => "Weekly",
            GoalPeriod::Daily => "Daily",
        }
    }

    /// Key-value store key for this period's slot.
    pub fn storage_key(self) -> &'static str {
        match self {
            GoalPeriod::Yearly => keys::YEARLY_GOAL,
            GoalPeriod::Monthly => keys::MONTHLY_GOAL,
            GoalPeriod::Weekly => keys::WEEKLY_GOAL,
            GoalPeriod::Daily => keys::DAILY_GOAL,
        }
    }

    fn index(self) -> usize {
        match self {
            GoalPeriod::Yearly => 0,
            GoalPeriod::Monthly => 1,
            GoalPeriod::Weekly => 2,
            GoalPeriod::Daily => 3,
        }
    }
}

impl std::fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for GoalPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yearly" => Ok(GoalPeriod::Yearly),
            "monthly" => Ok(GoalPeriod::Monthly),
            "weekly" => Ok(GoalPeriod::Weekly),
            "daily" => Ok(GoalPeriod::Daily),
            other => Err(format!(
                "unknown period '{other}' (expected yearly, monthly, weekly or daily)"
            )),
        }
    }
}

/// A goal that was completed, copied out of its slot. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGoal {
    pub id: Uuid,
    pub title: String,
    pub period: GoalPeriod,
    pub completed_at: DateTime<Utc>,
}

/// The four goal slots plus the completed log.
#[derive(Debug, Default)]
pub struct GoalStore {
    slots: [String; 4],
    completed: Vec<CompletedGoal>,
}

impl GoalStore {
    /// Load slots and the completed log from storage.
    ///
    /// Missing keys are empty slots; an undecodable completed log is
    /// treated as empty.
    pub fn load(db: &Database) -> Result<Self> {
        let mut slots: [String; 4] = Default::default();
        for period in GoalPeriod::ALL {
            slots[period.index()] = db.kv_get(period.storage_key())?.unwrap_or_default();
        }
        let completed = match db.kv_get(keys::COMPLETED_GOALS)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "discarding undecodable completed-goals log");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { slots, completed })
    }

    /// The active goal text for a period, if any.
    pub fn goal(&self, period: GoalPeriod) -> Option<&str> {
        let text = self.slots[period.index()].as_str();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Non-empty slot texts in fixed period order
    /// (yearly, monthly, weekly, daily).
    pub fn active_goals(&self) -> Vec<String> {
        GoalPeriod::ALL
            .iter()
            .filter_map(|&p| self.goal(p).map(str::to_string))
            .collect()
    }

    pub fn completed(&self) -> &[CompletedGoal] {
        &self.completed
    }

    /// Overwrite a period's slot. Rejected (returns `Ok(None)`, no state
    /// change) when the text is empty. No history is kept of a goal that
    /// is overwritten without being completed.
    pub fn set(&mut self, db: &Database, period: GoalPeriod, text: &str) -> Result<Option<Event>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.slots[period.index()] = text.to_string();
        self.persist(db)?;
        Ok(Some(Event::GoalSet {
            period,
            title: text.to_string(),
            at: Utc::now(),
        }))
    }

    /// Move a period's active goal to the completed log and clear the
    /// slot. No-op when the slot is empty.
    pub fn complete(&mut self, db: &Database, period: GoalPeriod) -> Result<Option<Event>> {
        let Some(title) = self.goal(period).map(str::to_string) else {
            return Ok(None);
        };
        let record = CompletedGoal {
            id: Uuid::new_v4(),
            title: title.clone(),
            period,
            completed_at: Utc::now(),
        };
        let id = record.id;
        self.completed.push(record);
        self.slots[period.index()].clear();
        self.persist(db)?;
        Ok(Some(Event::GoalCompleted {
            id,
            period,
            title,
            at: Utc::now(),
        }))
    }

    fn persist(&self, db: &Database) -> Result<()> {
        for period in GoalPeriod::ALL {
            db.kv_set(period.storage_key(), &self.slots[period.index()])?;
        }
        let json = serde_json::to_string(&self.completed)?;
        db.kv_set(keys::COMPLETED_GOALS, &json)?;
        Ok(())
    }
}
