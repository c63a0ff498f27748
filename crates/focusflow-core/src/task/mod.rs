//! Task records and the task store.
//!
//! The store keeps the full task list in memory in insertion order and
//! mirrors it to the `todoItems` key of the key-value store on every
//! mutation, before the mutating call returns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::events::Event;
use crate::storage::{keys, Database};

/// The "All" filter selector. Matches every category and is never a
/// storable task category.
pub const WILDCARD_CATEGORY: &str = "All";

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, immutable for the record's lifetime.
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub note: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Category label. Never empty.
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            note: None,
            deadline: None,
            category: category.into(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory ordered task collection, persisted on every mutation.
#[derive(Debug, Default)]
pub struct TaskStore {
    items: Vec<TodoItem>,
}

impl TaskStore {
    /// Load the task list from the `todoItems` key.
    ///
    /// Missing or undecodable data yields an empty store.
    pub fn load(db: &Database) -> Result<Self> {
        let items = match db.kv_get(keys::TODO_ITEMS)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "discarding undecodable task list");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { items })
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All titles in store order, for the prioritizer prompt.
    pub fn titles(&self) -> Vec<String> {
        self.items.iter().map(|i| i.title.clone()).collect()
    }

    /// Append a new task. Rejected (returns `Ok(None)`, no state change)
    /// when the title is empty or the category is the wildcard selector.
    pub fn add(
        &mut self,
        db: &Database,
        title: &str,
        category: &str,
        note: Option<String>,
        deadline: Option<NaiveDate>,
    ) -> Result<Option<Event>> {
        if title.trim().is_empty() || category.trim().is_empty() || category == WILDCARD_CATEGORY {
            return Ok(None);
        }
        let mut item = TodoItem::new(title, category);
        item.note = note;
        item.deadline = deadline;
        let event = Event::TaskAdded {
            id: item.id,
            title: item.title.clone(),
            category: item.category.clone(),
            at: Utc::now(),
        };
        self.items.push(item);
        self.persist(db)?;
        Ok(Some(event))
    }

    /// Flip the completion flag of the record with the given id.
    /// No-op when the id is not in the store.
    pub fn toggle_completion(&mut self, db: &Database, id: Uuid) -> Result<Option<Event>> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        item.completed = !item.completed;
        let event = Event::TaskToggled {
            id,
            completed: item.completed,
            at: Utc::now(),
        };
        self.persist(db)?;
        Ok(Some(event))
    }

    /// Records whose category matches (wildcard matches any) and whose
    /// completion flag equals `completed`, in insertion order.
    pub fn filter<'a>(
        &'a self,
        category: &'a str,
        completed: bool,
    ) -> impl Iterator<Item = &'a TodoItem> + 'a {
        self.items.iter().filter(move |item| {
            (category == WILDCARD_CATEGORY || item.category == category)
                && item.completed == completed
        })
    }

    /// Delete the records at the given positions in the filtered view
    /// defined by (category, completed).
    ///
    /// Positions are view-relative: they are resolved to record ids
    /// through the filter before anything is removed, so a record hidden
    /// by the filter is never deleted by accident. Out-of-range positions
    /// are ignored.
    pub fn delete_filtered(
        &mut self,
        db: &Database,
        category: &str,
        completed: bool,
        indices: &[usize],
    ) -> Result<Option<Event>> {
        let view: Vec<Uuid> = self.filter(category, completed).map(|i| i.id).collect();
        let mut ids: Vec<Uuid> = Vec::new();
        for &idx in indices {
            if let Some(&id) = view.get(idx) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        if ids.is_empty() {
            return Ok(None);
        }
        self.items.retain(|item| !ids.contains(&item.id));
        self.persist(db)?;
        Ok(Some(Event::TasksDeleted {
            ids,
            at: Utc::now(),
        }))
    }

    /// Reorder the full list so that records whose title appears in
    /// `ordered_titles` come first, in the given order; everything else
    /// follows in its original relative order.
    ///
    /// The sort is stable and keyed by position-in-`ordered_titles`
    /// (absent titles sort last), so duplicate titles keep their
    /// relative order and an empty or non-matching ordering leaves the
    /// list unchanged.
    pub fn apply_priority_order(&mut self, db: &Database, ordered_titles: &[String]) -> Result<Event> {
        let position = |title: &str| {
            ordered_titles
                .iter()
                .position(|t| t == title)
                .unwrap_or(ordered_titles.len())
        };
        let matched = self
            .items
            .iter()
            .filter(|i| position(&i.title) < ordered_titles.len())
            .count();
        self.items.sort_by_key(|item| position(&item.title));
        self.persist(db)?;
        Ok(Event::TasksPrioritized {
            matched,
            total: self.items.len(),
            at: Utc::now(),
        })
    }

    fn persist(&self, db: &Database) -> Result<()> {
        let json = serde_json::to_string(&self.items)?;
        db.kv_set(keys::TODO_ITEMS, &json)?;
        Ok(())
    }
}
