//! Integration tests for on-disk persistence.
//!
//! These tests verify that task and goal state written through the
//! stores survives a full close/reopen cycle of the database file with
//! every field intact.

use chrono::NaiveDate;
use focusflow_core::goal::{GoalPeriod, GoalStore};
use focusflow_core::storage::Database;
use focusflow_core::task::TaskStore;

#[test]
fn task_list_roundtrips_through_db_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusflow.db");

    let saved = {
        let db = Database::open_at(&path).unwrap();
        let mut tasks = TaskStore::load(&db).unwrap();
        tasks
            .add(
                &db,
                "Write report",
                "Work",
                Some("bring the charts".to_string()),
                NaiveDate::from_ymd_opt(2026, 9, 1),
            )
            .unwrap();
        tasks.add(&db, "Walk the dog", "Personal", None, None).unwrap();
        let id = tasks.items()[1].id;
        tasks.toggle_completion(&db, id).unwrap();
        tasks.items().to_vec()
    };

    let db = Database::open_at(&path).unwrap();
    let reloaded = TaskStore::load(&db).unwrap();

    // Every field must survive, including optional presence/absence.
    assert_eq!(reloaded.items(), saved.as_slice());
    assert_eq!(
        reloaded.items()[0].note.as_deref(),
        Some("bring the charts")
    );
    assert_eq!(
        reloaded.items()[0].deadline,
        NaiveDate::from_ymd_opt(2026, 9, 1)
    );
    assert!(reloaded.items()[1].note.is_none());
    assert!(reloaded.items()[1].deadline.is_none());
    assert!(reloaded.items()[1].completed);
}

#[test]
fn goal_slots_and_log_roundtrip_through_db_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusflow.db");

    let completed = {
        let db = Database::open_at(&path).unwrap();
        let mut goals = GoalStore::load(&db).unwrap();
        goals.set(&db, GoalPeriod::Yearly, "Run a marathon").unwrap();
        goals.set(&db, GoalPeriod::Daily, "Write report").unwrap();
        goals.complete(&db, GoalPeriod::Daily).unwrap();
        goals.completed().to_vec()
    };

    let db = Database::open_at(&path).unwrap();
    let reloaded = GoalStore::load(&db).unwrap();

    assert_eq!(reloaded.goal(GoalPeriod::Yearly), Some("Run a marathon"));
    assert_eq!(reloaded.goal(GoalPeriod::Daily), None);
    assert_eq!(reloaded.active_goals(), vec!["Run a marathon"]);
    assert_eq!(reloaded.completed(), completed.as_slice());
}

#[test]
fn fresh_database_yields_empty_stores() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("fresh.db")).unwrap();
    assert!(TaskStore::load(&db).unwrap().is_empty());
    let goals = GoalStore::load(&db).unwrap();
    assert!(goals.active_goals().is_empty());
    assert!(goals.completed().is_empty());
}
