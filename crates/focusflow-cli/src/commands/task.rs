//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use focusflow_core::goal::GoalStore;
use focusflow_core::prioritize::Prioritizer;
use focusflow_core::storage::{Config, Database};
use focusflow_core::task::{TaskStore, WILDCARD_CATEGORY};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Category label (defaults to the configured default)
        #[arg(long)]
        category: Option<String>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Filter by category ("All" matches any)
        #[arg(long, default_value = WILDCARD_CATEGORY)]
        category: String,
        /// Show completed instead of open tasks
        #[arg(long)]
        completed: bool,
    },
    /// Toggle completion of a task
    Toggle {
        /// Task ID
        id: Uuid,
    },
    /// Delete tasks by their positions in the filtered view
    Delete {
        /// Filter by category ("All" matches any)
        #[arg(long, default_value = WILDCARD_CATEGORY)]
        category: String,
        /// Operate on the completed view
        #[arg(long)]
        completed: bool,
        /// Zero-based positions within the filtered view
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Reorder tasks by relevance to the active goals
    Prioritize,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut tasks = TaskStore::load(&db)?;

    match action {
        TaskAction::Add {
            title,
            category,
            note,
            deadline,
        } => {
            let category = category.unwrap_or_else(|| config.tasks.default_category.clone());
            match tasks.add(&db, &title, &category, note, deadline)? {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!(
                    "Task rejected: title must be non-empty and category must not be \"{WILDCARD_CATEGORY}\""
                ),
            }
        }
        TaskAction::List {
            category,
            completed,
        } => {
            let filtered: Vec<_> = tasks.filter(&category, completed).collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        TaskAction::Toggle { id } => match tasks.toggle_completion(&db, id)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete {
            category,
            completed,
            indices,
        } => match tasks.delete_filtered(&db, &category, completed, &indices)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("No tasks deleted"),
        },
        TaskAction::Prioritize => prioritize(&config, &db, &mut tasks)?,
    }
    Ok(())
}

/// Ask the generative-language service for a priority ordering and apply
/// it. Any failure leaves the task order unchanged and prints a status
/// message instead.
fn prioritize(
    config: &Config,
    db: &Database,
    tasks: &mut TaskStore,
) -> Result<(), Box<dyn std::error::Error>> {
    if tasks.is_empty() {
        println!("Nothing to prioritize.");
        return Ok(());
    }

    let goals = GoalStore::load(db)?;
    let prioritizer = Prioritizer::from_env(&config.prioritizer)?;
    let runtime = tokio::runtime::Runtime::new()?;

    println!("Prioritizing tasks...");
    match runtime.block_on(prioritizer.rank(&tasks.titles(), &goals.active_goals())) {
        Ok(ordering) => {
            let event = tasks.apply_priority_order(db, &ordering)?;
            println!("Tasks prioritized!");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        Err(e) => {
            println!("Failed to prioritize tasks: {e}");
        }
    }
    Ok(())
}
