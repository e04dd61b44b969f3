pub mod config;
pub mod seed;
pub mod stats;
pub mod task;
pub mod units;

use habitkit_core::{Database, HabitTask};
use uuid::Uuid;

/// Resolve a task from a full UUID or an unambiguous id prefix.
pub(crate) fn resolve_task(db: &Database, id: &str) -> Result<HabitTask, Box<dyn std::error::Error>> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return db
            .get_task(uuid)?
            .ok_or_else(|| format!("no task with id {id}").into());
    }

    let mut matches: Vec<HabitTask> = db
        .list_tasks()?
        .into_iter()
        .filter(|t| t.id.to_string().starts_with(id))
        .collect();

    if matches.len() > 1 {
        return Err(format!("id prefix {id} is ambiguous ({} matches)", matches.len()).into());
    }
    matches
        .pop()
        .ok_or_else(|| format!("no task with id {id}").into())
}
