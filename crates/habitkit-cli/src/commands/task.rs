//! Habit task management commands for the CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use habitkit_core::{preset, Calendar, Database, FrequencyType, GoalType, HabitTask};
use serde::Serialize;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new habit task
    Add {
        /// Task title
        title: String,
        /// Category label
        #[arg(long)]
        category: Option<String>,
        /// Goal type: none, repetitions, time, cups, calories, distance, weight, capacity
        #[arg(long)]
        goal_type: Option<String>,
        /// Goal magnitude (requires --goal-type)
        #[arg(long)]
        goal_value: Option<f64>,
        /// Goal unit (requires --goal-type)
        #[arg(long)]
        goal_unit: Option<String>,
        /// Frequency: daily, specificDays, everyWeek
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Comma-separated ISO weekdays (1=Mon .. 7=Sun) for specificDays
        #[arg(long)]
        days: Option<String>,
        /// Completions required per scheduled day
        #[arg(long, default_value = "1")]
        times_per_day: u32,
        /// Pre-fill from a preset catalog id (e.g. "fitness.run")
        #[arg(long)]
        preset: Option<String>,
    },
    /// List tasks
    List,
    /// Show one task with its full completion log
    Get {
        /// Task ID (or unambiguous prefix)
        id: String,
    },
    /// Delete a task and its completions
    Delete {
        /// Task ID (or unambiguous prefix)
        id: String,
    },
    /// Mark a task completed once
    Done {
        /// Task ID (or unambiguous prefix)
        id: String,
        /// Value logged toward the goal
        #[arg(long)]
        value: Option<f64>,
        /// Day to log the completion on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove all completions on one day
    Undo {
        /// Task ID (or unambiguous prefix)
        id: String,
        /// Day to clear (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Compact row for `task list` output.
#[derive(Serialize)]
struct TaskSummary {
    id: String,
    title: String,
    category: Option<String>,
    frequency: &'static str,
    times_per_day: u32,
    goal_type: &'static str,
    completion_count: usize,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let cal = Calendar::utc();
    let now = Utc::now();

    match action {
        TaskAction::Add {
            title,
            category,
            goal_type,
            goal_value,
            goal_unit,
            frequency,
            days,
            times_per_day,
            preset,
        } => {
            let mut task = match preset.as_deref() {
                Some(id) => preset::find(id)
                    .ok_or_else(|| format!("unknown preset: {id}"))?
                    .instantiate(now),
                None => HabitTask::new(title.clone(), now),
            };
            if preset.is_some() {
                task.title = title;
            }
            if let Some(goal_type) = goal_type.as_deref() {
                task.goal_type = GoalType::parse(goal_type)
                    .ok_or_else(|| format!("unknown goal type: {goal_type}"))?;
                task.goal_value = goal_value;
                task.goal_unit = goal_unit;
            }
            task.frequency_type = FrequencyType::parse(&frequency)
                .ok_or_else(|| format!("unknown frequency: {frequency}"))?;
            if let Some(days) = days {
                task.scheduled_days = days
                    .split(',')
                    .map(|d| d.trim().parse::<u8>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| format!("cannot parse --days '{days}'"))?;
            }
            task.times_per_day = times_per_day;
            if category.is_some() {
                task.category = category;
            }
            task.validate()?;
            db.insert_task(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            let summaries: Vec<TaskSummary> = db
                .list_tasks()?
                .iter()
                .map(|t| TaskSummary {
                    id: t.id.to_string(),
                    title: t.title.clone(),
                    category: t.category.clone(),
                    frequency: t.frequency_type.as_str(),
                    times_per_day: t.times_per_day,
                    goal_type: t.goal_type.as_str(),
                    completion_count: t.completions.len(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        TaskAction::Get { id } => {
            let task = super::resolve_task(&db, &id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            let task = super::resolve_task(&db, &id)?;
            db.delete_task(task.id)?;
            println!("Task deleted: {}", task.id);
        }
        TaskAction::Done { id, value, date } => {
            let task = super::resolve_task(&db, &id)?;
            let at = match date {
                // Log manual entries at local noon of the chosen day
                Some(date) => {
                    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
                    cal.day_start(day) + chrono::Duration::hours(12)
                }
                None => now,
            };
            let completion = db.record_completion(task.id, at, value)?;
            println!("{}", serde_json::to_string_pretty(&completion)?);
        }
        TaskAction::Undo { id, date } => {
            let task = super::resolve_task(&db, &id)?;
            let day = match date {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")?,
                None => cal.local_date(now),
            };
            let removed = db.remove_completions_on(task.id, day, &cal)?;
            println!("Removed {removed} completion(s) on {day}");
        }
    }
    Ok(())
}
