//! Statistics commands: per-task and general numbers over a day window.

use chrono::Utc;
use clap::Subcommand;
use habitkit_core::{
    filter_by_category, Calendar, Database, Settings, StatsAnalyzer, StatsWindow,
    StreakCalculator, TrendPoint,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Counts, percentage, and streak for one task
    Show {
        /// Task ID (or unambiguous prefix)
        id: String,
        /// Window length in days, ending today
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// Trend series for one task
    Trend {
        /// Task ID (or unambiguous prefix)
        id: String,
        /// Window length in days, ending today
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// Current streak for one task
    Streak {
        /// Task ID (or unambiguous prefix)
        id: String,
    },
    /// Aggregated stats across all tasks
    General {
        /// Restrict to one category label
        #[arg(long)]
        category: Option<String>,
        /// Window length in days, ending today
        #[arg(long, default_value = "30")]
        days: u32,
    },
}

#[derive(Serialize)]
struct TaskStats {
    id: String,
    title: String,
    window_start: String,
    window_end: String,
    completion_count: u32,
    expected_completions: u32,
    completion_percentage: f64,
    current_streak: u32,
}

#[derive(Serialize)]
struct StreakOutput {
    id: String,
    title: String,
    current_streak: u32,
}

#[derive(Serialize)]
struct TrendOutput {
    id: String,
    title: String,
    points: Vec<TrendPoint>,
}

#[derive(Serialize)]
struct GeneralStats {
    task_count: usize,
    category: Option<String>,
    window_start: String,
    window_end: String,
    completion_count: u32,
    average_completion_percentage: f64,
    trend: Vec<TrendPoint>,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let settings = Settings::load()?;
    let cal = Calendar::utc();
    let analyzer = StatsAnalyzer::with_settings(cal.clone(), settings.week_start());
    let now = Utc::now();

    match action {
        StatsAction::Show { id, days } => {
            let task = super::resolve_task(&db, &id)?;
            let window = StatsWindow::last_days(&cal, now, days);
            let streak = StreakCalculator::with_calendar(cal.clone());
            let stats = TaskStats {
                id: task.id.to_string(),
                title: task.title.clone(),
                window_start: window.start.to_rfc3339(),
                window_end: window.end.to_rfc3339(),
                completion_count: analyzer.completion_count(&task, window.start, window.end),
                expected_completions: analyzer
                    .expected_completions(&task, window.start, window.end),
                completion_percentage: analyzer
                    .completion_percentage(&task, window.start, window.end),
                current_streak: streak.current_streak(&task, now),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Trend { id, days } => {
            let task = super::resolve_task(&db, &id)?;
            let window = StatsWindow::last_days(&cal, now, days);
            let output = TrendOutput {
                id: task.id.to_string(),
                title: task.title.clone(),
                points: analyzer.trend_series(&task, window.start, window.end),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StatsAction::Streak { id } => {
            let task = super::resolve_task(&db, &id)?;
            let streak = StreakCalculator::with_calendar(cal.clone());
            let output = StreakOutput {
                id: task.id.to_string(),
                title: task.title.clone(),
                current_streak: streak.current_streak(&task, now),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StatsAction::General { category, days } => {
            let tasks = db.list_tasks()?;
            let selected: Vec<_> =
                filter_by_category(&tasks, category.as_deref()).collect();
            let window = StatsWindow::last_days(&cal, now, days);
            let output = GeneralStats {
                task_count: selected.len(),
                category: category.clone(),
                window_start: window.start.to_rfc3339(),
                window_end: window.end.to_rfc3339(),
                completion_count: analyzer.total_completion_count(
                    selected.iter().copied(),
                    window.start,
                    window.end,
                ),
                average_completion_percentage: analyzer.average_completion_percentage(
                    selected.iter().copied(),
                    window.start,
                    window.end,
                ),
                trend: analyzer.trend_series_for_all(
                    selected.iter().copied(),
                    window.start,
                    window.end,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
