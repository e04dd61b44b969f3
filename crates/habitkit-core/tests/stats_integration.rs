//! Integration tests for the statistics workflow.
//!
//! Tests the full path from recording completions in storage to computing
//! streaks, percentages, and trend series from the loaded snapshots,
//! including category filtering and the un-mark-a-day toggle.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use habitkit_core::{
    filter_by_category, Calendar, Database, FrequencyType, HabitTask, StatsAnalyzer, StatsWindow,
    StreakCalculator,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

// 2026-02-09 is a Monday.
fn today() -> DateTime<Utc> {
    at(2026, 2, 9, 12)
}

#[test]
fn full_stats_workflow() {
    let db = Database::open_memory().unwrap();
    let cal = Calendar::utc();

    // A daily habit completed on each of the last three days
    let mut task = HabitTask::new("Meditate", today());
    task.category = Some("Health".to_string());
    db.insert_task(&task).unwrap();
    for day in [7, 8, 9] {
        db.record_completion(task.id, at(2026, 2, day, 8), None)
            .unwrap();
    }

    let snapshot = db.get_task(task.id).unwrap().unwrap();
    let analyzer = StatsAnalyzer::new();
    let window = StatsWindow::last_days(&cal, today(), 30);

    assert_eq!(
        analyzer.completion_count(&snapshot, window.start, window.end),
        3
    );
    // 31 expected days in the window (30 back plus today)
    assert_eq!(
        analyzer.expected_completions(&snapshot, window.start, window.end),
        31
    );

    let pct = analyzer.completion_percentage(&snapshot, window.start, window.end);
    assert!(pct > 0.0 && pct < 100.0);

    let streak = StreakCalculator::new().current_streak(&snapshot, today());
    assert_eq!(streak, 3);

    let trend = analyzer.trend_series(&snapshot, window.start, window.end);
    assert!(trend.len() >= 4 && trend.len() <= 6);
    let total: u32 = trend.iter().map(|p| p.count).sum();
    assert_eq!(total, 3);
}

#[test]
fn unmarking_a_day_updates_streak_and_counts() {
    let db = Database::open_memory().unwrap();
    let cal = Calendar::utc();

    let task = HabitTask::new("Journal", today());
    db.insert_task(&task).unwrap();
    for day in [7, 8, 9] {
        db.record_completion(task.id, at(2026, 2, day, 21), None)
            .unwrap();
    }

    let before = db.get_task(task.id).unwrap().unwrap();
    assert_eq!(StreakCalculator::new().current_streak(&before, today()), 3);

    // Un-mark yesterday; the streak now only covers today
    let feb8 = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
    db.remove_completions_on(task.id, feb8, &cal).unwrap();

    let after = db.get_task(task.id).unwrap().unwrap();
    assert_eq!(after.completions.len(), 2);
    assert_eq!(StreakCalculator::new().current_streak(&after, today()), 1);
}

#[test]
fn general_stats_across_categories() {
    let db = Database::open_memory().unwrap();
    let cal = Calendar::utc();

    let mut run = HabitTask::new("Run", today());
    run.category = Some("Fitness".to_string());
    run.frequency_type = FrequencyType::SpecificDays;
    run.scheduled_days = vec![1, 3, 5];
    db.insert_task(&run).unwrap();

    let mut read = HabitTask::new("Read a book", today());
    read.category = Some("Learning".to_string());
    db.insert_task(&read).unwrap();

    db.record_completion(run.id, at(2026, 2, 6, 7), Some(5.0))
        .unwrap();
    db.record_completion(read.id, at(2026, 2, 6, 22), None).unwrap();
    db.record_completion(read.id, at(2026, 2, 8, 22), None).unwrap();

    let tasks = db.list_tasks().unwrap();
    let analyzer = StatsAnalyzer::new();
    let window = StatsWindow::last_days(&cal, today(), 7);

    let all_count =
        analyzer.total_completion_count(tasks.iter(), window.start, window.end);
    assert_eq!(all_count, 3);

    let fitness_count = analyzer.total_completion_count(
        filter_by_category(&tasks, Some("Fitness")),
        window.start,
        window.end,
    );
    assert_eq!(fitness_count, 1);

    let avg =
        analyzer.average_completion_percentage(tasks.iter(), window.start, window.end);
    assert!((0.0..=100.0).contains(&avg));

    let merged = analyzer.trend_series_for_all(tasks.iter(), window.start, window.end);
    let merged_total: u32 = merged.iter().map(|p| p.count).sum();
    assert_eq!(merged_total, 3);
}

#[test]
fn deleting_a_task_removes_it_from_general_stats() {
    let db = Database::open_memory().unwrap();
    let cal = Calendar::utc();

    let keep = HabitTask::new("Keep", today());
    let drop = HabitTask::new("Drop", today());
    db.insert_task(&keep).unwrap();
    db.insert_task(&drop).unwrap();
    db.record_completion(keep.id, at(2026, 2, 8, 9), None).unwrap();
    db.record_completion(drop.id, at(2026, 2, 8, 9), None).unwrap();

    db.delete_task(drop.id).unwrap();

    let tasks = db.list_tasks().unwrap();
    let analyzer = StatsAnalyzer::new();
    let window = StatsWindow::last_days(&cal, today(), 7);
    assert_eq!(
        analyzer.total_completion_count(tasks.iter(), window.start, window.end),
        1
    );
}
