//! Current-streak computation.
//!
//! A streak is the number of consecutive scheduled days, walking backward
//! from today, on which the task met its completion goal. Unscheduled
//! days neither break nor extend a streak, and today is allowed to be
//! incomplete without breaking it -- the day isn't over yet.

use chrono::{DateTime, TimeZone, Utc};

use crate::calendar::Calendar;
use crate::task::HabitTask;

/// Streak calculator bound to a calendar.
#[derive(Debug, Clone)]
pub struct StreakCalculator<Tz: TimeZone> {
    calendar: Calendar<Tz>,
}

impl StreakCalculator<Utc> {
    /// Calculator with UTC day boundaries.
    pub fn new() -> Self {
        Self {
            calendar: Calendar::utc(),
        }
    }
}

impl Default for StreakCalculator<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> StreakCalculator<Tz> {
    pub fn with_calendar(calendar: Calendar<Tz>) -> Self {
        Self { calendar }
    }

    /// Consecutive completed scheduled days counting backward from `today`.
    ///
    /// Per-day rule, walking one day at a time into the past:
    /// 1. unscheduled day: skip, streak unchanged;
    /// 2. goal met (`times_per_day` completions or more): count it;
    /// 3. the current day itself incomplete: skip without counting;
    /// 4. any earlier scheduled day incomplete: stop.
    ///
    /// A task whose schedule can never come due would make the walk scan
    /// backward forever, so it reports a streak of 0 up front. The same
    /// guard covers a zero `times_per_day`, which would make every day in
    /// history count as complete.
    pub fn current_streak(&self, task: &HabitTask, today: DateTime<Utc>) -> u32 {
        if !task.has_valid_schedule() || task.times_per_day == 0 {
            return 0;
        }

        let today_date = self.calendar.local_date(today);
        let mut streak = 0;
        let mut check = today_date;

        loop {
            let weekday = Calendar::<Tz>::weekday_of(check);

            if !task.is_scheduled(weekday) {
                // Unscheduled days don't break the streak
            } else if task.is_completed_on(check, &self.calendar) {
                streak += 1;
            } else if check == today_date {
                // Today may still be completed before the day ends
            } else {
                break;
            }

            match check.pred_opt() {
                Some(prev) => check = prev,
                None => break,
            }
        }

        streak
    }

    /// Whether a streak has reached the reward threshold configured for a
    /// task. The celebration itself belongs to the presentation layer.
    pub fn reward_reached(streak: u32, threshold: u32) -> bool {
        threshold > 0 && streak >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Completion, FrequencyType};
    use chrono::TimeZone as _;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // 2026-02-09 is a Monday.
    fn today() -> DateTime<Utc> {
        at(2026, 2, 9, 12)
    }

    fn task_with_completions(times_per_day: u32, completions: &[DateTime<Utc>]) -> HabitTask {
        let mut task = HabitTask::new("Test", today());
        task.times_per_day = times_per_day;
        task.completions = completions
            .iter()
            .map(|&c| Completion::new(c, None))
            .collect();
        task
    }

    #[test]
    fn empty_log_has_zero_streak() {
        let calc = StreakCalculator::new();
        let task = task_with_completions(1, &[]);
        assert_eq!(calc.current_streak(&task, today()), 0);
    }

    #[test]
    fn counts_consecutive_completed_days() {
        let calc = StreakCalculator::new();
        let task = task_with_completions(1, &[at(2026, 2, 8, 9), at(2026, 2, 7, 9)]);
        // Today incomplete but still open; yesterday and the day before count.
        assert_eq!(calc.current_streak(&task, today()), 2);
    }

    #[test]
    fn partial_days_do_not_count_toward_streak() {
        let calc = StreakCalculator::new();
        // One completion per day against a two-per-day goal
        let task = task_with_completions(2, &[at(2026, 2, 8, 9), at(2026, 2, 7, 9)]);
        assert_eq!(calc.current_streak(&task, today()), 0);
    }

    #[test]
    fn completed_today_extends_streak() {
        let calc = StreakCalculator::new();
        let task = task_with_completions(1, &[at(2026, 2, 9, 9), at(2026, 2, 8, 9)]);
        assert_eq!(calc.current_streak(&task, today()), 2);
    }

    #[test]
    fn gap_before_yesterday_stops_the_walk() {
        let calc = StreakCalculator::new();
        // Completed yesterday and three days ago; Feb 7 missing
        let task = task_with_completions(1, &[at(2026, 2, 8, 9), at(2026, 2, 6, 9)]);
        assert_eq!(calc.current_streak(&task, today()), 1);
    }

    #[test]
    fn unscheduled_days_are_skipped() {
        let calc = StreakCalculator::new();
        // Mon/Wed/Fri task completed on Mon 9th, Fri 6th, Wed 4th; the
        // weekend and Tue/Thu in between must not break the streak.
        let mut task = task_with_completions(
            1,
            &[at(2026, 2, 9, 9), at(2026, 2, 6, 9), at(2026, 2, 4, 9)],
        );
        task.frequency_type = FrequencyType::SpecificDays;
        task.scheduled_days = vec![1, 3, 5];
        assert_eq!(calc.current_streak(&task, today()), 3);
    }

    #[test]
    fn missed_scheduled_day_breaks_streak() {
        let calc = StreakCalculator::new();
        // Mon/Wed/Fri task: Mon 9th and Fri 6th done, Wed 4th missed
        let mut task = task_with_completions(1, &[at(2026, 2, 9, 9), at(2026, 2, 6, 9)]);
        task.frequency_type = FrequencyType::SpecificDays;
        task.scheduled_days = vec![1, 3, 5];
        assert_eq!(calc.current_streak(&task, today()), 2);
    }

    #[test]
    fn empty_specific_days_terminates_with_zero() {
        let calc = StreakCalculator::new();
        let mut task = task_with_completions(1, &[at(2026, 2, 8, 9)]);
        task.frequency_type = FrequencyType::SpecificDays;
        task.scheduled_days = vec![];
        assert_eq!(calc.current_streak(&task, today()), 0);
    }

    #[test]
    fn multiple_completions_same_day_count_once() {
        let calc = StreakCalculator::new();
        let task = task_with_completions(1, &[at(2026, 2, 8, 9), at(2026, 2, 8, 18)]);
        assert_eq!(calc.current_streak(&task, today()), 1);
    }

    #[test]
    fn reward_threshold() {
        assert!(StreakCalculator::<Utc>::reward_reached(3, 2));
        assert!(StreakCalculator::<Utc>::reward_reached(2, 2));
        assert!(!StreakCalculator::<Utc>::reward_reached(1, 2));
        assert!(!StreakCalculator::<Utc>::reward_reached(5, 0));
    }
}
