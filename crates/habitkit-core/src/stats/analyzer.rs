//! Completion counts, expected counts, and percentages.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, Weekday};
use crate::task::HabitTask;

/// An inclusive timestamp window for statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StatsWindow {
    /// The default stats window: the last `days` full days plus all of
    /// today, ending one second before the next local midnight.
    pub fn last_days<Tz: TimeZone>(
        calendar: &Calendar<Tz>,
        today: DateTime<Utc>,
        days: u32,
    ) -> Self {
        let today_date = calendar.local_date(today);
        Self {
            start: calendar.day_start(calendar.add_days(today_date, -i64::from(days))),
            end: calendar.day_end(today_date),
        }
    }

    /// Window spanning two picker-selected dates, whole days inclusive.
    /// Reversed input is swapped rather than producing an empty window.
    pub fn from_dates<Tz: TimeZone>(
        calendar: &Calendar<Tz>,
        a: chrono::NaiveDate,
        b: chrono::NaiveDate,
    ) -> Self {
        let (first, last) = if b < a { (b, a) } else { (a, b) };
        Self {
            start: calendar.day_start(first),
            end: calendar.day_end(last),
        }
    }
}

/// Narrow a task snapshot to one category label. `None` selects all tasks.
pub fn filter_by_category<'a>(
    tasks: &'a [HabitTask],
    category: Option<&'a str>,
) -> impl Iterator<Item = &'a HabitTask> + 'a {
    tasks
        .iter()
        .filter(move |t| category.map_or(true, |c| t.category.as_deref() == Some(c)))
}

/// Statistics analyzer bound to a calendar and a week-start preference.
///
/// The week start only matters for weekly trend bucket alignment; counts
/// and percentages are independent of it.
#[derive(Debug, Clone)]
pub struct StatsAnalyzer<Tz: TimeZone> {
    pub(crate) calendar: Calendar<Tz>,
    pub(crate) week_start: Weekday,
}

impl StatsAnalyzer<Utc> {
    /// Analyzer with UTC day boundaries and weeks starting on Monday.
    pub fn new() -> Self {
        Self {
            calendar: Calendar::utc(),
            week_start: Weekday::Monday,
        }
    }
}

impl Default for StatsAnalyzer<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> StatsAnalyzer<Tz> {
    pub fn with_settings(calendar: Calendar<Tz>, week_start: Weekday) -> Self {
        Self {
            calendar,
            week_start,
        }
    }

    pub fn calendar(&self) -> &Calendar<Tz> {
        &self.calendar
    }

    /// Number of completions within `[start, end]`, inclusive of both
    /// endpoints. A reversed window matches nothing.
    pub fn completion_count(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> u32 {
        task.completions_in_range(start, end).count() as u32
    }

    /// Number of completions the schedule calls for within the window:
    /// `times_per_day` for every scheduled local day from the day of
    /// `start` through the day of `end`, inclusive.
    pub fn expected_completions(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> u32 {
        let first = self.calendar.local_date(start);
        let last = self.calendar.local_date(end);
        self.calendar
            .iter_days(first, last)
            .filter(|d| task.is_scheduled(Calendar::<Tz>::weekday_of(*d)))
            .map(|_| task.times_per_day)
            .sum()
    }

    /// Achieved vs expected completions as a percentage in `[0, 100]`.
    /// Defined as 0 when nothing was expected in the window.
    pub fn completion_percentage(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> f64 {
        let expected = self.expected_completions(task, start, end);
        if expected == 0 {
            return 0.0;
        }
        let actual = self.completion_count(task, start, end);
        (f64::from(actual) / f64::from(expected) * 100.0).min(100.0)
    }

    /// Sum of completion counts across a set of tasks.
    pub fn total_completion_count<'a, I>(
        &self,
        tasks: I,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> u32
    where
        I: IntoIterator<Item = &'a HabitTask>,
    {
        tasks
            .into_iter()
            .map(|t| self.completion_count(t, start, end))
            .sum()
    }

    /// Mean completion percentage across a set of tasks; 0 for an empty
    /// set.
    pub fn average_completion_percentage<'a, I>(
        &self,
        tasks: I,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> f64
    where
        I: IntoIterator<Item = &'a HabitTask>,
    {
        let mut sum = 0.0;
        let mut count = 0u32;
        for task in tasks {
            sum += self.completion_percentage(task, start, end);
            count += 1;
        }
        if count == 0 {
            0.0
        } else {
            sum / f64::from(count)
        }
    }
}
