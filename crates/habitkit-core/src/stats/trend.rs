//! Bucketed trend series for charting.
//!
//! Short windows aggregate into week-wide buckets aligned to the
//! configured week start; windows of two months or more switch to
//! calendar-month buckets so the chart stays readable.

use std::cmp::min;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::analyzer::StatsAnalyzer;
use crate::calendar::Calendar;
use crate::task::HabitTask;

/// Windows at least this many days long aggregate monthly.
const MONTHLY_BUCKET_THRESHOLD_DAYS: i64 = 60;

/// One aggregation bucket of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Local date the bucket opens on.
    pub bucket_start: NaiveDate,
    /// Completions counted within the bucket.
    pub count: u32,
}

impl<Tz: TimeZone> StatsAnalyzer<Tz> {
    /// Aggregated completion counts for a trend chart.
    ///
    /// Weekly buckets (aligned back to the analyzer's week start) when the
    /// window spans fewer than 60 days, calendar-month buckets otherwise.
    /// Each bucket counts completions from its opening midnight up to the
    /// next bucket's opening midnight, clipped to the window end.
    pub fn trend_series(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TrendPoint> {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        if self.calendar.days_between(start, end) >= MONTHLY_BUCKET_THRESHOLD_DAYS {
            self.monthly_trend(task, start, end)
        } else {
            self.weekly_trend(task, start, end)
        }
    }

    fn weekly_trend(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TrendPoint> {
        let start_date = self.calendar.local_date(start);
        // Align back to the most recent week-start day on or before the
        // window start.
        let offset = (i64::from(Calendar::<Tz>::weekday_of(start_date))
            - i64::from(self.week_start.iso())
            + 7)
            % 7;
        let mut bucket = self.calendar.add_days(start_date, -offset);

        let mut points = Vec::new();
        loop {
            let open = self.calendar.day_start(bucket);
            if open >= end {
                break;
            }
            let next = self.calendar.add_days(bucket, 7);
            let close = min(self.calendar.day_start(next), end);
            points.push(TrendPoint {
                bucket_start: bucket,
                count: self.completion_count(task, open, close),
            });
            bucket = next;
        }
        points
    }

    fn monthly_trend(
        &self,
        task: &HabitTask,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TrendPoint> {
        let mut bucket = self.calendar.local_date(start);

        let mut points = Vec::new();
        loop {
            let open = self.calendar.day_start(bucket);
            if open >= end {
                break;
            }
            let next = self.calendar.add_months(bucket, 1);
            let close = min(self.calendar.day_start(next), end);
            points.push(TrendPoint {
                bucket_start: bucket,
                count: self.completion_count(task, open, close),
            });
            bucket = next;
        }
        points
    }

    /// Trend series across a set of tasks, merged bucket-by-bucket.
    ///
    /// All tasks share the same window and therefore the same buckets;
    /// counts for matching bucket dates are summed.
    pub fn trend_series_for_all<'a, I>(
        &self,
        tasks: I,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TrendPoint>
    where
        I: IntoIterator<Item = &'a HabitTask>,
    {
        let mut merged: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for task in tasks {
            for point in self.trend_series(task, start, end) {
                *merged.entry(point.bucket_start).or_insert(0) += point.count;
            }
        }
        merged
            .into_iter()
            .map(|(bucket_start, count)| TrendPoint {
                bucket_start,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Weekday;
    use crate::task::Completion;
    use chrono::TimeZone as _;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_with_completions(completions: &[DateTime<Utc>]) -> HabitTask {
        let mut task = HabitTask::new("Test", at(2026, 2, 9, 12));
        task.completions = completions
            .iter()
            .map(|&c| Completion::new(c, None))
            .collect();
        task
    }

    #[test]
    fn thirty_day_window_uses_weekly_buckets() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[]);
        let series = analyzer.trend_series(&task, at(2026, 1, 10, 0), at(2026, 2, 9, 0));
        assert!(series.len() >= 4 && series.len() <= 6, "got {}", series.len());
        // Buckets advance by exactly seven days
        for pair in series.windows(2) {
            assert_eq!(pair[1].bucket_start - pair[0].bucket_start, chrono::Duration::days(7));
        }
    }

    #[test]
    fn ninety_day_window_uses_monthly_buckets() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[]);
        let series = analyzer.trend_series(&task, at(2025, 11, 11, 0), at(2026, 2, 9, 0));
        assert!(series.len() >= 2 && series.len() <= 4, "got {}", series.len());
        assert_eq!(series[0].bucket_start, date(2025, 11, 11));
        assert_eq!(series[1].bucket_start, date(2025, 12, 11));
    }

    #[test]
    fn weekly_buckets_align_to_week_start() {
        // 2026-01-14 is a Wednesday
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[]);
        let series = analyzer.trend_series(&task, at(2026, 1, 14, 0), at(2026, 2, 1, 0));
        assert_eq!(series[0].bucket_start, date(2026, 1, 12), "Monday before the start");

        let sunday_start = StatsAnalyzer::with_settings(Calendar::utc(), Weekday::Sunday);
        let series = sunday_start.trend_series(&task, at(2026, 1, 14, 0), at(2026, 2, 1, 0));
        assert_eq!(series[0].bucket_start, date(2026, 1, 11), "Sunday before the start");
    }

    #[test]
    fn bucket_counts_are_clipped_to_the_window() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[
            at(2026, 1, 12, 9),
            at(2026, 1, 13, 9),
            // After the window end; must not appear in any bucket
            at(2026, 1, 20, 9),
        ]);
        let series = analyzer.trend_series(&task, at(2026, 1, 12, 0), at(2026, 1, 15, 0));
        let total: u32 = series.iter().map(|p| p.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn completions_land_in_their_bucket() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[
            at(2026, 1, 12, 9),
            at(2026, 1, 18, 9),
            at(2026, 1, 19, 9),
        ]);
        // Monday-aligned window: buckets open Jan 12 and Jan 19
        let series = analyzer.trend_series(&task, at(2026, 1, 12, 0), at(2026, 1, 26, 0));
        assert_eq!(series[0].bucket_start, date(2026, 1, 12));
        assert_eq!(series[0].count, 2);
        assert_eq!(series[1].count, 1);
    }

    #[test]
    fn sixty_day_window_is_monthly() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[]);
        let series = analyzer.trend_series(&task, at(2026, 1, 1, 0), at(2026, 3, 2, 0));
        assert_eq!(series[0].bucket_start, date(2026, 1, 1));
        assert_eq!(series[1].bucket_start, date(2026, 2, 1));
    }

    #[test]
    fn single_day_window_has_one_bucket() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[at(2026, 1, 14, 9)]);
        let series = analyzer.trend_series(&task, at(2026, 1, 14, 0), at(2026, 1, 14, 23));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn reversed_window_is_normalized() {
        let analyzer = StatsAnalyzer::new();
        let task = task_with_completions(&[at(2026, 1, 14, 9)]);
        let series = analyzer.trend_series(&task, at(2026, 1, 14, 23), at(2026, 1, 14, 0));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn merged_series_sums_matching_buckets() {
        let analyzer = StatsAnalyzer::new();
        let a = task_with_completions(&[at(2026, 1, 13, 9)]);
        let b = task_with_completions(&[at(2026, 1, 13, 18), at(2026, 1, 20, 9)]);
        let series =
            analyzer.trend_series_for_all([&a, &b], at(2026, 1, 12, 0), at(2026, 1, 26, 0));
        assert_eq!(series[0].bucket_start, date(2026, 1, 12));
        assert_eq!(series[0].count, 2);
        assert_eq!(series[1].count, 1);
    }

    #[test]
    fn merged_series_of_no_tasks_is_empty() {
        let analyzer = StatsAnalyzer::new();
        let series = analyzer.trend_series_for_all(
            std::iter::empty::<&HabitTask>(),
            at(2026, 1, 12, 0),
            at(2026, 1, 26, 0),
        );
        assert!(series.is_empty());
    }
}
