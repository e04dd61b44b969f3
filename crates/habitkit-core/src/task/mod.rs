//! Habit task configuration and completion records.
//!
//! A [`HabitTask`] is a read-only snapshot of one habit: its recurrence
//! rule, per-day goal, and the full completion log. The engine never
//! mutates a snapshot; creation and deletion of completions is the
//! storage layer's responsibility.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::error::ValidationError;
use crate::units::GoalType;

/// How often a task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrequencyType {
    /// Due every day.
    Daily,
    /// Due only on the weekdays listed in `scheduled_days`.
    SpecificDays,
    /// Tracked against a weekly total; every day is eligible.
    EveryWeek,
}

impl FrequencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyType::Daily => "daily",
            FrequencyType::SpecificDays => "specificDays",
            FrequencyType::EveryWeek => "everyWeek",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(FrequencyType::Daily),
            "specificDays" => Some(FrequencyType::SpecificDays),
            "everyWeek" => Some(FrequencyType::EveryWeek),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FrequencyType::Daily => "Every Day",
            FrequencyType::SpecificDays => "Specific Days",
            FrequencyType::EveryWeek => "Every Week",
        }
    }
}

/// The period over which a task's goal is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementDuration {
    Daily,
    Weekly,
    Monthly,
}

impl Default for MeasurementDuration {
    fn default() -> Self {
        MeasurementDuration::Daily
    }
}

impl MeasurementDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementDuration::Daily => "daily",
            MeasurementDuration::Weekly => "weekly",
            MeasurementDuration::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(MeasurementDuration::Daily),
            "weekly" => Some(MeasurementDuration::Weekly),
            "monthly" => Some(MeasurementDuration::Monthly),
            _ => None,
        }
    }
}

/// One timestamped record that a task's goal was met once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub id: Uuid,
    pub completed_at: DateTime<Utc>,
    /// Magnitude logged toward the goal; display only, never used by
    /// streak or scheduling logic.
    pub value: Option<f64>,
}

impl Completion {
    pub fn new(completed_at: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at,
            value,
        }
    }
}

/// A habit task snapshot: configuration plus its completion log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitTask {
    pub id: Uuid,
    pub title: String,
    pub icon_name: Option<String>,
    pub is_preset: bool,
    pub preset_identifier: Option<String>,
    #[serde(default)]
    pub measurement_duration: MeasurementDuration,
    pub goal_type: GoalType,
    pub goal_value: Option<f64>,
    pub goal_unit: Option<String>,
    pub frequency_type: FrequencyType,
    /// Goal repetitions required per scheduled day.
    pub times_per_day: u32,
    /// ISO weekdays (1=Monday .. 7=Sunday) the task is due on; meaningful
    /// only for `FrequencyType::SpecificDays`.
    pub scheduled_days: Vec<u8>,
    pub category: Option<String>,
    pub color_token: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

impl HabitTask {
    /// A daily task with the same defaults the configuration form starts
    /// from: one completion per day, all weekdays, no goal.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            icon_name: None,
            is_preset: false,
            preset_identifier: None,
            measurement_duration: MeasurementDuration::Daily,
            goal_type: GoalType::None,
            goal_value: None,
            goal_unit: None,
            frequency_type: FrequencyType::Daily,
            times_per_day: 1,
            scheduled_days: vec![1, 2, 3, 4, 5, 6, 7],
            category: None,
            color_token: "blue".to_string(),
            sort_order: 0,
            created_at: now,
            updated_at: now,
            completions: Vec::new(),
        }
    }

    /// Whether this task is due on a given ISO weekday (1=Monday .. 7=Sunday).
    ///
    /// `Daily` and `EveryWeek` tasks are due every day; the weekly-total
    /// check for `EveryWeek` happens at the aggregation level, not here.
    pub fn is_scheduled(&self, weekday: u8) -> bool {
        match self.frequency_type {
            FrequencyType::Daily | FrequencyType::EveryWeek => true,
            FrequencyType::SpecificDays => self.scheduled_days.contains(&weekday),
        }
    }

    /// Whether the schedule can ever come due. False only for
    /// `SpecificDays` with no valid weekday; the streak walk must bail out
    /// for such tasks instead of scanning backward forever.
    pub fn has_valid_schedule(&self) -> bool {
        match self.frequency_type {
            FrequencyType::Daily | FrequencyType::EveryWeek => true,
            FrequencyType::SpecificDays => {
                self.scheduled_days.iter().any(|d| (1..=7).contains(d))
            }
        }
    }

    /// Completions falling on a specific local calendar day.
    pub fn completions_on<'a, Tz: TimeZone>(
        &'a self,
        date: NaiveDate,
        calendar: &'a Calendar<Tz>,
    ) -> impl Iterator<Item = &'a Completion> + 'a {
        self.completions
            .iter()
            .filter(move |c| calendar.local_date(c.completed_at) == date)
    }

    /// Completions with `start <= completed_at <= end`, inclusive of both
    /// endpoints. The log's stored order is preserved.
    pub fn completions_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &Completion> {
        self.completions
            .iter()
            .filter(move |c| c.completed_at >= start && c.completed_at <= end)
    }

    /// Whether the task met its goal on a given day (`times_per_day`
    /// completions or more).
    pub fn is_completed_on<Tz: TimeZone>(
        &self,
        date: NaiveDate,
        calendar: &Calendar<Tz>,
    ) -> bool {
        self.completions_on(date, calendar).count() >= self.times_per_day as usize
    }

    /// Display text when no icon is set: first initials of the first two
    /// words of the title, uppercased.
    pub fn initials_display(&self) -> String {
        let words: Vec<&str> = self.title.split_whitespace().collect();
        let initials: String = if words.len() >= 2 {
            words[..2]
                .iter()
                .filter_map(|w| w.chars().next())
                .collect()
        } else {
            self.title.chars().take(2).collect()
        };
        initials.to_uppercase()
    }

    /// Check the configuration invariants enforced at the input seam.
    ///
    /// The engine itself is total over valid snapshots; this runs when a
    /// task is created or saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".to_string(),
                message: "title must not be empty".to_string(),
            });
        }
        if self.times_per_day == 0 {
            return Err(ValidationError::InvalidValue {
                field: "times_per_day".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(day) = self.scheduled_days.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(ValidationError::InvalidValue {
                field: "scheduled_days".to_string(),
                message: format!("weekday {day} is outside 1..=7"),
            });
        }
        match self.goal_type {
            GoalType::None => {
                if self.goal_value.is_some() || self.goal_unit.is_some() {
                    return Err(ValidationError::InvalidValue {
                        field: "goal_value".to_string(),
                        message: "goal value/unit must be unset when there is no goal".to_string(),
                    });
                }
            }
            _ => {
                if self.goal_value.is_none() || self.goal_unit.is_none() {
                    return Err(ValidationError::InvalidValue {
                        field: "goal_value".to_string(),
                        message: "goal value and unit are required for a measured goal"
                            .to_string(),
                    });
                }
                if self.goal_value.is_some_and(|v| v <= 0.0) {
                    return Err(ValidationError::InvalidValue {
                        field: "goal_value".to_string(),
                        message: "goal value must be positive".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
