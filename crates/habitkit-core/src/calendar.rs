//! Calendar arithmetic over an injected timezone.
//!
//! Every date computation in the engine goes through a [`Calendar`] so that
//! day boundaries, weekday numbering, and DST transitions are resolved
//! against one explicit timezone instead of ambient process state. Tests
//! pin a fixed timezone and reference date deterministically.

use chrono::{DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// ISO 8601 weekday: Monday=1 .. Sunday=7.
///
/// Used internally regardless of the display week-start preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// All seven weekdays in ISO order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Construct from an ISO weekday number (1=Monday .. 7=Sunday).
    pub fn from_iso(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// ISO weekday number (1=Monday .. 7=Sunday).
    pub fn iso(self) -> u8 {
        self as u8
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl Default for Weekday {
    fn default() -> Self {
        Weekday::Monday
    }
}

/// Calendar bound to a concrete timezone.
///
/// Timestamps are kept in UTC throughout the engine; the calendar decides
/// which local day an instant belongs to and where local midnight falls.
#[derive(Debug, Clone)]
pub struct Calendar<Tz: TimeZone> {
    tz: Tz,
}

impl Calendar<Utc> {
    /// Calendar with UTC day boundaries.
    pub fn utc() -> Self {
        Self { tz: Utc }
    }
}

impl Default for Calendar<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

impl<Tz: TimeZone> Calendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// The local calendar day an instant falls on.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// ISO weekday (1=Monday .. 7=Sunday) of the local day an instant falls on.
    pub fn iso_weekday(&self, at: DateTime<Utc>) -> u8 {
        Self::weekday_of(self.local_date(at))
    }

    /// ISO weekday of a plain local date.
    pub fn weekday_of(date: NaiveDate) -> u8 {
        date.weekday().number_from_monday() as u8
    }

    /// Local midnight of `date`, as a UTC instant.
    ///
    /// On a DST spring-forward day where midnight does not exist the
    /// earliest valid instant of the day is used; an ambiguous (fall-back)
    /// midnight resolves to the earlier offset.
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let mut local = date.and_time(NaiveTime::MIN);
        loop {
            match self.tz.from_local_datetime(&local) {
                LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                LocalResult::Ambiguous(earlier, _) => return earlier.with_timezone(&Utc),
                // Skipped by a DST gap; gaps are bounded so probing forward
                // in half-hour steps always lands on a valid local time.
                LocalResult::None => local += chrono::Duration::minutes(30),
            }
        }
    }

    /// Last instant of `date` (one second before the next local midnight).
    pub fn day_end(&self, date: NaiveDate) -> DateTime<Utc> {
        self.day_start(date + Days::new(1)) - chrono::Duration::seconds(1)
    }

    /// Whole 24-hour periods between two instants. Negative when `end`
    /// precedes `start`.
    pub fn days_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        (end - start).num_days()
    }

    /// Shift a local date by a signed number of days.
    pub fn add_days(&self, date: NaiveDate, n: i64) -> NaiveDate {
        if n >= 0 {
            date + Days::new(n as u64)
        } else {
            date - Days::new(n.unsigned_abs())
        }
    }

    /// Shift a local date by a signed number of calendar months, clamping
    /// the day-of-month when the target month is shorter.
    pub fn add_months(&self, date: NaiveDate, n: i32) -> NaiveDate {
        if n >= 0 {
            date + Months::new(n as u32)
        } else {
            date - Months::new(n.unsigned_abs())
        }
    }

    /// Iterate local dates from `start` through `end`, inclusive.
    /// Empty when `end` precedes `start`.
    pub fn iter_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = NaiveDate> {
        start.iter_days().take_while(move |d| *d <= end)
    }
}
