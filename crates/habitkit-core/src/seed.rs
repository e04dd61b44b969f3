//! First-launch demo data.
//!
//! Seeds a handful of catalog presets with a few weeks of plausible
//! completion history so stats and trend output are non-empty out of the
//! box. History is generated from a seeded PCG stream, so the same seed
//! always produces the same data.

use chrono::{DateTime, TimeZone, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::calendar::Calendar;
use crate::error::DatabaseError;
use crate::preset;
use crate::storage::Database;
use crate::task::{FrequencyType, HabitTask, MeasurementDuration};

/// Days of history to backfill.
const HISTORY_DAYS: i64 = 42;

/// Chance a scheduled day gets completed in the generated history.
const COMPLETION_PROBABILITY: f64 = 0.8;

/// Preset ids seeded on first launch, with the frequency each demo task
/// uses.
const DEMO_PRESETS: &[(&str, FrequencyType)] = &[
    ("health.drinkWater", FrequencyType::Daily),
    ("health.meditate", FrequencyType::Daily),
    ("fitness.run", FrequencyType::SpecificDays),
    ("learning.readBook", FrequencyType::Daily),
    ("social.callParents", FrequencyType::EveryWeek),
];

/// Insert demo tasks and history unless the database already has tasks.
/// Returns the number of tasks created (0 when the database was not
/// empty).
pub fn seed_if_needed<Tz: TimeZone>(
    db: &Database,
    calendar: &Calendar<Tz>,
    today: DateTime<Utc>,
    seed: u64,
) -> Result<usize, DatabaseError> {
    if db.count_tasks()? > 0 {
        return Ok(0);
    }
    seed_demo(db, calendar, today, seed)
}

/// Insert the demo tasks and their generated completion history.
pub fn seed_demo<Tz: TimeZone>(
    db: &Database,
    calendar: &Calendar<Tz>,
    today: DateTime<Utc>,
    seed: u64,
) -> Result<usize, DatabaseError> {
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);

    for (sort_order, (preset_id, frequency)) in DEMO_PRESETS.iter().enumerate() {
        let Some(preset) = preset::find(preset_id) else {
            continue;
        };
        let mut task = preset.instantiate(today);
        task.sort_order = sort_order as i32;
        task.frequency_type = *frequency;
        if *frequency == FrequencyType::SpecificDays {
            task.scheduled_days = vec![1, 3, 5];
        }
        if *frequency == FrequencyType::EveryWeek {
            task.measurement_duration = MeasurementDuration::Weekly;
        }
        db.insert_task(&task)?;
        backfill_history(db, calendar, &task, today, &mut rng)?;
    }

    Ok(DEMO_PRESETS.len())
}

fn backfill_history<Tz: TimeZone>(
    db: &Database,
    calendar: &Calendar<Tz>,
    task: &HabitTask,
    today: DateTime<Utc>,
    rng: &mut Mcg128Xsl64,
) -> Result<(), DatabaseError> {
    let today_date = calendar.local_date(today);

    for back in 1..=HISTORY_DAYS {
        let date = calendar.add_days(today_date, -back);
        if !task.is_scheduled(Calendar::<Tz>::weekday_of(date)) {
            continue;
        }
        if !rng.gen_bool(COMPLETION_PROBABILITY) {
            continue;
        }
        for _ in 0..task.times_per_day {
            let hour = rng.gen_range(7..22);
            let at = calendar.day_start(date) + chrono::Duration::hours(hour);
            let value = task.goal_value.map(|v| v * rng.gen_range(0.5..1.5));
            db.record_completion(task.id, at, value)?;
        }
    }
    Ok(())
}
