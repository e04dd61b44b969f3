//! SQLite database for habit tasks and completions.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::data_dir;
use crate::calendar::Calendar;
use crate::error::DatabaseError;
use crate::task::{Completion, FrequencyType, HabitTask, MeasurementDuration};
use crate::units::GoalType;

/// SQLite database holding tasks and their completion logs.
///
/// `list_tasks`/`get_task` return full snapshots (configuration plus
/// completion log) ready to hand to the statistics engine.
pub struct Database {
    conn: Connection,
}

/// Task columns as read from SQLite, before decoding into model types.
struct RawTask {
    id: String,
    title: String,
    icon_name: Option<String>,
    is_preset: i64,
    preset_identifier: Option<String>,
    measurement_duration: String,
    goal_type: String,
    goal_value: Option<f64>,
    goal_unit: Option<String>,
    frequency_type: String,
    times_per_day: i64,
    scheduled_days: String,
    category: Option<String>,
    color_token: String,
    sort_order: i64,
    created_at: String,
    updated_at: String,
}

const TASK_COLUMNS: &str = "id, title, icon_name, is_preset, preset_identifier, \
     measurement_duration, goal_type, goal_value, goal_unit, frequency_type, \
     times_per_day, scheduled_days, category, color_token, sort_order, \
     created_at, updated_at";

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/habitkit/habitkit.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .join("habitkit.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS tasks (
                id                   TEXT PRIMARY KEY,
                title                TEXT NOT NULL,
                icon_name            TEXT,
                is_preset            INTEGER NOT NULL DEFAULT 0,
                preset_identifier    TEXT,
                measurement_duration TEXT NOT NULL DEFAULT 'daily',
                goal_type            TEXT NOT NULL DEFAULT 'none',
                goal_value           REAL,
                goal_unit            TEXT,
                frequency_type       TEXT NOT NULL DEFAULT 'daily',
                times_per_day        INTEGER NOT NULL DEFAULT 1,
                scheduled_days       TEXT NOT NULL DEFAULT '[1,2,3,4,5,6,7]',
                category             TEXT,
                color_token          TEXT NOT NULL DEFAULT 'blue',
                sort_order           INTEGER NOT NULL DEFAULT 0,
                created_at           TEXT NOT NULL,
                updated_at           TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS completions (
                id           TEXT PRIMARY KEY,
                task_id      TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                completed_at TEXT NOT NULL,
                value        REAL
            );

            CREATE INDEX IF NOT EXISTS idx_completions_task ON completions(task_id);
            CREATE INDEX IF NOT EXISTS idx_completions_completed_at ON completions(completed_at);",
        )?;
        Ok(())
    }

    // --- tasks ---

    /// Insert a new task row. The task's in-memory completion log is not
    /// written; completions are recorded one at a time.
    pub fn insert_task(&self, task: &HabitTask) -> Result<(), DatabaseError> {
        let scheduled_days = serde_json::to_string(&task.scheduled_days)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO tasks (id, title, icon_name, is_preset, preset_identifier, \
             measurement_duration, goal_type, goal_value, goal_unit, frequency_type, \
             times_per_day, scheduled_days, category, color_token, sort_order, \
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                task.id.to_string(),
                task.title,
                task.icon_name,
                task.is_preset as i64,
                task.preset_identifier,
                task.measurement_duration.as_str(),
                task.goal_type.as_str(),
                task.goal_value,
                task.goal_unit,
                task.frequency_type.as_str(),
                task.times_per_day as i64,
                scheduled_days,
                task.category,
                task.color_token,
                task.sort_order as i64,
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update an existing task's configuration.
    pub fn update_task(&self, task: &HabitTask) -> Result<(), DatabaseError> {
        let scheduled_days = serde_json::to_string(&task.scheduled_days)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, icon_name = ?3, is_preset = ?4, \
             preset_identifier = ?5, measurement_duration = ?6, goal_type = ?7, \
             goal_value = ?8, goal_unit = ?9, frequency_type = ?10, times_per_day = ?11, \
             scheduled_days = ?12, category = ?13, color_token = ?14, sort_order = ?15, \
             updated_at = ?16
             WHERE id = ?1",
            params![
                task.id.to_string(),
                task.title,
                task.icon_name,
                task.is_preset as i64,
                task.preset_identifier,
                task.measurement_duration.as_str(),
                task.goal_type.as_str(),
                task.goal_value,
                task.goal_unit,
                task.frequency_type.as_str(),
                task.times_per_day as i64,
                scheduled_days,
                task.category,
                task.color_token,
                task.sort_order as i64,
                task.updated_at.to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(task.id.to_string()));
        }
        Ok(())
    }

    /// Delete a task; its completions go with it.
    pub fn delete_task(&self, id: Uuid) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Load one task snapshot with its completion log.
    pub fn get_task(&self, id: Uuid) -> Result<Option<HabitTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"
        ))?;
        let raw = stmt
            .query_row(params![id.to_string()], Self::raw_task_from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(DatabaseError::from(other)),
            })?;

        match raw {
            None => Ok(None),
            Some(raw) => {
                let mut task = Self::decode_task(raw)?;
                task.completions = self.completions_for(task.id)?;
                Ok(Some(task))
            }
        }
    }

    /// Load all task snapshots, ordered by sort order, completion logs
    /// attached.
    pub fn list_tasks(&self) -> Result<Vec<HabitTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY sort_order, created_at"
        ))?;
        let raws = stmt
            .query_map([], Self::raw_task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tasks = Vec::with_capacity(raws.len());
        for raw in raws {
            let mut task = Self::decode_task(raw)?;
            task.completions = self.completions_for(task.id)?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<u64, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Distinct category labels in use, sorted.
    pub fn list_categories(&self) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT category FROM tasks WHERE category IS NOT NULL ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    // --- completions ---

    /// Record one completion for a task.
    ///
    /// # Errors
    /// Returns `TaskNotFound` if the task does not exist.
    pub fn record_completion(
        &self,
        task_id: Uuid,
        completed_at: DateTime<Utc>,
        value: Option<f64>,
    ) -> Result<Completion, DatabaseError> {
        let completion = Completion::new(completed_at, value);
        let result = self.conn.execute(
            "INSERT INTO completions (id, task_id, completed_at, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                completion.id.to_string(),
                task_id.to_string(),
                completion.completed_at.to_rfc3339(),
                completion.value,
            ],
        );
        match result {
            Ok(_) => Ok(completion),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DatabaseError::TaskNotFound(task_id.to_string()))
            }
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Remove all of a task's completions on one local calendar day (the
    /// un-mark toggle in the completions calendar). Returns how many
    /// records were deleted.
    pub fn remove_completions_on<Tz: TimeZone>(
        &self,
        task_id: Uuid,
        date: NaiveDate,
        calendar: &Calendar<Tz>,
    ) -> Result<usize, DatabaseError> {
        let from = calendar.day_start(date);
        let to = calendar.day_start(calendar.add_days(date, 1));
        let deleted = self.conn.execute(
            "DELETE FROM completions WHERE task_id = ?1 \
             AND completed_at >= ?2 AND completed_at < ?3",
            params![task_id.to_string(), from.to_rfc3339(), to.to_rfc3339()],
        )?;
        Ok(deleted)
    }

    /// All completions for a task, oldest first.
    pub fn completions_for(&self, task_id: Uuid) -> Result<Vec<Completion>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, completed_at, value FROM completions \
             WHERE task_id = ?1 ORDER BY completed_at",
        )?;
        let raws = stmt
            .query_map(params![task_id.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raws.into_iter()
            .map(|(id, completed_at, value)| {
                Ok(Completion {
                    id: parse_uuid(&id)?,
                    completed_at: parse_timestamp(&completed_at)?,
                    value,
                })
            })
            .collect()
    }

    // --- row decoding ---

    fn raw_task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTask> {
        Ok(RawTask {
            id: row.get(0)?,
            title: row.get(1)?,
            icon_name: row.get(2)?,
            is_preset: row.get(3)?,
            preset_identifier: row.get(4)?,
            measurement_duration: row.get(5)?,
            goal_type: row.get(6)?,
            goal_value: row.get(7)?,
            goal_unit: row.get(8)?,
            frequency_type: row.get(9)?,
            times_per_day: row.get(10)?,
            scheduled_days: row.get(11)?,
            category: row.get(12)?,
            color_token: row.get(13)?,
            sort_order: row.get(14)?,
            created_at: row.get(15)?,
            updated_at: row.get(16)?,
        })
    }

    fn decode_task(raw: RawTask) -> Result<HabitTask, DatabaseError> {
        let scheduled_days: Vec<u8> = serde_json::from_str(&raw.scheduled_days)
            .map_err(|e| DatabaseError::CorruptRow(format!("scheduled_days: {e}")))?;
        Ok(HabitTask {
            id: parse_uuid(&raw.id)?,
            title: raw.title,
            icon_name: raw.icon_name,
            is_preset: raw.is_preset != 0,
            preset_identifier: raw.preset_identifier,
            measurement_duration: MeasurementDuration::parse(&raw.measurement_duration)
                .ok_or_else(|| {
                    DatabaseError::CorruptRow(format!(
                        "measurement_duration: {}",
                        raw.measurement_duration
                    ))
                })?,
            goal_type: GoalType::parse(&raw.goal_type).ok_or_else(|| {
                DatabaseError::CorruptRow(format!("goal_type: {}", raw.goal_type))
            })?,
            goal_value: raw.goal_value,
            goal_unit: raw.goal_unit,
            frequency_type: FrequencyType::parse(&raw.frequency_type).ok_or_else(|| {
                DatabaseError::CorruptRow(format!("frequency_type: {}", raw.frequency_type))
            })?,
            times_per_day: raw.times_per_day as u32,
            scheduled_days,
            category: raw.category,
            color_token: raw.color_token,
            sort_order: raw.sort_order as i32,
            created_at: parse_timestamp(&raw.created_at)?,
            updated_at: parse_timestamp(&raw.updated_at)?,
            completions: Vec::new(),
        })
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::CorruptRow(format!("uuid '{s}': {e}")))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::CorruptRow(format!("timestamp '{s}': {e}")))
}
