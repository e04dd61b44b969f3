//! # Habitkit Core Library
//!
//! This library provides the core business logic for the Habitkit habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Engine**: pure, stateless functions over task snapshots -- schedule
//!   evaluation, streak computation, and statistics aggregation. Timezone
//!   and week-start preferences are explicit parameters, so the engine has
//!   no ambient state and any thread may call it concurrently.
//! - **Storage**: SQLite-based task/completion storage and TOML-based
//!   settings
//! - **Catalog**: static preset tasks used to pre-fill new habits
//!
//! ## Key Components
//!
//! - [`HabitTask`]: one habit's configuration plus its completion log
//! - [`StatsAnalyzer`]: completion counts, percentages, trend buckets
//! - [`StreakCalculator`]: consecutive-completion streaks
//! - [`Database`]: task and completion persistence
//! - [`Settings`]: user preferences consumed as engine parameters

pub mod calendar;
pub mod error;
pub mod preset;
pub mod seed;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod task;
pub mod units;

pub use calendar::{Calendar, Weekday};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use preset::{PresetTask, CATALOG, CATEGORY_NAMES};
pub use settings::Settings;
pub use stats::{filter_by_category, StatsAnalyzer, StatsWindow, TrendPoint};
pub use storage::Database;
pub use streak::StreakCalculator;
pub use task::{Completion, FrequencyType, HabitTask, MeasurementDuration};
pub use units::{GoalType, MeasurementSystem};
