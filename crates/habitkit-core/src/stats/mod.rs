//! Statistics over task completion logs.
//!
//! Completion counts, expected-completion counts, completion percentages,
//! and bucketed trend series for one task or a set of tasks. Everything
//! is computed fresh from snapshots plus an explicit window; week-start
//! and timezone preferences are threaded in as parameters, never read
//! from ambient state.

mod analyzer;
mod trend;

pub use analyzer::{filter_by_category, StatsAnalyzer, StatsWindow};
pub use trend::TrendPoint;
