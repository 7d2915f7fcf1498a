//! # Butler Core Library
//!
//! This library provides the core logic for Butler, a daily drink tracker
//! that checks a history of day records against the "Rule of 3": at most
//! three drinking days a week, at most three drinks a day, and never two
//! drinking days in a row.
//!
//! ## Architecture
//!
//! - **Compliance Engine**: pure week/month summaries and rule verdicts
//! - **Streak Engine**: abstinence and compliance streaks plus lifetime
//!   achievements, computed against an explicit reference date
//! - **Storage**: CSV-backed day-record store and TOML configuration
//!
//! The engines never read the clock and never mutate their input; callers
//! pass a record snapshot and a reference date.
//!
//! ## Key Components
//!
//! - [`DayRecord`]: one day's observation with an absent-or-recorded count
//! - [`summarize_week`] / [`summarize_month`]: compliance summaries
//! - [`compute_streak_stats`]: streak and achievement snapshot
//! - [`DayStore`]: trait implemented by [`CsvStore`] and [`MemoryStore`]

pub mod calendar;
pub mod compliance;
pub mod error;
pub mod insights;
pub mod record;
pub mod storage;
pub mod streaks;

pub use calendar::{history_weeks, month_bounds, week_bounds, weeks_overlapping};
pub use compliance::{summarize_month, summarize_week, History, MonthSummary, WeekSummary};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use insights::{week_insights, WeekInsights, WeekendConduct};
pub use record::{DayRecord, DrinkCount, MAX_DRINKING_DAYS_PER_WEEK, MAX_DRINKS_PER_DAY};
pub use storage::{Config, CsvStore, DayStore, MemoryStore};
pub use streaks::{
    alcohol_free_weekends, compute_streak_stats, current_abstinence_streak,
    current_compliance_streak, current_drinking_streak, days_since_violation,
    longest_abstinence_streak, longest_compliance_streak, perfect_weeks, StreakStats,
};
