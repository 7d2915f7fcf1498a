//! Per-week insight facts for presentation layers.
//!
//! These are plain flags and counts; wording is left to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::shift_days;
use crate::compliance::History;
use crate::record::{DayRecord, MAX_DRINKS_PER_DAY};

/// Drinking behavior over Friday, Saturday and Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekendConduct {
    /// No drinking day from Friday through Sunday
    AlcoholFree,
    /// One drinking day
    Restrained,
    /// Two or more drinking days
    Indulgent,
}

impl WeekendConduct {
    fn from_drinking_days(days: u32) -> Self {
        match days {
            0 => WeekendConduct::AlcoholFree,
            1 => WeekendConduct::Restrained,
            _ => WeekendConduct::Indulgent,
        }
    }
}

/// Insight facts for one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInsights {
    pub start: NaiveDate,
    /// Recorded data and not a single drinking day
    pub complete_abstinence: bool,
    /// Exactly one drinking day
    pub single_occasion: bool,
    /// Some drinking, but no more than a single day's limit in total
    pub moderate_total: bool,
    pub weekend_drinking_days: u32,
    pub weekend: WeekendConduct,
}

/// Insight facts for the ISO week containing `anchor`.
pub fn week_insights(records: &[DayRecord], anchor: NaiveDate) -> WeekInsights {
    let history = History::new(records);
    let week = history.week(anchor);

    // Friday through Sunday are offsets 4..=6 from Monday.
    let weekend_drinking_days = (4..=6)
        .map(|offset| shift_days(week.start, offset))
        .filter(|day| history.count_on(*day).is_drinking())
        .count() as u32;

    WeekInsights {
        start: week.start,
        complete_abstinence: week.has_data() && week.drinking_days == 0,
        single_occasion: week.drinking_days == 1,
        moderate_total: week.drinking_days > 0 && week.total_drinks <= MAX_DRINKS_PER_DAY,
        weekend_drinking_days,
        weekend: WeekendConduct::from_drinking_days(weekend_drinking_days),
    }
}
