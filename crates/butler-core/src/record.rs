//! Day records and the Rule of 3 policy limits.
//!
//! A [`DayRecord`] is one calendar day's observation. Its count is a
//! [`DrinkCount`], which keeps "no data" and "recorded as zero" apart:
//! only `Recorded(0)` is an abstinent day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// At most this many drinking days per ISO week.
pub const MAX_DRINKING_DAYS_PER_WEEK: u32 = 3;

/// At most this many drinks on any single day.
pub const MAX_DRINKS_PER_DAY: u32 = 3;

/// Count of drinks for a day.
///
/// Serialized as `null` or a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DrinkCount {
    /// No data for the day.
    #[default]
    Absent,
    /// Explicitly recorded count (zero is a sober day).
    Recorded(u32),
}

impl DrinkCount {
    /// Count used for thresholds and sums; absent counts as 0.
    pub fn effective(self) -> u32 {
        match self {
            DrinkCount::Absent => 0,
            DrinkCount::Recorded(n) => n,
        }
    }

    pub fn is_recorded(self) -> bool {
        matches!(self, DrinkCount::Recorded(_))
    }

    /// A drinking day has an effective count above zero.
    pub fn is_drinking(self) -> bool {
        self.effective() > 0
    }

    /// Only an explicit zero is abstinent; absent data never is.
    pub fn is_abstinent(self) -> bool {
        self == DrinkCount::Recorded(0)
    }

    /// True when the per-day limit is exceeded.
    pub fn exceeds_limit(self) -> bool {
        self.effective() > MAX_DRINKS_PER_DAY
    }

    /// Next value in the quick-edit cycle: 0 -> 1 -> 2 -> 3 -> 4 -> 0.
    pub fn cycled(self) -> DrinkCount {
        match self.effective() {
            n @ 0..=MAX_DRINKS_PER_DAY => DrinkCount::Recorded(n + 1),
            _ => DrinkCount::Recorded(0),
        }
    }
}

impl From<Option<u32>> for DrinkCount {
    fn from(value: Option<u32>) -> Self {
        match value {
            Some(n) => DrinkCount::Recorded(n),
            None => DrinkCount::Absent,
        }
    }
}

impl From<DrinkCount> for Option<u32> {
    fn from(value: DrinkCount) -> Self {
        match value {
            DrinkCount::Absent => None,
            DrinkCount::Recorded(n) => Some(n),
        }
    }
}

/// One calendar day's observation. Unique by `day` within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: NaiveDate,
    #[serde(default)]
    pub count: DrinkCount,
    #[serde(default)]
    pub note: String,
}

impl DayRecord {
    pub fn new(day: NaiveDate, count: DrinkCount) -> Self {
        Self {
            day,
            count,
            note: String::new(),
        }
    }

    /// Builder-style note setter.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
