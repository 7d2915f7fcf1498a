//! Monthly roll-up of weekly compliance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{History, WeekSummary};
use crate::calendar::weeks_overlapping;
use crate::record::DayRecord;

/// Calendar month decomposed into the ISO weeks that overlap it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// First day of the month
    pub start: NaiveDate,
    /// Last day of the month
    pub end: NaiveDate,
    /// Overlapping weeks (at most 6), edge weeks may extend past the month
    pub weeks: Vec<WeekSummary>,
    pub total_drinking_days: u32,
    pub total_drinks: u32,
    /// Days inside the month explicitly recorded as zero
    pub sober_days: u32,
    pub recorded_days: u32,
    /// Weeks with recorded data that met every rule
    pub compliant_weeks: u32,
}

pub(super) fn build(history: &History<'_>, start: NaiveDate, end: NaiveDate) -> MonthSummary {
    // Weeks are evaluated against the whole history, not the month slice,
    // so edge weeks keep their cross-week gap check.
    let weeks: Vec<WeekSummary> = weeks_overlapping(start, end)
        .into_iter()
        .map(|monday| history.week(monday))
        .collect();

    let mut summary = MonthSummary {
        start,
        end,
        compliant_weeks: weeks.iter().filter(|w| w.counts_as_compliant()).count() as u32,
        weeks,
        total_drinking_days: 0,
        total_drinks: 0,
        sober_days: 0,
        recorded_days: 0,
    };

    for record in history.between(start, end) {
        if record.count.is_drinking() {
            summary.total_drinking_days += 1;
        }
        if record.count.is_abstinent() {
            summary.sober_days += 1;
        }
        if record.count.is_recorded() {
            summary.recorded_days += 1;
        }
        summary.total_drinks = summary.total_drinks.saturating_add(record.count.effective());
    }

    summary
}

/// Summary for the calendar month containing `anchor`.
pub fn summarize_month(records: &[DayRecord], anchor: NaiveDate) -> MonthSummary {
    History::new(records).month(anchor)
}
