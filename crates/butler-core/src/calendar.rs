//! Week and month boundary resolution.
//!
//! Weeks are ISO weeks: Monday is the first day, Sunday the last. All
//! functions here are total; arithmetic saturates at chrono's date range
//! instead of panicking.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::record::DayRecord;

/// Shift `date` by a signed number of days, saturating at the date range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(delta).unwrap_or(NaiveDate::MIN)
    }
}

/// Monday and Sunday of the ISO week containing `anchor`.
pub fn week_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(anchor.weekday().num_days_from_monday());
    let monday = shift_days(anchor, -offset);
    (monday, shift_days(monday, 6))
}

/// First and last day of the calendar month containing `anchor`.
pub fn month_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = shift_days(anchor, -i64::from(anchor.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Mondays of every ISO week whose span intersects `[start, end]`.
pub fn weeks_overlapping(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut mondays = Vec::new();
    let mut monday = week_bounds(start).0;
    while monday <= end {
        mondays.push(monday);
        let next = shift_days(monday, 7);
        if next == monday {
            break;
        }
        monday = next;
    }
    mondays
}

/// Week list for browsing a history.
///
/// Covers the earliest of (first record, today) through the latest of
/// (last record, today), plus `lookahead_weeks` extra weeks. Empty when
/// there are no records.
pub fn history_weeks(
    records: &[DayRecord],
    today: NaiveDate,
    lookahead_weeks: u32,
) -> Vec<NaiveDate> {
    let (Some(first), Some(last)) = (
        records.iter().map(|r| r.day).min(),
        records.iter().map(|r| r.day).max(),
    ) else {
        return Vec::new();
    };

    let earliest = first.min(today);
    let latest = last.max(today);
    let end = shift_days(week_bounds(latest).0, 7 * i64::from(lookahead_weeks));
    weeks_overlapping(earliest, end)
}
