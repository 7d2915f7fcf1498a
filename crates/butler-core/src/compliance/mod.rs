//! Rule of 3 compliance evaluation.
//!
//! A week complies when all three rules hold:
//! - **Days**: at most 3 drinking days in the ISO week
//! - **Per day**: no day above 3 drinks
//! - **Gap**: no two calendar-adjacent drinking days, including the
//!   Sunday before the week paired with its Monday
//!
//! Every evaluation reads the full record history so the gap rule can look
//! across week boundaries. Absent counts are treated as 0 for thresholds
//! and sums but never count as recorded days.

mod month;

pub use month::{summarize_month, MonthSummary};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{month_bounds, week_bounds};
use crate::record::{DayRecord, DrinkCount, MAX_DRINKING_DAYS_PER_WEEK};

/// Day-keyed, read-only index over a record slice.
///
/// Input order does not matter. Duplicate days are a store bug; the last
/// one in the slice wins.
#[derive(Debug, Clone, Default)]
pub struct History<'a> {
    days: BTreeMap<NaiveDate, &'a DayRecord>,
}

impl<'a> History<'a> {
    pub fn new(records: &'a [DayRecord]) -> Self {
        Self {
            days: records.iter().map(|r| (r.day, r)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, day: NaiveDate) -> Option<&'a DayRecord> {
        self.days.get(&day).copied()
    }

    /// Count on `day`; a missing record reads as absent.
    pub fn count_on(&self, day: NaiveDate) -> DrinkCount {
        self.get(day).map_or(DrinkCount::Absent, |r| r.count)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Records in day order.
    pub fn records(&self) -> impl Iterator<Item = &'a DayRecord> + '_ {
        self.days.values().copied()
    }

    /// Records with `start <= day <= end`, in day order.
    pub fn between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &'a DayRecord> + '_ {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        self.days
            .range(lo..=hi)
            .map(|(_, r)| *r)
            .filter(move |r| start <= r.day && r.day <= end)
    }

    /// Compliance summary for the ISO week containing `anchor`.
    pub fn week(&self, anchor: NaiveDate) -> WeekSummary {
        let (start, end) = week_bounds(anchor);
        let days: Vec<DayRecord> = self.between(start, end).cloned().collect();

        let drinking_days = days.iter().filter(|r| r.count.is_drinking()).count() as u32;
        let total_drinks = days
            .iter()
            .fold(0u32, |sum, r| sum.saturating_add(r.count.effective()));
        let recorded_days = days.iter().filter(|r| r.count.is_recorded()).count() as u32;
        let abstinent_days = days.iter().filter(|r| r.count.is_abstinent()).count() as u32;

        let rule_days_ok = drinking_days <= MAX_DRINKING_DAYS_PER_WEEK;
        let rule_per_day_ok = days.iter().all(|r| !r.count.exceeds_limit());
        let rule_gap_ok = self.gap_ok(start, end);

        WeekSummary {
            start,
            end,
            days,
            drinking_days,
            total_drinks,
            recorded_days,
            abstinent_days,
            rule_days_ok,
            rule_per_day_ok,
            rule_gap_ok,
            rule_ok: rule_days_ok && rule_per_day_ok && rule_gap_ok,
        }
    }

    /// Summary for the calendar month containing `anchor`.
    pub fn month(&self, anchor: NaiveDate) -> MonthSummary {
        let (start, end) = month_bounds(anchor);
        month::build(self, start, end)
    }

    fn gap_ok(&self, start: NaiveDate, end: NaiveDate) -> bool {
        // Sunday of the previous week lies outside the selected range but
        // still pairs with this Monday.
        let sunday_before = start.pred_opt().map(|d| self.count_on(d));
        if sunday_before.is_some_and(DrinkCount::is_drinking)
            && self.count_on(start).is_drinking()
        {
            return false;
        }

        let drinking: Vec<bool> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| self.count_on(d).is_drinking())
            .collect();
        !drinking.windows(2).any(|pair| pair[0] && pair[1])
    }
}

/// Compliance summary for one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Monday of the week
    pub start: NaiveDate,
    /// Sunday of the week
    pub end: NaiveDate,
    /// Records inside the week, in day order
    pub days: Vec<DayRecord>,
    /// Days with an effective count above zero
    pub drinking_days: u32,
    /// Sum of effective counts
    pub total_drinks: u32,
    /// Days with an explicit count (zero included)
    pub recorded_days: u32,
    /// Days explicitly recorded as zero
    pub abstinent_days: u32,
    pub rule_days_ok: bool,
    pub rule_per_day_ok: bool,
    pub rule_gap_ok: bool,
    pub rule_ok: bool,
}

impl WeekSummary {
    pub fn has_data(&self) -> bool {
        self.recorded_days > 0
    }

    /// Recorded, compliant, and without a single drinking day.
    pub fn is_perfect(&self) -> bool {
        self.has_data() && self.drinking_days == 0 && self.rule_ok
    }

    /// Counts the compliance streaks: data present and all rules held.
    pub(crate) fn counts_as_compliant(&self) -> bool {
        self.has_data() && self.rule_ok
    }

    /// Record for `day` if it falls in this week and was stored.
    pub fn record_on(&self, day: NaiveDate) -> Option<&DayRecord> {
        self.days.iter().find(|r| r.day == day)
    }
}

/// Compliance summary for the ISO week containing `anchor`.
pub fn summarize_week(records: &[DayRecord], anchor: NaiveDate) -> WeekSummary {
    History::new(records).week(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(day: NaiveDate, n: u32) -> DayRecord {
        DayRecord::new(day, DrinkCount::Recorded(n))
    }

    // Week of 2024-03-04 (Mon) .. 2024-03-10 (Sun)
    const MON: u32 = 4;

    #[test]
    fn empty_history_is_compliant() {
        let week = summarize_week(&[], date(2024, 3, 6));
        assert_eq!(week.drinking_days, 0);
        assert_eq!(week.recorded_days, 0);
        assert!(week.rule_ok);
        assert!(!week.has_data());
        assert!(!week.is_perfect());
    }

    #[test]
    fn non_adjacent_drinking_days_pass() {
        let records = vec![
            rec(date(2024, 3, MON), 1),
            rec(date(2024, 3, MON + 2), 1),
            rec(date(2024, 3, MON + 4), 1),
        ];
        let week = summarize_week(&records, date(2024, 3, MON));
        assert_eq!(week.drinking_days, 3);
        assert!(week.rule_days_ok);
        assert!(week.rule_gap_ok);
        assert!(week.rule_ok);
    }

    #[test]
    fn four_drinking_days_fail_day_rule() {
        let records: Vec<_> = [0u32, 2, 4, 6]
            .into_iter()
            .map(|off| rec(date(2024, 3, MON + off), 1))
            .collect();
        let week = summarize_week(&records, date(2024, 3, MON));
        assert_eq!(week.drinking_days, 4);
        assert!(!week.rule_days_ok);
        assert!(week.rule_gap_ok);
        assert!(!week.rule_ok);
    }

    #[test]
    fn adjacent_days_inside_week_fail_gap_rule() {
        let records = vec![rec(date(2024, 3, 8), 1), rec(date(2024, 3, 9), 2)];
        let week = summarize_week(&records, date(2024, 3, 8));
        assert!(week.rule_days_ok);
        assert!(week.rule_per_day_ok);
        assert!(!week.rule_gap_ok);
        assert!(!week.rule_ok);
    }

    #[test]
    fn sunday_before_pairs_with_monday() {
        let records = vec![rec(date(2024, 3, 3), 1), rec(date(2024, 3, 4), 1)];
        let this_week = summarize_week(&records, date(2024, 3, 4));
        assert!(!this_week.rule_gap_ok);
        assert_eq!(this_week.drinking_days, 1);

        // The earlier week is not affected by its following Monday.
        let prior_week = summarize_week(&records, date(2024, 3, 3));
        assert!(prior_week.rule_gap_ok);
    }

    #[test]
    fn over_limit_day_fails_per_day_rule() {
        let records = vec![rec(date(2024, 3, 6), 4)];
        let week = summarize_week(&records, date(2024, 3, 6));
        assert!(!week.rule_per_day_ok);
        assert!(week.rule_days_ok);
        assert!(!week.rule_ok);
        assert_eq!(week.total_drinks, 4);
    }

    #[test]
    fn absent_and_zero_are_counted_differently() {
        let records = vec![
            DayRecord::new(date(2024, 3, 4), DrinkCount::Absent).with_note("travel"),
            rec(date(2024, 3, 5), 0),
        ];
        let week = summarize_week(&records, date(2024, 3, 4));
        assert_eq!(week.drinking_days, 0);
        assert_eq!(week.total_drinks, 0);
        assert_eq!(week.recorded_days, 1);
        assert_eq!(week.abstinent_days, 1);
        assert_eq!(week.days.len(), 2);
    }

    #[test]
    fn records_outside_week_are_ignored() {
        let records = vec![rec(date(2024, 3, 11), 5), rec(date(2024, 3, 1), 5)];
        let week = summarize_week(&records, date(2024, 3, 6));
        assert!(week.days.is_empty());
        assert!(week.rule_ok);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut records = vec![
            rec(date(2024, 3, 9), 2),
            rec(date(2024, 3, 4), 1),
            rec(date(2024, 3, 6), 0),
        ];
        let a = summarize_week(&records, date(2024, 3, 6));
        records.reverse();
        let b = summarize_week(&records, date(2024, 3, 6));
        assert_eq!(a, b);
        assert_eq!(a.days[0].day, date(2024, 3, 4));
    }
}
