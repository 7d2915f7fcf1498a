//! Historical streak scans over the full record history.
//!
//! Every function takes the reference date `today` explicitly; nothing
//! here reads the clock. Backward scans are bounded by the lookback
//! constants below so sparse or very old data always terminates.

mod achievements;

pub use achievements::{alcohol_free_weekends, perfect_weeks};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{shift_days, week_bounds};
use crate::compliance::{History, WeekSummary};
use crate::record::{DayRecord, DrinkCount};

/// Days scanned backward for the current abstinence and drinking streaks.
pub const ABSTINENCE_LOOKBACK_DAYS: u64 = 365;

/// Days scanned backward for the last per-day limit violation.
pub const VIOLATION_LOOKBACK_DAYS: u64 = 365;

/// Completed weeks scanned backward for the current compliance streak.
pub const COMPLIANCE_LOOKBACK_WEEKS: u64 = 104;

/// Streak and achievement snapshot as of a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub as_of: NaiveDate,
    /// Explicit zero days before today, skipping unrecorded days
    pub current_abstinence: u32,
    pub longest_abstinence: u32,
    /// Consecutive drinking days ending today
    pub current_drinking: u32,
    /// Consecutive compliant completed weeks ending last week
    pub current_compliance_weeks: u32,
    pub longest_compliance_weeks: u32,
    /// Offset of the most recent day above the per-day limit (0 = today)
    pub days_since_violation: Option<u32>,
    pub alcohol_free_weekends: u32,
    pub perfect_weeks: u32,
}

/// Compute every streak and achievement from one history index.
pub fn compute_streak_stats(records: &[DayRecord], today: NaiveDate) -> StreakStats {
    let history = History::new(records);
    let current_abstinence = current_abstinence_in(&history, today);
    let completed = completed_weeks(&history, today);

    StreakStats {
        as_of: today,
        current_abstinence,
        // The trailing run skips unrecorded days while the historical scan
        // breaks on them; the best streak never reads below the current one.
        longest_abstinence: longest_abstinence_in(&history).max(current_abstinence),
        current_drinking: current_drinking_in(&history, today),
        current_compliance_weeks: current_compliance_in(&history, today),
        longest_compliance_weeks: longest_run(&completed),
        days_since_violation: days_since_violation_in(&history, today),
        alcohol_free_weekends: achievements::weekends_in(&history),
        perfect_weeks: completed.iter().filter(|w| w.is_perfect()).count() as u32,
    }
}

/// Explicit zero days before `today`, walking backward.
///
/// Returns 0 when today is a drinking day. Unrecorded days are skipped
/// without breaking the streak; the first drinking day ends it.
pub fn current_abstinence_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    current_abstinence_in(&History::new(records), today)
}

/// Longest run of non-drinking records in day order.
///
/// A calendar gap between consecutive records breaks the run, as does any
/// drinking day. Records with an absent count extend it. Because gaps break
/// this scan but not [`current_abstinence_streak`], the raw result can be
/// shorter than the current streak; [`StreakStats::longest_abstinence`]
/// reports the larger of the two.
pub fn longest_abstinence_streak(records: &[DayRecord]) -> u32 {
    longest_abstinence_in(&History::new(records))
}

/// Consecutive drinking days ending today (0 if today is not one).
pub fn current_drinking_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    current_drinking_in(&History::new(records), today)
}

/// Consecutive compliant completed weeks, counting back from last week.
///
/// Returns 0 when the in-progress week already has data and breaks a rule.
/// A week without recorded data ends the streak.
pub fn current_compliance_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    current_compliance_in(&History::new(records), today)
}

/// Longest run of compliant completed weeks since the first record.
pub fn longest_compliance_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    longest_run(&completed_weeks(&History::new(records), today))
}

/// Days back from `today` to the latest day above the per-day limit.
pub fn days_since_violation(records: &[DayRecord], today: NaiveDate) -> Option<u32> {
    days_since_violation_in(&History::new(records), today)
}

fn days_before(today: NaiveDate, lookback: u64) -> impl Iterator<Item = NaiveDate> {
    (1..=lookback).map_while(move |offset| today.checked_sub_days(Days::new(offset)))
}

fn current_abstinence_in(history: &History<'_>, today: NaiveDate) -> u32 {
    if history.count_on(today).is_drinking() {
        return 0;
    }

    let mut streak = 0;
    for day in days_before(today, ABSTINENCE_LOOKBACK_DAYS) {
        match history.count_on(day) {
            DrinkCount::Recorded(0) => streak += 1,
            DrinkCount::Recorded(_) => break,
            DrinkCount::Absent => continue,
        }
    }
    streak
}

fn longest_abstinence_in(history: &History<'_>) -> u32 {
    let mut longest = 0;
    let mut running = 0;
    let mut previous: Option<NaiveDate> = None;

    for record in history.records() {
        if previous.is_some_and(|prev| (record.day - prev).num_days() > 1) {
            running = 0;
        }
        if record.count.is_drinking() {
            running = 0;
        } else {
            running += 1;
            longest = longest.max(running);
        }
        previous = Some(record.day);
    }
    longest
}

fn current_drinking_in(history: &History<'_>, today: NaiveDate) -> u32 {
    if !history.count_on(today).is_drinking() {
        return 0;
    }
    let earlier = days_before(today, ABSTINENCE_LOOKBACK_DAYS)
        .take_while(|day| history.count_on(*day).is_drinking())
        .count() as u32;
    earlier + 1
}

fn current_compliance_in(history: &History<'_>, today: NaiveDate) -> u32 {
    let this_week = history.week(today);
    if this_week.has_data() && !this_week.rule_ok {
        return 0;
    }

    let mut streak = 0;
    for weeks_back in 1..=COMPLIANCE_LOOKBACK_WEEKS {
        let Some(monday) = this_week.start.checked_sub_days(Days::new(7 * weeks_back)) else {
            break;
        };
        if !history.week(monday).counts_as_compliant() {
            break;
        }
        streak += 1;
    }
    streak
}

fn days_since_violation_in(history: &History<'_>, today: NaiveDate) -> Option<u32> {
    std::iter::once(today)
        .chain(days_before(today, VIOLATION_LOOKBACK_DAYS))
        .position(|day| history.count_on(day).exceeds_limit())
        .map(|offset| offset as u32)
}

/// Weeks from the first record's week up to, but excluding, the week
/// containing `today`.
pub(crate) fn completed_weeks(history: &History<'_>, today: NaiveDate) -> Vec<WeekSummary> {
    let Some(first) = history.first_day() else {
        return Vec::new();
    };
    let current_monday = week_bounds(today).0;

    let mut weeks = Vec::new();
    let mut monday = week_bounds(first).0;
    while monday < current_monday {
        weeks.push(history.week(monday));
        let next = shift_days(monday, 7);
        if next == monday {
            break;
        }
        monday = next;
    }
    weeks
}

fn longest_run(weeks: &[WeekSummary]) -> u32 {
    let mut longest = 0;
    let mut running = 0;
    for week in weeks {
        if week.counts_as_compliant() {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }
    longest
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

    fn absent(day: NaiveDate) -> DayRecord {
        DayRecord::new(day, DrinkCount::Absent)
    }

    /// Wednesday
    fn today() -> NaiveDate {
        date(2024, 3, 20)
    }

    #[test]
    fn empty_history_is_neutral() {
        let stats = compute_streak_stats(&[], today());
        assert_eq!(stats.current_abstinence, 0);
        assert_eq!(stats.longest_abstinence, 0);
        assert_eq!(stats.current_drinking, 0);
        assert_eq!(stats.current_compliance_weeks, 0);
        assert_eq!(stats.longest_compliance_weeks, 0);
        assert_eq!(stats.days_since_violation, None);
        assert_eq!(stats.alcohol_free_weekends, 0);
        assert_eq!(stats.perfect_weeks, 0);
    }

    #[test]
    fn drinking_today_resets_current_abstinence() {
        let mut records: Vec<_> = (1..=19).map(|d| rec(date(2024, 3, d), 0)).collect();
        records.push(rec(today(), 2));
        assert_eq!(current_abstinence_streak(&records, today()), 0);
        assert_eq!(current_drinking_streak(&records, today()), 1);
    }

    #[test]
    fn current_abstinence_skips_unrecorded_days() {
        let records = vec![
            rec(date(2024, 3, 14), 2),
            rec(date(2024, 3, 15), 0),
            absent(date(2024, 3, 16)),
            rec(date(2024, 3, 17), 0),
            // 03-18 has no record at all
            rec(date(2024, 3, 19), 0),
        ];
        assert_eq!(current_abstinence_streak(&records, today()), 3);
    }

    #[test]
    fn current_abstinence_excludes_today() {
        let records = vec![rec(date(2024, 3, 19), 1), rec(today(), 0)];
        assert_eq!(current_abstinence_streak(&records, today()), 0);
    }

    #[test]
    fn current_abstinence_is_bounded_by_lookback() {
        let start = date(2022, 1, 1);
        let records: Vec<_> = start
            .iter_days()
            .take_while(|d| *d < today())
            .map(|d| rec(d, 0))
            .collect();
        assert_eq!(
            current_abstinence_streak(&records, today()),
            ABSTINENCE_LOOKBACK_DAYS as u32
        );
    }

    #[test]
    fn current_drinking_is_bounded_by_lookback() {
        let records: Vec<_> = date(2022, 1, 1)
            .iter_days()
            .take_while(|d| *d <= today())
            .map(|d| rec(d, 1))
            .collect();
        // today plus the full lookback window
        assert_eq!(
            current_drinking_streak(&records, today()),
            ABSTINENCE_LOOKBACK_DAYS as u32 + 1
        );
    }

    #[test]
    fn current_compliance_is_bounded_by_lookback() {
        // One drink every Monday for 150 weeks ending the week before 2024-06-17
        let first = date(2021, 8, 2);
        let records: Vec<_> = (0..150)
            .map(|w| rec(shift_days(first, 7 * w), 1))
            .collect();
        let today = date(2024, 6, 19);

        assert_eq!(
            current_compliance_streak(&records, today),
            COMPLIANCE_LOOKBACK_WEEKS as u32
        );
        assert_eq!(longest_compliance_streak(&records, today), 150);
    }

    #[test]
    fn longest_abstinence_breaks_on_gaps_and_drinking() {
        let records = vec![
            rec(date(2024, 1, 1), 0),
            absent(date(2024, 1, 2)),
            rec(date(2024, 1, 3), 0),
            rec(date(2024, 1, 4), 0),
            rec(date(2024, 1, 5), 1),
            rec(date(2024, 1, 6), 0),
            // gap: 01-07 missing
            rec(date(2024, 1, 8), 0),
            rec(date(2024, 1, 9), 0),
        ];
        assert_eq!(longest_abstinence_streak(&records), 4);
    }

    #[test]
    fn longest_dominates_current_in_stats() {
        // Trailing zeros separated by unrecorded days: the historical scan
        // sees runs of 1, the current streak sees 3.
        let records = vec![
            rec(date(2024, 3, 13), 0),
            rec(date(2024, 3, 15), 0),
            rec(date(2024, 3, 17), 0),
        ];
        assert_eq!(longest_abstinence_streak(&records), 1);
        let stats = compute_streak_stats(&records, today());
        assert_eq!(stats.current_abstinence, 3);
        assert_eq!(stats.longest_abstinence, 3);
    }

    #[test]
    fn drinking_streak_counts_back_from_today() {
        let records = vec![
            rec(date(2024, 3, 16), 1),
            rec(date(2024, 3, 17), 0),
            rec(date(2024, 3, 18), 2),
            rec(date(2024, 3, 19), 1),
            rec(today(), 1),
        ];
        assert_eq!(current_drinking_streak(&records, today()), 3);
        assert_eq!(current_drinking_streak(&records, date(2024, 3, 17)), 0);
    }

    #[test]
    fn days_since_violation_finds_latest() {
        let records = vec![rec(date(2024, 3, 10), 5), rec(date(2024, 3, 15), 4)];
        assert_eq!(days_since_violation(&records, today()), Some(5));
        assert_eq!(days_since_violation(&[rec(today(), 6)], today()), Some(0));
        assert_eq!(days_since_violation(&[rec(today(), 3)], today()), None);
    }

    #[test]
    fn days_since_violation_ignores_future_and_old_days() {
        let records = vec![rec(date(2024, 3, 21), 9), rec(date(2023, 3, 1), 9)];
        assert_eq!(days_since_violation(&records, today()), None);
    }

    fn compliant_week(monday: NaiveDate) -> Vec<DayRecord> {
        vec![rec(monday, 1), rec(shift_days(monday, 1), 0)]
    }

    #[test]
    fn current_compliance_counts_completed_weeks() {
        let mut records = Vec::new();
        // Three compliant weeks before the current week of 03-18
        for monday in [date(2024, 2, 26), date(2024, 3, 4), date(2024, 3, 11)] {
            records.extend(compliant_week(monday));
        }
        assert_eq!(current_compliance_streak(&records, today()), 3);

        // An unrecorded week ends the streak.
        let sparse: Vec<_> = records
            .iter()
            .filter(|r| r.day >= date(2024, 3, 4))
            .cloned()
            .collect();
        assert_eq!(current_compliance_streak(&sparse, today()), 2);
        assert_eq!(current_compliance_streak(&sparse, date(2024, 3, 27)), 0);
    }

    #[test]
    fn current_week_violation_zeroes_compliance() {
        let mut records = compliant_week(date(2024, 3, 11));
        records.push(rec(date(2024, 3, 18), 5));
        assert_eq!(current_compliance_streak(&records, today()), 0);
        assert_eq!(longest_compliance_streak(&records, today()), 1);
    }

    #[test]
    fn current_week_without_violation_does_not_count() {
        let mut records = compliant_week(date(2024, 3, 11));
        records.push(rec(date(2024, 3, 18), 1));
        assert_eq!(current_compliance_streak(&records, today()), 1);
    }

    #[test]
    fn longest_compliance_resets_on_bad_weeks() {
        let mut records = Vec::new();
        for monday in [date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)] {
            records.extend(compliant_week(monday));
        }
        // 01-22 week: four drinking days
        for d in [22, 24, 26, 28] {
            records.push(rec(date(2024, 1, d), 1));
        }
        records.extend(compliant_week(date(2024, 1, 29)));
        assert_eq!(longest_compliance_streak(&records, today()), 3);
    }

    #[test]
    fn stats_are_deterministic() {
        let records = vec![rec(date(2024, 3, 9), 0), rec(date(2024, 3, 10), 0)];
        let a = compute_streak_stats(&records, today());
        let b = compute_streak_stats(&records, today());
        assert_eq!(a, b);
        assert_eq!(a.alcohol_free_weekends, 1);
    }
}
