//! Lifetime achievement totals.

use chrono::{Datelike, NaiveDate, Weekday};

use super::completed_weeks;
use crate::compliance::History;
use crate::record::DayRecord;

/// Saturdays where both Saturday and the following Sunday are explicit zeros.
///
/// Unrecorded or absent days never count as abstinent here.
pub fn alcohol_free_weekends(records: &[DayRecord]) -> u32 {
    weekends_in(&History::new(records))
}

/// Completed weeks with data, no drinking day, and full compliance.
pub fn perfect_weeks(records: &[DayRecord], today: NaiveDate) -> u32 {
    completed_weeks(&History::new(records), today)
        .iter()
        .filter(|w| w.is_perfect())
        .count() as u32
}

pub(super) fn weekends_in(history: &History<'_>) -> u32 {
    history
        .records()
        .filter(|r| r.day.weekday() == Weekday::Sat && r.count.is_abstinent())
        .filter(|r| {
            r.day
                .succ_opt()
                .is_some_and(|sunday| history.count_on(sunday).is_abstinent())
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DrinkCount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(day: NaiveDate, n: u32) -> DayRecord {
        DayRecord::new(day, DrinkCount::Recorded(n))
    }

    #[test]
    fn weekend_needs_both_explicit_zeros() {
        // 2024-03-09 Sat, 2024-03-10 Sun
        let absent_sunday = vec![
            rec(date(2024, 3, 9), 0),
            DayRecord::new(date(2024, 3, 10), DrinkCount::Absent),
        ];
        assert_eq!(alcohol_free_weekends(&absent_sunday), 0);

        let missing_sunday = vec![rec(date(2024, 3, 9), 0)];
        assert_eq!(alcohol_free_weekends(&missing_sunday), 0);

        let both = vec![rec(date(2024, 3, 9), 0), rec(date(2024, 3, 10), 0)];
        assert_eq!(alcohol_free_weekends(&both), 1);
    }

    #[test]
    fn weekends_are_lifetime_not_consecutive() {
        let records = vec![
            rec(date(2024, 3, 2), 0),
            rec(date(2024, 3, 3), 0),
            rec(date(2024, 3, 9), 2),
            rec(date(2024, 3, 10), 0),
            rec(date(2024, 3, 16), 0),
            rec(date(2024, 3, 17), 0),
        ];
        assert_eq!(alcohol_free_weekends(&records), 2);
    }

    #[test]
    fn perfect_week_counts_once_completed() {
        let records: Vec<_> = (4..=10).map(|d| rec(date(2024, 3, d), 0)).collect();

        // Still in progress on its own Sunday
        assert_eq!(perfect_weeks(&records, date(2024, 3, 10)), 0);
        assert_eq!(perfect_weeks(&records, date(2024, 3, 11)), 1);
    }

    #[test]
    fn week_with_a_drink_is_not_perfect() {
        let mut records: Vec<_> = (4..=10).map(|d| rec(date(2024, 3, d), 0)).collect();
        records[2] = rec(date(2024, 3, 6), 1);
        assert_eq!(perfect_weeks(&records, date(2024, 3, 20)), 0);
    }

    #[test]
    fn unrecorded_week_is_not_perfect() {
        let records = vec![DayRecord::new(date(2024, 3, 5), DrinkCount::Absent)];
        assert_eq!(perfect_weeks(&records, date(2024, 3, 20)), 0);
    }
}
