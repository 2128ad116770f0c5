use chrono::{Datelike, NaiveDate};

use crate::models::BlockedDateMap;
use crate::services::dates::format_date;

const EVENING: &[&str] = &["18:00", "18:30", "19:00", "19:30", "20:00"];
const LUNCH_AND_EVENING: &[&str] = &[
    "11:30", "12:00", "12:30", "13:00", "18:00", "18:30", "19:00", "19:30", "20:00",
];

/// Candidate slots per day of week, Sunday first. Sunday and Monday closed.
pub const WEEKLY_SCHEDULE: [&[&str]; 7] = [
    &[],
    &[],
    EVENING,
    EVENING,
    LUNCH_AND_EVENING,
    LUNCH_AND_EVENING,
    EVENING,
];

/// 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

pub fn candidate_slots(date: NaiveDate) -> &'static [&'static str] {
    WEEKLY_SCHEDULE[day_of_week(date)]
}

pub fn is_closed(date: NaiveDate) -> bool {
    candidate_slots(date).is_empty()
}

/// Bookable slots for `date`: the weekly candidates minus whatever the
/// blocked map lists for that day, in schedule order.
pub fn available_times(date: NaiveDate, blocked: &BlockedDateMap) -> Vec<String> {
    let taken = blocked.blocked_times(&format_date(date));
    candidate_slots(date)
        .iter()
        .filter(|slot| !taken.iter().any(|t| t == *slot))
        .map(|slot| slot.to_string())
        .collect()
}

/// Whether the date picker offers `date`: not in the past, not a closed day,
/// and not listed in the blocked map at all.
pub fn is_selectable(date: NaiveDate, today: NaiveDate, blocked: &BlockedDateMap) -> bool {
    date >= today && !is_closed(date) && !blocked.contains_date(&format_date(date))
}

/// Selectable dates in `[from, from + days)`.
pub fn selectable_dates(
    from: NaiveDate,
    days: u32,
    today: NaiveDate,
    blocked: &BlockedDateMap,
) -> Vec<NaiveDate> {
    from.iter_days()
        .take(days as usize)
        .filter(|d| is_selectable(*d, today, blocked))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn blocked(entries: &[(&str, &[&str])]) -> BlockedDateMap {
        entries
            .iter()
            .map(|(date, slots)| (*date, slots.to_vec()))
            .collect()
    }

    #[test]
    fn test_day_of_week_sunday_first() {
        // 2024-07-07 is a Sunday
        assert_eq!(day_of_week(d("2024-07-07")), 0);
        assert_eq!(day_of_week(d("2024-07-08")), 1);
        assert_eq!(day_of_week(d("2024-07-04")), 4);
        assert_eq!(day_of_week(d("2024-07-06")), 6);
    }

    #[test]
    fn test_closed_days_always_empty() {
        let everything = blocked(&[("2024-07-07", &[]), ("2024-07-08", &["18:00"])]);
        for date in ["2024-07-07", "2024-07-08", "2024-07-14", "2024-07-15"] {
            assert!(available_times(d(date), &BlockedDateMap::default()).is_empty());
            assert!(available_times(d(date), &everything).is_empty());
            assert!(is_closed(d(date)));
        }
    }

    #[test]
    fn test_evening_days_full_when_nothing_blocked() {
        // Tuesday, Wednesday, Saturday
        for date in ["2024-07-02", "2024-07-03", "2024-07-06"] {
            assert_eq!(
                available_times(d(date), &BlockedDateMap::default()),
                EVENING
            );
        }
    }

    #[test]
    fn test_evening_days_remove_exactly_blocked() {
        let map = blocked(&[("2024-07-06", &["18:30", "20:00", "22:00"])]);
        assert_eq!(
            available_times(d("2024-07-06"), &map),
            ["18:00", "19:00", "19:30"]
        );
    }

    #[test]
    fn test_thursday_scenario() {
        let map = blocked(&[("2024-07-04", &["18:00", "19:00"])]);
        assert_eq!(
            available_times(d("2024-07-04"), &map),
            ["11:30", "12:00", "12:30", "13:00", "18:30", "19:30", "20:00"]
        );
    }

    #[test]
    fn test_friday_has_lunch() {
        assert_eq!(
            available_times(d("2024-07-05"), &BlockedDateMap::default()),
            LUNCH_AND_EVENING
        );
    }

    #[test]
    fn test_blocks_for_other_dates_ignored() {
        let map = blocked(&[("2024-07-05", &["11:30"])]);
        assert_eq!(available_times(d("2024-07-04"), &map).len(), 9);
    }

    #[test]
    fn test_fully_blocked_day_is_empty() {
        let map = blocked(&[("2024-07-03", EVENING)]);
        assert!(available_times(d("2024-07-03"), &map).is_empty());
    }

    #[test]
    fn test_selectable_rules() {
        let today = d("2024-07-03");
        let map = blocked(&[("2024-07-05", &["11:30"])]);
        // past
        assert!(!is_selectable(d("2024-07-02"), today, &map));
        // today, open
        assert!(is_selectable(d("2024-07-03"), today, &map));
        // listed in the blocked map
        assert!(!is_selectable(d("2024-07-05"), today, &map));
        // Sunday
        assert!(!is_selectable(d("2024-07-07"), today, &map));
    }

    #[test]
    fn test_selectable_dates_week() {
        let today = d("2024-07-01");
        let map = blocked(&[("2024-07-05", &["11:30"])]);
        let dates = selectable_dates(today, 7, today, &map);
        assert_eq!(
            dates,
            [d("2024-07-02"), d("2024-07-03"), d("2024-07-04"), d("2024-07-06")]
        );
    }
}
