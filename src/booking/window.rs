//! Time-of-day rules: screening slots and the admission window

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SlotViolation {
    #[error("Schedule date cannot be in the past")]
    InPast,
    #[error("Schedules can only be set from Monday to Friday")]
    Weekend,
    #[error("Schedules must start between {0:02}:00 and {1:02}:00")]
    OutsideHours(u32, u32),
}

/// Check a screening start, expressed in local time, against the opening rules.
///
/// The past check compares dates only, so a screening earlier today is
/// accepted. The closing hour is inclusive at exactly `closing_hour:00`.
pub fn check_screening_slot(
    start: NaiveDateTime,
    today: NaiveDate,
    opening_hour: u32,
    closing_hour: u32,
) -> Result<(), SlotViolation> {
    if start.date() < today {
        return Err(SlotViolation::InPast);
    }

    if matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(SlotViolation::Weekend);
    }

    let minutes = start.hour() * 60 + start.minute();
    let close = closing_hour * 60;
    if start.hour() < opening_hour || minutes > close || (minutes == close && start.second() > 0) {
        return Err(SlotViolation::OutsideHours(opening_hour, closing_hour));
    }

    Ok(())
}

/// A ticket or pass admits only within `window_minutes` either side of the start
pub fn within_admission_window(now: DateTime<Utc>, start: DateTime<Utc>, window_minutes: i64) -> bool {
    (now - start).num_milliseconds().abs() <= window_minutes * 60_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn local(d: u32, h: u32, m: u32) -> NaiveDateTime {
        // March 2026: the 2nd is a Monday
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn weekday_within_hours_is_accepted() {
        assert_eq!(check_screening_slot(local(3, 9, 0), today(), 9, 20), Ok(()));
        assert_eq!(check_screening_slot(local(6, 20, 0), today(), 9, 20), Ok(()));
    }

    #[test]
    fn earlier_today_is_not_in_the_past() {
        assert_eq!(check_screening_slot(local(2, 9, 30), today(), 9, 20), Ok(()));
    }

    #[test]
    fn yesterday_is_rejected() {
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(
            check_screening_slot(yesterday, today(), 9, 20),
            Err(SlotViolation::InPast)
        );
    }

    #[test]
    fn weekends_are_rejected() {
        assert_eq!(
            check_screening_slot(local(7, 14, 0), today(), 9, 20),
            Err(SlotViolation::Weekend)
        );
        assert_eq!(
            check_screening_slot(local(8, 14, 0), today(), 9, 20),
            Err(SlotViolation::Weekend)
        );
    }

    #[test]
    fn hours_outside_opening_are_rejected() {
        assert_eq!(
            check_screening_slot(local(4, 8, 59), today(), 9, 20),
            Err(SlotViolation::OutsideHours(9, 20))
        );
        assert_eq!(
            check_screening_slot(local(4, 20, 1), today(), 9, 20),
            Err(SlotViolation::OutsideHours(9, 20))
        );
    }

    #[test]
    fn admission_window_boundary() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
        assert!(within_admission_window(start, start, 15));
        assert!(within_admission_window(start + Duration::minutes(15), start, 15));
        assert!(within_admission_window(start - Duration::minutes(15), start, 15));
        assert!(!within_admission_window(start + Duration::minutes(15) + Duration::seconds(1), start, 15));
        assert!(!within_admission_window(start - Duration::minutes(16), start, 15));
        assert!(!within_admission_window(start + Duration::hours(3), start, 15));
    }
}
