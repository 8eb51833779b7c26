//! Admission checks for tickets and super-ticket bookings

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Schedule does not exist")]
    ScheduleNotFound,
    #[error("Auditorium does not exist")]
    AuditoriumNotFound,
    #[error("Auditorium capacity has been reached")]
    CapacityReached,
    #[error("User does not exist")]
    UserNotFound,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Cannot book more than {0} schedules")]
    TooManySchedules(usize),
    #[error("No uses remaining")]
    NoUsesRemaining,
    #[error("Schedule already booked")]
    AlreadyBooked,
    #[error("Schedule is fully booked")]
    FullyBooked,
}

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::ScheduleNotFound
            | AdmissionError::AuditoriumNotFound
            | AdmissionError::UserNotFound => AppError::NotFound(err.to_string()),
            _ => AppError::BusinessRule(err.to_string()),
        }
    }
}

/// Seats claimed on a schedule: regular tickets plus passes that booked it
pub fn seats_taken(tickets: i64, passes: i64) -> i64 {
    tickets + passes
}

pub fn check_capacity(sold: i64, capacity: i32) -> Result<(), AdmissionError> {
    if sold >= capacity as i64 {
        return Err(AdmissionError::CapacityReached);
    }
    Ok(())
}

pub fn check_balance(balance: Decimal, price: Decimal) -> Result<(), AdmissionError> {
    if balance < price {
        return Err(AdmissionError::InsufficientBalance);
    }
    Ok(())
}

/// Rules a pass must satisfy before the schedule itself is looked at.
/// `max_schedules` is the number of distinct schedules a pass may hold.
pub fn check_pass_booking(
    used_schedules: &[i32],
    uses_remaining: i32,
    schedule_id: i32,
    max_schedules: usize,
) -> Result<(), AdmissionError> {
    if used_schedules.len() >= max_schedules {
        return Err(AdmissionError::TooManySchedules(max_schedules));
    }
    if uses_remaining <= 0 {
        return Err(AdmissionError::NoUsesRemaining);
    }
    if used_schedules.contains(&schedule_id) {
        return Err(AdmissionError::AlreadyBooked);
    }
    Ok(())
}

/// Capacity check for a pass; same count as tickets, different message
pub fn check_pass_capacity(sold: i64, capacity: i32) -> Result<(), AdmissionError> {
    check_capacity(sold, capacity).map_err(|_| AdmissionError::FullyBooked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rejects_at_limit() {
        assert_eq!(check_capacity(14, 15), Ok(()));
        assert_eq!(check_capacity(15, 15), Err(AdmissionError::CapacityReached));
        assert_eq!(check_capacity(seats_taken(10, 5), 15), Err(AdmissionError::CapacityReached));
    }

    #[test]
    fn balance_must_cover_price() {
        let price = Decimal::new(1000, 2);
        assert_eq!(check_balance(Decimal::new(1000, 2), price), Ok(()));
        assert_eq!(
            check_balance(Decimal::new(999, 2), price),
            Err(AdmissionError::InsufficientBalance)
        );
    }

    #[test]
    fn eleventh_booking_is_rejected() {
        let mut used = Vec::new();
        let mut remaining = 10;
        for schedule_id in 1..=10 {
            check_pass_booking(&used, remaining, schedule_id, 10).unwrap();
            used.push(schedule_id);
            remaining -= 1;
        }
        let err = check_pass_booking(&used, remaining, 11, 10).unwrap_err();
        assert_eq!(err, AdmissionError::TooManySchedules(10));
        assert_eq!(err.to_string(), "Cannot book more than 10 schedules");
    }

    #[test]
    fn schedule_cap_follows_configured_uses() {
        let used: Vec<i32> = (1..=10).collect();
        assert_eq!(check_pass_booking(&used, 2, 11, 12), Ok(()));

        let used: Vec<i32> = (1..=12).collect();
        let err = check_pass_booking(&used, 3, 13, 12).unwrap_err();
        assert_eq!(err.to_string(), "Cannot book more than 12 schedules");
    }

    #[test]
    fn same_schedule_cannot_be_booked_twice() {
        let err = check_pass_booking(&[4, 8], 8, 8, 10).unwrap_err();
        assert_eq!(err.to_string(), "Schedule already booked");
    }

    #[test]
    fn exhausted_pass_is_rejected() {
        assert_eq!(
            check_pass_booking(&[1, 2], 0, 3, 10),
            Err(AdmissionError::NoUsesRemaining)
        );
    }

    #[test]
    fn pass_capacity_uses_its_own_message() {
        let err = check_pass_capacity(30, 30).unwrap_err();
        assert_eq!(err.to_string(), "Schedule is fully booked");
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        assert!(matches!(
            AppError::from(AdmissionError::ScheduleNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(AdmissionError::InsufficientBalance),
            AppError::BusinessRule(_)
        ));
    }
}
