//! Data models for the marketplace

pub mod auditorium;
pub mod availability;
pub mod enums;
pub mod intervention;
pub mod invoice;
pub mod movie;
pub mod property;
pub mod provider;
pub mod reservation;
pub mod schedule;
pub mod service;
pub mod ticket;
pub mod transaction;
pub mod user;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

// Re-export commonly used types
pub use enums::{InvoiceKind, ReservationStatus, Role, TransactionType};
pub use user::{User, UserClaims, UserShort};

pub(crate) fn positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("Amount must be positive".into()))
    }
}

pub(crate) fn non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new("non_negative").with_message("Price cannot be negative".into()))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start < end {
        Ok(())
    } else {
        Err(ValidationError::new("date_range").with_message("start_date must be before end_date".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_guards() {
        assert!(positive_decimal(&Decimal::new(1, 2)).is_ok());
        assert!(positive_decimal(&Decimal::ZERO).is_err());
        assert!(positive_decimal(&Decimal::new(-5, 0)).is_err());
        assert!(non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(non_negative_decimal(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn date_range_must_be_ordered() {
        let a = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        assert!(validate_date_range(a, b).is_ok());
        assert!(validate_date_range(b, a).is_err());
        assert!(validate_date_range(a, a).is_err());
    }
}
