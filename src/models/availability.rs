//! Availability blocks: date ranges during which a property cannot be booked

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Availability {
    pub id: i32,
    pub property_id: i32,
    /// Set when the block was created by a reservation
    pub reservation_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_block_dates"))]
pub struct CreateAvailability {
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_block_dates(data: &CreateAvailability) -> Result<(), ValidationError> {
    super::validate_date_range(data.start_date, data.end_date)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvailability {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    pub property_id: Option<i32>,
}

/// Query for `GET /availability/check`
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[validate(schema(function = "validate_check_dates"))]
pub struct AvailabilityCheck {
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_check_dates(data: &AvailabilityCheck) -> Result<(), ValidationError> {
    super::validate_date_range(data.start_date, data.end_date)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub property_id: i32,
    pub available: bool,
}
