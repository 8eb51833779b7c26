//! Reservation model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::enums::ReservationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub property_id: i32,
    /// User who booked and pays
    pub client_id: i32,
    /// User who stays
    pub traveler_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateReservation {
    pub property_id: i32,
    /// Defaults to the caller; only administrators may book for someone else
    pub client_id: Option<i32>,
    /// Defaults to the client
    pub traveler_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_create_dates(data: &CreateReservation) -> Result<(), ValidationError> {
    super::validate_date_range(data.start_date, data.end_date)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    pub traveler_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    pub property_id: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
