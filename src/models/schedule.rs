//! Schedule (screening) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::booking::Screening;

/// A screening of a movie in an auditorium
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: i32,
    /// Start of the screening
    pub date: DateTime<Utc>,
    pub movie_id: i32,
    pub auditorium_id: i32,
    pub crea_date: DateTime<Utc>,
}

/// Schedule joined with its movie and seat usage, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleDetails {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub movie_id: i32,
    pub movie_title: String,
    /// Movie duration in minutes
    pub duration: i32,
    pub auditorium_id: i32,
    pub auditorium_name: String,
    pub capacity: i32,
    /// Regular tickets plus super-ticket bookings
    pub tickets_sold: i64,
    pub seats_remaining: i64,
}

/// Row used by the overlap check
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ScheduleSlot {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub duration: i32,
}

impl From<ScheduleSlot> for Screening {
    fn from(slot: ScheduleSlot) -> Self {
        Screening {
            id: Some(slot.id),
            date: slot.date,
            duration_minutes: slot.duration,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSchedule {
    /// Start of the screening (RFC 3339)
    pub date: DateTime<Utc>,
    pub movie_id: i32,
    pub auditorium_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSchedule {
    pub date: Option<DateTime<Utc>>,
    pub movie_id: Option<i32>,
    pub auditorium_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleQuery {
    pub movie_id: Option<i32>,
    pub auditorium_id: Option<i32>,
    /// Screenings starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Screenings starting at or before this instant
    pub to: Option<DateTime<Utc>>,
}
