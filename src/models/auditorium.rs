//! Auditorium model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Auditorium {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Seats sellable per schedule (15 to 30)
    pub capacity: i32,
    /// Closed for maintenance: no new schedules
    pub maintenance: bool,
    /// Wheelchair accessible
    pub handicap: bool,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuditorium {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 15, max = 30, message = "Capacity must be between 15 and 30"))]
    pub capacity: i32,
    #[serde(default)]
    pub maintenance: bool,
    #[serde(default)]
    pub handicap: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuditorium {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 15, max = 30, message = "Capacity must be between 15 and 30"))]
    pub capacity: Option<i32>,
    pub maintenance: Option<bool>,
    pub handicap: Option<bool>,
}
