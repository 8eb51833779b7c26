//! Movie model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Running time in minutes
    pub duration: i32,
    pub genre: Option<String>,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 minutes"))]
    pub duration: i32,
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMovie {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 minutes"))]
    pub duration: Option<i32>,
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MovieQuery {
    /// Search in title
    pub title: Option<String>,
    pub genre: Option<String>,
}
