//! Rental property model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::positive_decimal;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Property {
    pub id: i32,
    /// Owning user
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    /// Free-form type (apartment, house, ...)
    pub property_type: Option<String>,
    pub price_per_night: Decimal,
    /// Maximum number of guests
    pub capacity: i32,
    pub image_url: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProperty {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub property_type: Option<String>,
    #[validate(custom(function = "positive_decimal"))]
    pub price_per_night: Decimal,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProperty {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<String>,
    #[validate(custom(function = "positive_decimal"))]
    pub price_per_night: Option<Decimal>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PropertyQuery {
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub max_price: Option<Decimal>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
