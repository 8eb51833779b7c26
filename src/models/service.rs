//! Services offered on rental properties (cleaning, maintenance, ...)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::non_negative_decimal;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_decimal"))]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateService {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_decimal"))]
    pub price: Option<Decimal>,
}
