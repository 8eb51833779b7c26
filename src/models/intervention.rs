//! Interventions: a provider performing a service on a property

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::non_negative_decimal;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Intervention {
    pub id: i32,
    pub provider_id: i32,
    pub service_id: i32,
    pub property_id: i32,
    pub date: DateTime<Utc>,
    pub price: Decimal,
    pub notes: Option<String>,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIntervention {
    pub provider_id: i32,
    pub service_id: i32,
    pub property_id: i32,
    pub date: DateTime<Utc>,
    #[validate(custom(function = "non_negative_decimal"))]
    pub price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateIntervention {
    pub provider_id: Option<i32>,
    pub service_id: Option<i32>,
    pub date: Option<DateTime<Utc>>,
    #[validate(custom(function = "non_negative_decimal"))]
    pub price: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct InterventionQuery {
    pub property_id: Option<i32>,
    pub provider_id: Option<i32>,
}
