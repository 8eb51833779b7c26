//! Ticket and super-ticket models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One seat claim against one schedule
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: i32,
    pub price: Decimal,
    pub schedule_id: i32,
    pub user_id: i32,
    /// Set once the ticket has been validated at the door
    pub used: bool,
    pub crea_date: DateTime<Utc>,
}

/// Multi-use pass booking up to ten schedules
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SuperTicket {
    pub id: i32,
    pub user_id: i32,
    pub price: Decimal,
    pub uses_remaining: i32,
    pub used_schedules: Vec<i32>,
    pub crea_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseTicket {
    pub schedule_id: i32,
    /// Buyer; only administrators may buy for another user
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseSuperTicket {
    /// Buyer; only administrators may buy for another user
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookSchedule {
    pub schedule_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
}
