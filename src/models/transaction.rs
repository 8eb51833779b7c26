//! Balance transactions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{enums::TransactionType, positive_decimal};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub crea_date: DateTime<Utc>,
}

/// Deposit or withdrawal request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AmountRequest {
    #[validate(custom(function = "positive_decimal"))]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub user_id: i32,
    pub balance: Decimal,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TransactionQuery {
    /// Administrators may inspect another user's history
    pub user_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
