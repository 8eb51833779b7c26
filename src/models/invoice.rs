//! Invoices written when a Stripe checkout completes

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::InvoiceKind;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Invoice {
    pub id: i32,
    pub user_id: i32,
    pub reservation_id: Option<i32>,
    pub kind: InvoiceKind,
    pub amount: Decimal,
    pub stripe_session_id: Option<String>,
    pub crea_date: DateTime<Utc>,
}

/// Internal insert payload
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub user_id: i32,
    pub reservation_id: Option<i32>,
    pub kind: InvoiceKind,
    pub amount: Decimal,
    pub stripe_session_id: Option<String>,
}

/// Where to send the customer to pay
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub checkout_url: Option<String>,
    pub session_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReservationCheckout {
    pub reservation_id: i32,
}
