//! Stripe checkout and webhook handling

use std::collections::HashMap;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData, Currency,
    EventObject, EventType, Webhook,
};

use crate::{
    config::PaymentConfig,
    error::{AppError, AppResult},
    models::{
        enums::{InvoiceKind, ReservationStatus},
        invoice::{CheckoutResponse, NewInvoice},
        UserClaims,
    },
    repository::Repository,
};

/// What a checkout session pays for, round-tripped through Stripe metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutMetadata {
    pub kind: InvoiceKind,
    pub user_id: i32,
    pub amount_cents: i64,
    pub reservation_id: Option<i32>,
}

impl CheckoutMetadata {
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), self.kind.to_string());
        map.insert("user_id".to_string(), self.user_id.to_string());
        map.insert("amount_cents".to_string(), self.amount_cents.to_string());
        if let Some(id) = self.reservation_id {
            map.insert("reservation_id".to_string(), id.to_string());
        }
        map
    }

    pub fn from_map(map: &HashMap<String, String>) -> AppResult<Self> {
        fn field<'a>(map: &'a HashMap<String, String>, name: &str) -> AppResult<&'a str> {
            map.get(name)
                .map(String::as_str)
                .ok_or_else(|| AppError::BadRequest(format!("Missing checkout metadata: {}", name)))
        }
        fn number<T: std::str::FromStr>(value: &str, name: &str) -> AppResult<T> {
            value
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid checkout metadata: {}", name)))
        }

        let kind: InvoiceKind = field(map, "kind")?
            .parse()
            .map_err(AppError::BadRequest)?;
        let reservation_id = match map.get("reservation_id") {
            Some(value) => Some(number(value, "reservation_id")?),
            None => None,
        };
        if kind == InvoiceKind::Reservation && reservation_id.is_none() {
            return Err(AppError::BadRequest(
                "Missing checkout metadata: reservation_id".to_string(),
            ));
        }

        Ok(Self {
            kind,
            user_id: number(field(map, "user_id")?, "user_id")?,
            amount_cents: number(field(map, "amount_cents")?, "amount_cents")?,
            reservation_id,
        })
    }

    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_cents, 2)
    }
}

/// Price of a stay in cents
pub fn reservation_amount_cents(price_per_night: Decimal, nights: i64) -> AppResult<i64> {
    (price_per_night * Decimal::from(nights) * Decimal::from(100))
        .round()
        .to_i64()
        .ok_or_else(|| AppError::Internal("Reservation amount out of range".to_string()))
}

/// Stripe currency from its lowercase ISO code
fn parse_currency(code: &str) -> Option<Currency> {
    serde_json::from_value(serde_json::Value::String(code.to_lowercase())).ok()
}

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
    config: PaymentConfig,
    client: Option<Client>,
    currency: Currency,
}

impl PaymentsService {
    pub fn new(repository: Repository, config: PaymentConfig) -> Self {
        let client = config.stripe_secret_key.as_deref().map(|key| Client::new(key.to_string()));
        if client.is_none() {
            tracing::warn!("Stripe secret key not configured, payment endpoints are disabled");
        }
        let currency = parse_currency(&config.currency).unwrap_or_else(|| {
            tracing::warn!(currency = %config.currency, "Unknown currency, using EUR");
            Currency::EUR
        });
        Self {
            repository,
            config,
            client,
            currency,
        }
    }

    fn client(&self) -> AppResult<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Payment("Stripe is not configured".to_string()))
    }

    async fn create_session(&self, product: &str, metadata: &CheckoutMetadata) -> AppResult<CheckoutResponse> {
        let client = self.client()?;

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.success_url = Some(&self.config.success_url);
        params.cancel_url = Some(&self.config.cancel_url);
        params.metadata = Some(metadata.to_map());
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: self.currency,
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: product.to_string(),
                    ..Default::default()
                }),
                unit_amount: Some(metadata.amount_cents),
                ..Default::default()
            }),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = CheckoutSession::create(client, params).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create Stripe checkout session");
            AppError::Payment(format!("Failed to create checkout session: {}", e))
        })?;

        tracing::info!(
            session_id = %session.id,
            kind = %metadata.kind,
            user_id = metadata.user_id,
            "Checkout session created"
        );
        Ok(CheckoutResponse {
            checkout_url: session.url,
            session_id: session.id.to_string(),
        })
    }

    /// Checkout for the VIP membership
    pub async fn membership_checkout(&self, claims: &UserClaims) -> AppResult<CheckoutResponse> {
        let metadata = CheckoutMetadata {
            kind: InvoiceKind::Membership,
            user_id: claims.user_id,
            amount_cents: self.config.membership_price_cents,
            reservation_id: None,
        };
        self.create_session("VIP membership", &metadata).await
    }

    /// Checkout for a stay: nights times the nightly price
    pub async fn reservation_checkout(&self, claims: &UserClaims, reservation_id: i32) -> AppResult<CheckoutResponse> {
        let reservation = self.repository.reservations_get_by_id(reservation_id).await?;
        claims.require_self_or_admin(reservation.client_id)?;
        if matches!(reservation.status, ReservationStatus::Cancelled | ReservationStatus::Paid) {
            return Err(AppError::BusinessRule(format!(
                "Reservation is {} and cannot be paid",
                reservation.status
            )));
        }

        let property = self.repository.properties_get_by_id(reservation.property_id).await?;
        let metadata = CheckoutMetadata {
            kind: InvoiceKind::Reservation,
            user_id: reservation.client_id,
            amount_cents: reservation_amount_cents(property.price_per_night, reservation.nights())?,
            reservation_id: Some(reservation.id),
        };
        self.create_session(&format!("Stay at {}", property.name), &metadata).await
    }

    /// Verify and apply a webhook delivery. A bad signature is a 400 and
    /// nothing is processed.
    pub async fn handle_webhook(&self, payload: &str, signature: &str) -> AppResult<()> {
        let secret = self
            .config
            .stripe_webhook_secret
            .as_deref()
            .ok_or_else(|| AppError::Payment("Webhook secret not configured".to_string()))?;

        let event = Webhook::construct_event(payload, signature, secret).map_err(|e| {
            tracing::warn!(error = %e, "Rejected webhook with invalid signature");
            AppError::BadRequest("Invalid webhook signature".to_string())
        })?;

        match (&event.type_, &event.data.object) {
            (EventType::CheckoutSessionCompleted, EventObject::CheckoutSession(session)) => {
                let metadata = session
                    .metadata
                    .as_ref()
                    .ok_or_else(|| AppError::BadRequest("Checkout session has no metadata".to_string()))?;
                let metadata = CheckoutMetadata::from_map(metadata)?;
                self.fulfil(&session.id.to_string(), &metadata).await
            }
            _ => {
                tracing::debug!(event_type = %event.type_, "Unhandled event type");
                Ok(())
            }
        }
    }

    async fn fulfil(&self, session_id: &str, metadata: &CheckoutMetadata) -> AppResult<()> {
        let invoice = self
            .repository
            .invoices_fulfil(&NewInvoice {
                user_id: metadata.user_id,
                reservation_id: metadata.reservation_id,
                kind: metadata.kind,
                amount: metadata.amount(),
                stripe_session_id: Some(session_id.to_string()),
            })
            .await?;

        let Some(invoice) = invoice else {
            tracing::info!(session_id, "Checkout session already processed");
            return Ok(());
        };

        tracing::info!(
            invoice_id = invoice.id,
            kind = %invoice.kind,
            user_id = invoice.user_id,
            "Checkout completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_metadata_round_trips() {
        let metadata = CheckoutMetadata {
            kind: InvoiceKind::Reservation,
            user_id: 12,
            amount_cents: 45_000,
            reservation_id: Some(7),
        };
        assert_eq!(CheckoutMetadata::from_map(&metadata.to_map()).unwrap(), metadata);
    }

    #[test]
    fn membership_metadata_has_no_reservation() {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), "membership".to_string());
        map.insert("user_id".to_string(), "3".to_string());
        map.insert("amount_cents".to_string(), "2999".to_string());
        let metadata = CheckoutMetadata::from_map(&map).unwrap();
        assert_eq!(metadata.reservation_id, None);
        assert_eq!(metadata.amount(), Decimal::new(2999, 2));
    }

    #[test]
    fn reservation_metadata_requires_reservation_id() {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), "reservation".to_string());
        map.insert("user_id".to_string(), "3".to_string());
        map.insert("amount_cents".to_string(), "100".to_string());
        assert!(matches!(CheckoutMetadata::from_map(&map), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), "donation".to_string());
        map.insert("user_id".to_string(), "3".to_string());
        map.insert("amount_cents".to_string(), "100".to_string());
        assert!(CheckoutMetadata::from_map(&map).is_err());
    }

    #[test]
    fn stay_amount_is_nights_times_price() {
        assert_eq!(reservation_amount_cents(Decimal::new(8550, 2), 3).unwrap(), 25_650);
    }

    #[test]
    fn currency_codes_parse_case_insensitively() {
        assert_eq!(parse_currency("EUR"), Some(Currency::EUR));
        assert_eq!(parse_currency("usd"), Some(Currency::USD));
    }
}
