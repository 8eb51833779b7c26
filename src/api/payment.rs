//! Stripe payment endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::invoice::{CheckoutResponse, ReservationCheckout},
};

use super::AuthenticatedUser;

/// Start a checkout for the VIP membership
#[utoipa::path(
    post,
    path = "/api/payment/membership",
    tag = "payment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Checkout session", body = CheckoutResponse),
        (status = 500, description = "Payment provider error", body = crate::error::ErrorResponse)
    )
)]
pub async fn membership_checkout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<CheckoutResponse>> {
    let session = state.services.payments.membership_checkout(&claims).await?;
    Ok(Json(session))
}

/// Start a checkout for a reservation
#[utoipa::path(
    post,
    path = "/api/payment/reservation",
    tag = "payment",
    security(("bearer_auth" = [])),
    request_body = ReservationCheckout,
    responses(
        (status = 200, description = "Checkout session", body = CheckoutResponse),
        (status = 400, description = "Reservation cannot be paid", body = crate::error::ErrorResponse),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn reservation_checkout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReservationCheckout>,
) -> AppResult<Json<CheckoutResponse>> {
    let session = state
        .services
        .payments
        .reservation_checkout(&claims, request.reservation_id)
        .await?;
    Ok(Json(session))
}

/// Stripe webhook receiver
#[utoipa::path(
    post,
    path = "/api/payment/webhook",
    tag = "payment",
    request_body(content = String, description = "Raw Stripe event payload"),
    responses(
        (status = 200, description = "Event processed"),
        (status = 400, description = "Signature verification failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn stripe_webhook(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    payload: Bytes,
) -> AppResult<StatusCode> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing stripe-signature header".to_string()))?;

    let payload = std::str::from_utf8(&payload)
        .map_err(|_| AppError::BadRequest("Invalid UTF-8 in payload".to_string()))?;

    state.services.payments.handle_webhook(payload, signature).await?;
    Ok(StatusCode::OK)
}
