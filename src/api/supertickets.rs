//! Super-ticket endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::ticket::{BookSchedule, PurchaseSuperTicket, SuperTicket, ValidationResponse},
};

use super::AuthenticatedUser;

/// List super-tickets (own, or all for administrators)
#[utoipa::path(
    get,
    path = "/supertickets",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Super-tickets", body = Vec<SuperTicket>)
    )
)]
pub async fn list_super_tickets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SuperTicket>>> {
    let passes = state.services.super_tickets.list(&claims).await?;
    Ok(Json(passes))
}

/// Get a super-ticket
#[utoipa::path(
    get,
    path = "/supertickets/{id}",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Super-ticket ID")),
    responses(
        (status = 200, description = "Super-ticket", body = SuperTicket),
        (status = 404, description = "Super-ticket not found")
    )
)]
pub async fn get_super_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SuperTicket>> {
    let pass = state.services.super_tickets.get_by_id(&claims, id).await?;
    Ok(Json(pass))
}

/// Buy a super-ticket
#[utoipa::path(
    post,
    path = "/supertickets",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    request_body = PurchaseSuperTicket,
    responses(
        (status = 201, description = "Super-ticket purchased", body = SuperTicket),
        (status = 400, description = "Insufficient balance", body = crate::error::ErrorResponse)
    )
)]
pub async fn purchase_super_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<PurchaseSuperTicket>,
) -> AppResult<(StatusCode, Json<SuperTicket>)> {
    let pass = state.services.super_tickets.purchase(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(pass)))
}

/// Book a schedule on a super-ticket
#[utoipa::path(
    post,
    path = "/supertickets/{id}/book",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Super-ticket ID")),
    request_body = BookSchedule,
    responses(
        (status = 200, description = "Schedule booked", body = SuperTicket),
        (status = 400, description = "Booking rule violated", body = crate::error::ErrorResponse),
        (status = 404, description = "Super-ticket or schedule does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_super_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<BookSchedule>,
) -> AppResult<Json<SuperTicket>> {
    let pass = state.services.super_tickets.book(&claims, id, &data).await?;
    Ok(Json(pass))
}

/// Check a super-ticket for a schedule
#[utoipa::path(
    post,
    path = "/supertickets/{id}/validate",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Super-ticket ID")),
    request_body = BookSchedule,
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 404, description = "Super-ticket or schedule not found")
    )
)]
pub async fn validate_super_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<BookSchedule>,
) -> AppResult<Json<ValidationResponse>> {
    let response = state.services.super_tickets.validate(&claims, id, &data).await?;
    Ok(Json(response))
}

/// Delete a super-ticket
#[utoipa::path(
    delete,
    path = "/supertickets/{id}",
    tag = "supertickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Super-ticket ID")),
    responses(
        (status = 204, description = "Super-ticket deleted"),
        (status = 404, description = "Super-ticket not found")
    )
)]
pub async fn delete_super_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.super_tickets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
