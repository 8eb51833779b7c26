//! Ticket endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::ticket::{PurchaseTicket, Ticket, ValidationResponse},
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TicketQuery {
    pub schedule_id: Option<i32>,
}

/// List tickets (own, or all for administrators)
#[utoipa::path(
    get,
    path = "/tickets",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(TicketQuery),
    responses(
        (status = 200, description = "Tickets", body = Vec<Ticket>)
    )
)]
pub async fn list_tickets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<TicketQuery>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = state.services.tickets.list(&claims, query.schedule_id).await?;
    Ok(Json(tickets))
}

/// Get a ticket
#[utoipa::path(
    get,
    path = "/tickets/{id}",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Ticket>> {
    let ticket = state.services.tickets.get_by_id(&claims, id).await?;
    Ok(Json(ticket))
}

/// Buy a ticket for a schedule
#[utoipa::path(
    post,
    path = "/tickets",
    tag = "tickets",
    security(("bearer_auth" = [])),
    request_body = PurchaseTicket,
    responses(
        (status = 201, description = "Ticket purchased", body = Ticket),
        (status = 400, description = "Capacity reached or insufficient balance", body = crate::error::ErrorResponse),
        (status = 404, description = "Schedule, auditorium or user does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn purchase_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<PurchaseTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    let ticket = state.services.tickets.purchase(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Check a ticket at the door
#[utoipa::path(
    post,
    path = "/tickets/{id}/validate",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn validate_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ValidationResponse>> {
    let response = state.services.tickets.validate(&claims, id).await?;
    Ok(Json(response))
}

/// Delete a ticket
#[utoipa::path(
    delete,
    path = "/tickets/{id}",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn delete_ticket(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.tickets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
