//! Availability block endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::availability::{
        Availability, AvailabilityCheck, AvailabilityQuery, AvailabilityResponse, CreateAvailability,
        UpdateAvailability,
    },
};

use super::AuthenticatedUser;

/// List availability blocks
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Blocks", body = Vec<Availability>)
    )
)]
pub async fn list_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<Availability>>> {
    let blocks = state.services.availability.list(query.property_id).await?;
    Ok(Json(blocks))
}

/// Whether a property is free over a date range
#[utoipa::path(
    get,
    path = "/availability/check",
    tag = "availability",
    params(AvailabilityCheck),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 400, description = "Invalid date range", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityCheck>,
) -> AppResult<Json<AvailabilityResponse>> {
    let response = state.services.availability.check(&query).await?;
    Ok(Json(response))
}

/// Get a block
#[utoipa::path(
    get,
    path = "/availability/{id}",
    tag = "availability",
    params(("id" = i32, Path, description = "Block ID")),
    responses(
        (status = 200, description = "Block", body = Availability),
        (status = 404, description = "Block not found")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Availability>> {
    let block = state.services.availability.get_by_id(id).await?;
    Ok(Json(block))
}

/// Block a property over a date range
#[utoipa::path(
    post,
    path = "/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    request_body = CreateAvailability,
    responses(
        (status = 201, description = "Block created", body = Availability),
        (status = 403, description = "Not the property owner")
    )
)]
pub async fn create_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAvailability>,
) -> AppResult<(StatusCode, Json<Availability>)> {
    let block = state.services.availability.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// Move a block
#[utoipa::path(
    patch,
    path = "/availability/{id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Block ID")),
    request_body = UpdateAvailability,
    responses(
        (status = 200, description = "Block updated", body = Availability),
        (status = 404, description = "Block not found")
    )
)]
pub async fn update_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAvailability>,
) -> AppResult<Json<Availability>> {
    let block = state.services.availability.update(&claims, id, &data).await?;
    Ok(Json(block))
}

/// Remove a block
#[utoipa::path(
    delete,
    path = "/availability/{id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Block ID")),
    responses(
        (status = 204, description = "Block deleted"),
        (status = 404, description = "Block not found")
    )
)]
pub async fn delete_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.availability.delete(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
