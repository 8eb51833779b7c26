//! Intervention endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::intervention::{CreateIntervention, Intervention, InterventionQuery, UpdateIntervention},
};

use super::AuthenticatedUser;

/// List interventions
#[utoipa::path(
    get,
    path = "/interventions",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(InterventionQuery),
    responses(
        (status = 200, description = "Interventions", body = Vec<Intervention>)
    )
)]
pub async fn list_interventions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<InterventionQuery>,
) -> AppResult<Json<Vec<Intervention>>> {
    let rows = state.services.catalog.list_interventions(&query).await?;
    Ok(Json(rows))
}

/// Get an intervention
#[utoipa::path(
    get,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    responses(
        (status = 200, description = "Intervention", body = Intervention),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn get_intervention(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Intervention>> {
    let row = state.services.catalog.get_intervention(id).await?;
    Ok(Json(row))
}

/// Create an intervention
#[utoipa::path(
    post,
    path = "/interventions",
    tag = "interventions",
    security(("bearer_auth" = [])),
    request_body = CreateIntervention,
    responses(
        (status = 201, description = "Intervention created", body = Intervention),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_intervention(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateIntervention>,
) -> AppResult<(StatusCode, Json<Intervention>)> {
    claims.require_admin()?;
    let row = state.services.catalog.create_intervention(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Update an intervention
#[utoipa::path(
    patch,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    request_body = UpdateIntervention,
    responses(
        (status = 200, description = "Intervention updated", body = Intervention),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn update_intervention(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateIntervention>,
) -> AppResult<Json<Intervention>> {
    claims.require_admin()?;
    let row = state.services.catalog.update_intervention(id, &data).await?;
    Ok(Json(row))
}

/// Delete an intervention
#[utoipa::path(
    delete,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    responses(
        (status = 204, description = "Intervention deleted"),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn delete_intervention(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.catalog.delete_intervention(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
