//! Auditorium endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::auditorium::{Auditorium, CreateAuditorium, UpdateAuditorium},
};

use super::AuthenticatedUser;

/// List auditoriums
#[utoipa::path(
    get,
    path = "/auditoriums",
    tag = "auditoriums",
    responses(
        (status = 200, description = "Auditoriums", body = Vec<Auditorium>)
    )
)]
pub async fn list_auditoriums(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Auditorium>>> {
    let auditoriums = state.services.auditoriums.list().await?;
    Ok(Json(auditoriums))
}

/// Get an auditorium
#[utoipa::path(
    get,
    path = "/auditoriums/{id}",
    tag = "auditoriums",
    params(("id" = i32, Path, description = "Auditorium ID")),
    responses(
        (status = 200, description = "Auditorium", body = Auditorium),
        (status = 404, description = "Auditorium not found")
    )
)]
pub async fn get_auditorium(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Auditorium>> {
    let auditorium = state.services.auditoriums.get_by_id(id).await?;
    Ok(Json(auditorium))
}

/// Create an auditorium
#[utoipa::path(
    post,
    path = "/auditoriums",
    tag = "auditoriums",
    security(("bearer_auth" = [])),
    request_body = CreateAuditorium,
    responses(
        (status = 201, description = "Auditorium created", body = Auditorium),
        (status = 400, description = "Capacity outside 15 to 30", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_auditorium(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAuditorium>,
) -> AppResult<(StatusCode, Json<Auditorium>)> {
    claims.require_admin()?;
    let auditorium = state.services.auditoriums.create(&data).await?;
    Ok((StatusCode::CREATED, Json(auditorium)))
}

/// Update an auditorium
#[utoipa::path(
    patch,
    path = "/auditoriums/{id}",
    tag = "auditoriums",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Auditorium ID")),
    request_body = UpdateAuditorium,
    responses(
        (status = 200, description = "Auditorium updated", body = Auditorium),
        (status = 404, description = "Auditorium not found")
    )
)]
pub async fn update_auditorium(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuditorium>,
) -> AppResult<Json<Auditorium>> {
    claims.require_admin()?;
    let auditorium = state.services.auditoriums.update(id, &data).await?;
    Ok(Json(auditorium))
}

/// Delete an auditorium
#[utoipa::path(
    delete,
    path = "/auditoriums/{id}",
    tag = "auditoriums",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Auditorium ID")),
    responses(
        (status = 204, description = "Auditorium deleted"),
        (status = 404, description = "Auditorium not found")
    )
)]
pub async fn delete_auditorium(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.auditoriums.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
