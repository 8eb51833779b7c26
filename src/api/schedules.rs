//! Schedule (screening) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{CreateSchedule, Schedule, ScheduleDetails, ScheduleQuery, UpdateSchedule},
};

use super::AuthenticatedUser;

/// List schedules with seat usage
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules", body = Vec<ScheduleDetails>)
    )
)]
pub async fn list_schedules(
    State(state): State<crate::AppState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    let schedules = state.services.schedules.list(&query).await?;
    Ok(Json(schedules))
}

/// Get a schedule
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleDetails),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ScheduleDetails>> {
    let schedule = state.services.schedules.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Create a schedule
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Outside opening hours, overlapping or auditorium closed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    claims.require_admin()?;
    let schedule = state.services.schedules.create(&data).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Move a schedule
#[utoipa::path(
    patch,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 400, description = "Outside opening hours, overlapping or auditorium closed", body = crate::error::ErrorResponse),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<Schedule>> {
    claims.require_admin()?;
    let schedule = state.services.schedules.update(id, &data).await?;
    Ok(Json(schedule))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
