//! Rental service endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::service::{CreateService, Service, UpdateService},
};

use super::AuthenticatedUser;

/// List rental services
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Services", body = Vec<Service>)
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Service>>> {
    let rows = state.services.catalog.list_services().await?;
    Ok(Json(rows))
}

/// Get a service
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Service>> {
    let row = state.services.catalog.get_service(id).await?;
    Ok(Json(row))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/services",
    tag = "services",
    security(("bearer_auth" = [])),
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_service(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    claims.require_admin()?;
    let row = state.services.catalog.create_service(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Update a service
#[utoipa::path(
    patch,
    path = "/services/{id}",
    tag = "services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateService,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_service(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    claims.require_admin()?;
    let row = state.services.catalog.update_service(id, &data).await?;
    Ok(Json(row))
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_service(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
