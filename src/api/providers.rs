//! Service provider endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::provider::{CreateProvider, Provider, UpdateProvider},
};

use super::AuthenticatedUser;

/// List service providers
#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Providers", body = Vec<Provider>)
    )
)]
pub async fn list_providers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Provider>>> {
    let rows = state.services.catalog.list_providers().await?;
    Ok(Json(rows))
}

/// Get a provider
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "providers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn get_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Provider>> {
    let row = state.services.catalog.get_provider(id).await?;
    Ok(Json(row))
}

/// Create a provider
#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    security(("bearer_auth" = [])),
    request_body = CreateProvider,
    responses(
        (status = 201, description = "Provider created", body = Provider),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateProvider>,
) -> AppResult<(StatusCode, Json<Provider>)> {
    claims.require_admin()?;
    let row = state.services.catalog.create_provider(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Update a provider
#[utoipa::path(
    patch,
    path = "/providers/{id}",
    tag = "providers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Provider ID")),
    request_body = UpdateProvider,
    responses(
        (status = 200, description = "Provider updated", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn update_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateProvider>,
) -> AppResult<Json<Provider>> {
    claims.require_admin()?;
    let row = state.services.catalog.update_provider(id, &data).await?;
    Ok(Json(row))
}

/// Delete a provider
#[utoipa::path(
    delete,
    path = "/providers/{id}",
    tag = "providers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn delete_provider(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.catalog.delete_provider(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
