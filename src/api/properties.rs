//! Rental property endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::property::{CreateProperty, Property, PropertyQuery, UpdateProperty},
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List properties
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    params(PropertyQuery),
    responses(
        (status = 200, description = "List of properties", body = PaginatedResponse<Property>)
    )
)]
pub async fn list_properties(
    State(state): State<crate::AppState>,
    Query(query): Query<PropertyQuery>,
) -> AppResult<Json<PaginatedResponse<Property>>> {
    let (properties, total) = state.services.properties.list(&query).await?;
    Ok(Json(PaginatedResponse::new(properties, total, query.page, query.per_page)))
}

/// Get a property
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = i32, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property details", body = Property),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Property>> {
    let property = state.services.properties.get_by_id(id).await?;
    Ok(Json(property))
}

/// Create a property owned by the caller
#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateProperty>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = state.services.properties.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// Update a property (owner or administrator)
#[utoipa::path(
    patch,
    path = "/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn update_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateProperty>,
) -> AppResult<Json<Property>> {
    let property = state.services.properties.update(&claims, id, &data).await?;
    Ok(Json(property))
}

/// Delete a property (owner or administrator)
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.properties.delete(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
