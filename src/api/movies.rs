//! Movie endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::movie::{CreateMovie, Movie, MovieQuery, UpdateMovie},
};

use super::AuthenticatedUser;

/// Search movies
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    params(MovieQuery),
    responses(
        (status = 200, description = "Movies", body = Vec<Movie>)
    )
)]
pub async fn list_movies(
    State(state): State<crate::AppState>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.services.movies.search(&query).await?;
    Ok(Json(movies))
}

/// Get a movie
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie", body = Movie),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(State(state): State<crate::AppState>, Path(id): Path<i32>) -> AppResult<Json<Movie>> {
    let movie = state.services.movies.get_by_id(id).await?;
    Ok(Json(movie))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    security(("bearer_auth" = [])),
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie created", body = Movie)
    )
)]
pub async fn create_movie(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    claims.require_admin()?;
    let movie = state.services.movies.create(&data).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Update a movie
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = UpdateMovie,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn update_movie(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    claims.require_admin()?;
    let movie = state.services.movies.update(id, &data).await?;
    Ok(Json(movie))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn delete_movie(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
