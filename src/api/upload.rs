//! Multipart file upload endpoint

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    services::uploads::StoredFile,
};

use super::AuthenticatedUser;

/// Store every file part of a multipart body
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data", description = "One or more file parts"),
    responses(
        (status = 201, description = "Files stored", body = Vec<StoredFile>),
        (status = 400, description = "No file, empty file or file too large", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_files(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Vec<StoredFile>>)> {
    let mut stored = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        stored.push(state.services.uploads.store(Some(&file_name), &bytes).await?);
    }

    if stored.is_empty() {
        return Err(AppError::BadRequest("No file in request".to_string()));
    }
    tracing::debug!(user_id = claims.user_id, files = stored.len(), "Upload completed");
    Ok((StatusCode::CREATED, Json(stored)))
}
