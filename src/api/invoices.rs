//! Invoice endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::invoice::Invoice};

use super::AuthenticatedUser;

/// List invoices (own, or all for administrators)
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoices", body = Vec<Invoice>)
    )
)]
pub async fn list_invoices(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = state.services.invoices.list(&claims).await?;
    Ok(Json(invoices))
}

/// Get an invoice
#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "invoices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice", body = Invoice),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Invoice>> {
    let invoice = state.services.invoices.get_by_id(&claims, id).await?;
    Ok(Json(invoice))
}

/// Delete an invoice
#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "invoices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn delete_invoice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.invoices.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
