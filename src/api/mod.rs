//! API handlers for the marketplace REST endpoints

pub mod auditoriums;
pub mod availability;
pub mod health;
pub mod interventions;
pub mod invoices;
pub mod movies;
pub mod openapi;
pub mod payment;
pub mod properties;
pub mod providers;
pub mod reservations;
pub mod schedules;
pub mod services;
pub mod supertickets;
pub mod tickets;
pub mod transactions;
pub mod upload;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::UserClaims, repository::pagination, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Authentication("Missing or invalid bearer token".to_string()))?;

        let claims = state.services.users.verify_token(bearer.token()).await?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Echo the page parameters the repository actually applied
    pub fn new(items: Vec<T>, total: i64, page: Option<i64>, per_page: Option<i64>) -> Self {
        let (page, per_page, _) = pagination(page, per_page);
        Self {
            items,
            total,
            page,
            per_page,
        }
    }
}
