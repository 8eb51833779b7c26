//! Balance and transaction endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::transaction::{AmountRequest, BalanceResponse, Transaction, TransactionQuery},
};

use super::{AuthenticatedUser, PaginatedResponse};

/// Credit the caller's balance
#[utoipa::path(
    post,
    path = "/transactions/deposit",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "New balance", body = BalanceResponse),
        (status = 400, description = "Amount must be positive", body = crate::error::ErrorResponse)
    )
)]
pub async fn deposit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<AmountRequest>,
) -> AppResult<Json<BalanceResponse>> {
    let balance = state.services.transactions.deposit(&claims, &request).await?;
    Ok(Json(balance))
}

/// Debit the caller's balance
#[utoipa::path(
    post,
    path = "/transactions/withdraw",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "New balance", body = BalanceResponse),
        (status = 400, description = "Insufficient balance", body = crate::error::ErrorResponse)
    )
)]
pub async fn withdraw(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<AmountRequest>,
) -> AppResult<Json<BalanceResponse>> {
    let balance = state.services.transactions.withdraw(&claims, &request).await?;
    Ok(Json(balance))
}

/// Current balance of the caller
#[utoipa::path(
    get,
    path = "/transactions/balance",
    tag = "transactions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Balance", body = BalanceResponse)
    )
)]
pub async fn balance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BalanceResponse>> {
    let balance = state.services.transactions.balance(&claims).await?;
    Ok(Json(balance))
}

/// Transaction history
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    security(("bearer_auth" = [])),
    params(TransactionQuery),
    responses(
        (status = 200, description = "Transactions", body = PaginatedResponse<Transaction>)
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<PaginatedResponse<Transaction>>> {
    let (page, per_page) = (query.page, query.per_page);
    let (transactions, total) = state.services.transactions.list(&claims, query).await?;
    Ok(Json(PaginatedResponse::new(transactions, total, page, per_page)))
}
