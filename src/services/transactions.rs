//! Balance and transaction history service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        transaction::{AmountRequest, BalanceResponse, Transaction, TransactionQuery},
        UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
}

impl TransactionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn deposit(&self, claims: &UserClaims, request: &AmountRequest) -> AppResult<BalanceResponse> {
        request.validate()?;
        let balance = self
            .repository
            .transactions_deposit(claims.user_id, request.amount)
            .await?;
        tracing::info!(user_id = claims.user_id, amount = %request.amount, "Deposit");
        Ok(BalanceResponse {
            user_id: claims.user_id,
            balance,
        })
    }

    pub async fn withdraw(&self, claims: &UserClaims, request: &AmountRequest) -> AppResult<BalanceResponse> {
        request.validate()?;
        let balance = self
            .repository
            .transactions_withdraw(claims.user_id, request.amount)
            .await?;
        tracing::info!(user_id = claims.user_id, amount = %request.amount, "Withdrawal");
        Ok(BalanceResponse {
            user_id: claims.user_id,
            balance,
        })
    }

    pub async fn balance(&self, claims: &UserClaims) -> AppResult<BalanceResponse> {
        let balance = self.repository.transactions_balance(claims.user_id).await?;
        Ok(BalanceResponse {
            user_id: claims.user_id,
            balance,
        })
    }

    /// Own history; administrators may look at anyone's or everyone's
    pub async fn list(&self, claims: &UserClaims, mut query: TransactionQuery) -> AppResult<(Vec<Transaction>, i64)> {
        if !claims.is_admin() {
            query.user_id = Some(claims.user_id);
        }
        self.repository.transactions_list(&query).await
    }
}
