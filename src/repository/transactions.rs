//! Balance and transaction methods on Repository

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::{pagination, Repository};
use crate::{
    booking::{admission::check_balance, AdmissionError},
    error::{AppError, AppResult},
    models::{
        enums::TransactionType,
        transaction::{Transaction, TransactionQuery},
    },
};

/// Lock a user's row for the rest of the transaction and return the balance
pub(crate) async fn lock_balance(conn: &mut PgConnection, user_id: i32) -> AppResult<Option<Decimal>> {
    let balance = sqlx::query_scalar::<_, Decimal>("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(balance)
}

/// Add `delta` (may be negative) to a locked user's balance
pub(crate) async fn adjust_balance(conn: &mut PgConnection, user_id: i32, delta: Decimal) -> AppResult<Decimal> {
    let balance = sqlx::query_scalar::<_, Decimal>(
        "UPDATE users SET balance = balance + $2, modif_date = $3 WHERE id = $1 RETURNING balance",
    )
    .bind(user_id)
    .bind(delta)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    Ok(balance)
}

/// Append a transaction row
pub(crate) async fn record(
    conn: &mut PgConnection,
    user_id: i32,
    amount: Decimal,
    kind: TransactionType,
) -> AppResult<Transaction> {
    let row = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (user_id, amount, transaction_type)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(amount)
    .bind(kind)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}

impl Repository {
    /// Current balance of a user
    pub async fn transactions_balance(&self, user_id: i32) -> AppResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>("SELECT balance FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))
    }

    /// Credit a user's balance; returns the new balance
    pub async fn transactions_deposit(&self, user_id: i32, amount: Decimal) -> AppResult<Decimal> {
        let mut tx = self.pool.begin().await?;

        lock_balance(&mut *tx, user_id)
            .await?
            .ok_or(AdmissionError::UserNotFound)?;
        let balance = adjust_balance(&mut *tx, user_id, amount).await?;
        record(&mut *tx, user_id, amount, TransactionType::Deposit).await?;

        tx.commit().await?;
        Ok(balance)
    }

    /// Debit a user's balance; fails with "Insufficient balance"
    pub async fn transactions_withdraw(&self, user_id: i32, amount: Decimal) -> AppResult<Decimal> {
        let mut tx = self.pool.begin().await?;

        let current = lock_balance(&mut *tx, user_id)
            .await?
            .ok_or(AdmissionError::UserNotFound)?;
        check_balance(current, amount)?;
        let balance = adjust_balance(&mut *tx, user_id, -amount).await?;
        record(&mut *tx, user_id, amount, TransactionType::Withdraw).await?;

        tx.commit().await?;
        Ok(balance)
    }

    /// Transaction history, newest first
    pub async fn transactions_list(&self, query: &TransactionQuery) -> AppResult<(Vec<Transaction>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE ($1::INTEGER IS NULL OR user_id = $1)",
        )
        .bind(query.user_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE ($1::INTEGER IS NULL OR user_id = $1)
            ORDER BY crea_date DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.user_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }
}
