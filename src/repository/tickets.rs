//! Ticket methods on Repository

use rust_decimal::Decimal;

use super::{
    schedules::{auditorium_capacity, lock_schedule, sold_count},
    transactions::{adjust_balance, lock_balance, record},
    Repository,
};
use crate::{
    booking::admission::{check_balance, check_capacity, AdmissionError},
    error::{AppError, AppResult},
    models::{enums::TransactionType, ticket::Ticket},
};

impl Repository {
    /// Sell one seat on a schedule.
    ///
    /// Runs in a single transaction holding the schedule and the buyer rows:
    /// schedule, auditorium capacity, buyer, balance, debit, ticket, ledger.
    pub async fn tickets_purchase(&self, schedule_id: i32, user_id: i32, price: Decimal) -> AppResult<Ticket> {
        let mut tx = self.pool.begin().await?;

        let schedule = lock_schedule(&mut *tx, schedule_id).await?;
        let capacity = auditorium_capacity(&mut *tx, schedule.auditorium_id).await?;
        check_capacity(sold_count(&mut *tx, schedule.id).await?, capacity)?;

        let balance = lock_balance(&mut *tx, user_id)
            .await?
            .ok_or(AdmissionError::UserNotFound)?;
        check_balance(balance, price)?;
        adjust_balance(&mut *tx, user_id, -price).await?;

        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (price, schedule_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(price)
        .bind(schedule.id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        record(&mut *tx, user_id, price, TransactionType::Purchase).await?;

        tx.commit().await?;
        Ok(ticket)
    }

    /// Tickets, optionally of one user and/or one schedule
    pub async fn tickets_list(&self, user_id: Option<i32>, schedule_id: Option<i32>) -> AppResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE ($1::INTEGER IS NULL OR user_id = $1)
              AND ($2::INTEGER IS NULL OR schedule_id = $2)
            ORDER BY crea_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn tickets_get_by_id(&self, id: i32) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    pub async fn tickets_mark_used(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE tickets SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn tickets_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ticket {} not found", id)));
        }
        Ok(())
    }
}
