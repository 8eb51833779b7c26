//! Super-ticket (multi-use pass) methods on Repository

use rust_decimal::Decimal;

use super::{
    schedules::{auditorium_capacity, lock_schedule, sold_count},
    transactions::{adjust_balance, lock_balance, record},
    Repository,
};
use crate::{
    booking::admission::{check_balance, check_pass_booking, check_pass_capacity, AdmissionError},
    error::{AppError, AppResult},
    models::{enums::TransactionType, ticket::SuperTicket},
};

impl Repository {
    /// Buy a pass: debit the buyer and store a pass with `uses` bookings
    pub async fn super_tickets_purchase(&self, user_id: i32, price: Decimal, uses: i32) -> AppResult<SuperTicket> {
        let mut tx = self.pool.begin().await?;

        let balance = lock_balance(&mut *tx, user_id)
            .await?
            .ok_or(AdmissionError::UserNotFound)?;
        check_balance(balance, price)?;
        adjust_balance(&mut *tx, user_id, -price).await?;

        let pass = sqlx::query_as::<_, SuperTicket>(
            r#"
            INSERT INTO super_tickets (user_id, price, uses_remaining)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(price)
        .bind(uses)
        .fetch_one(&mut *tx)
        .await?;

        record(&mut *tx, user_id, price, TransactionType::Purchase).await?;

        tx.commit().await?;
        Ok(pass)
    }

    /// Book a schedule on a pass, consuming one use. A pass holds at most
    /// `max_schedules` distinct schedules.
    pub async fn super_tickets_book(&self, id: i32, schedule_id: i32, max_schedules: usize) -> AppResult<SuperTicket> {
        let mut tx = self.pool.begin().await?;

        let pass = sqlx::query_as::<_, SuperTicket>("SELECT * FROM super_tickets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Super-ticket {} not found", id)))?;
        check_pass_booking(&pass.used_schedules, pass.uses_remaining, schedule_id, max_schedules)?;

        let schedule = lock_schedule(&mut *tx, schedule_id).await?;
        let capacity = auditorium_capacity(&mut *tx, schedule.auditorium_id).await?;
        check_pass_capacity(sold_count(&mut *tx, schedule.id).await?, capacity)?;

        let updated = sqlx::query_as::<_, SuperTicket>(
            r#"
            UPDATE super_tickets SET
                used_schedules = array_append(used_schedules, $2),
                uses_remaining = uses_remaining - 1
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(schedule.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn super_tickets_list(&self, user_id: Option<i32>) -> AppResult<Vec<SuperTicket>> {
        let rows = sqlx::query_as::<_, SuperTicket>(
            r#"
            SELECT * FROM super_tickets
            WHERE ($1::INTEGER IS NULL OR user_id = $1)
            ORDER BY crea_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn super_tickets_get_by_id(&self, id: i32) -> AppResult<SuperTicket> {
        sqlx::query_as::<_, SuperTicket>("SELECT * FROM super_tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Super-ticket {} not found", id)))
    }

    pub async fn super_tickets_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM super_tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Super-ticket {} not found", id)));
        }
        Ok(())
    }
}
