//! Invoice methods on Repository

use super::{users::set_vip, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::InvoiceKind,
        invoice::{Invoice, NewInvoice},
    },
};

impl Repository {
    /// Store the invoice for a completed checkout and, for a membership,
    /// grant VIP in the same transaction. A second delivery of the same
    /// checkout session is a no-op and returns `None`.
    pub async fn invoices_fulfil(&self, data: &NewInvoice) -> AppResult<Option<Invoice>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (user_id, reservation_id, kind, amount, stripe_session_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (stripe_session_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.reservation_id)
        .bind(data.kind)
        .bind(data.amount)
        .bind(&data.stripe_session_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(invoice) = row else {
            return Ok(None);
        };
        if invoice.kind == InvoiceKind::Membership {
            set_vip(&mut *tx, invoice.user_id, true).await?;
        }

        tx.commit().await?;
        Ok(Some(invoice))
    }

    pub async fn invoices_list(&self, user_id: Option<i32>) -> AppResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::INTEGER IS NULL OR user_id = $1)
            ORDER BY crea_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn invoices_get_by_id(&self, id: i32) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice {} not found", id)))
    }

    pub async fn invoices_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Invoice {} not found", id)));
        }
        Ok(())
    }
}
