//! Availability domain methods on Repository

use chrono::NaiveDate;
use sqlx::PgConnection;

use super::Repository;
use crate::{
    booking::is_range_free,
    error::{AppError, AppResult},
    models::availability::{Availability, CreateAvailability, UpdateAvailability},
};

/// Blocked ranges of a property, optionally ignoring the block of one reservation
pub(crate) async fn blocked_ranges(
    conn: &mut PgConnection,
    property_id: i32,
    exclude_reservation: Option<i32>,
) -> AppResult<Vec<(NaiveDate, NaiveDate)>> {
    let rows = sqlx::query_as::<_, (NaiveDate, NaiveDate)>(
        r#"
        SELECT start_date, end_date FROM availability
        WHERE property_id = $1
          AND ($2::INTEGER IS NULL OR reservation_id IS DISTINCT FROM $2)
        "#,
    )
    .bind(property_id)
    .bind(exclude_reservation)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

impl Repository {
    /// List blocks, optionally for one property
    pub async fn availability_list(&self, property_id: Option<i32>) -> AppResult<Vec<Availability>> {
        let rows = sqlx::query_as::<_, Availability>(
            r#"
            SELECT * FROM availability
            WHERE ($1::INTEGER IS NULL OR property_id = $1)
            ORDER BY property_id, start_date
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a block by ID
    pub async fn availability_get_by_id(&self, id: i32) -> AppResult<Availability> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availability WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Availability {} not found", id)))
    }

    /// Whether no block of the property intersects `[start_date, end_date]`
    pub async fn availability_is_property_available(
        &self,
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let blocks = blocked_ranges(&mut conn, property_id, None).await?;
        Ok(is_range_free(start_date, end_date, &blocks))
    }

    /// Create an owner block
    pub async fn availability_create(&self, data: &CreateAvailability) -> AppResult<Availability> {
        let row = sqlx::query_as::<_, Availability>(
            r#"
            INSERT INTO availability (property_id, start_date, end_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.property_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Move a block
    pub async fn availability_update(&self, id: i32, data: &UpdateAvailability) -> AppResult<Availability> {
        let current = self.availability_get_by_id(id).await?;
        let start = data.start_date.unwrap_or(current.start_date);
        let end = data.end_date.unwrap_or(current.end_date);
        if start >= end {
            return Err(AppError::Validation("start_date must be before end_date".to_string()));
        }

        sqlx::query_as::<_, Availability>(
            "UPDATE availability SET start_date = $2, end_date = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Availability {} not found", id)))
    }

    /// Delete a block
    pub async fn availability_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM availability WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Availability {} not found", id)));
        }
        Ok(())
    }
}
