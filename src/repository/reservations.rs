//! Reservation methods on Repository

use chrono::{NaiveDate, Utc};
use sqlx::PgConnection;

use super::{availability::blocked_ranges, pagination, Repository};
use crate::{
    booking::is_range_free,
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{Reservation, ReservationQuery, UpdateReservation},
    },
};

const UNAVAILABLE: &str = "Property is not available for the selected dates";

/// Resolved reservation to insert
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub property_id: i32,
    pub client_id: i32,
    pub traveler_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Lock the property row so concurrent bookings of it serialize
async fn lock_property(conn: &mut PgConnection, property_id: i32) -> AppResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM properties WHERE id = $1 FOR UPDATE")
        .bind(property_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property {} not found", property_id)))?;
    Ok(())
}

impl Repository {
    /// List reservations; `scope` restricts to those a user books or travels on
    pub async fn reservations_list(
        &self,
        scope: Option<i32>,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<Reservation>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);
        let status = query.status.map(|s| s.as_str());

        let filter = r#"
            WHERE ($1::INTEGER IS NULL OR client_id = $1 OR traveler_id = $1)
              AND ($2::INTEGER IS NULL OR property_id = $2)
              AND ($3::TEXT IS NULL OR status = $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM reservations {}", filter))
            .bind(scope)
            .bind(query.property_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT * FROM reservations {} ORDER BY start_date DESC, id DESC LIMIT $4 OFFSET $5",
            filter
        ))
        .bind(scope)
        .bind(query.property_id)
        .bind(status)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Get a reservation by ID
    pub async fn reservations_get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Insert a reservation. With `enforce`, the dates are checked against
    /// the property's blocks and a matching block is created in the same
    /// transaction.
    pub async fn reservations_create(&self, data: &NewReservation, enforce: bool) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        lock_property(&mut *tx, data.property_id).await?;

        if enforce {
            let blocks = blocked_ranges(&mut *tx, data.property_id, None).await?;
            if !is_range_free(data.start_date, data.end_date, &blocks) {
                return Err(AppError::BusinessRule(UNAVAILABLE.to_string()));
            }
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (property_id, client_id, traveler_id, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.property_id)
        .bind(data.client_id)
        .bind(data.traveler_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(ReservationStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        if enforce {
            sqlx::query(
                r#"
                INSERT INTO availability (property_id, reservation_id, start_date, end_date)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(reservation.property_id)
            .bind(reservation.id)
            .bind(reservation.start_date)
            .bind(reservation.end_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(reservation)
    }

    /// Update a reservation and keep its availability block in step
    pub async fn reservations_update(
        &self,
        id: i32,
        data: &UpdateReservation,
        enforce: bool,
    ) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        let start = data.start_date.unwrap_or(current.start_date);
        let end = data.end_date.unwrap_or(current.end_date);
        if start >= end {
            return Err(AppError::Validation("start_date must be before end_date".to_string()));
        }
        let status = data.status.unwrap_or(current.status);
        let cancelled = status == ReservationStatus::Cancelled;

        let moved = start != current.start_date || end != current.end_date;
        let revived = current.status == ReservationStatus::Cancelled && !cancelled;
        if enforce && !cancelled && (moved || revived) {
            lock_property(&mut *tx, current.property_id).await?;
            let blocks = blocked_ranges(&mut *tx, current.property_id, Some(id)).await?;
            if !is_range_free(start, end, &blocks) {
                return Err(AppError::BusinessRule(UNAVAILABLE.to_string()));
            }
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET
                traveler_id = COALESCE($2, traveler_id),
                start_date = $3,
                end_date = $4,
                status = $5,
                modif_date = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.traveler_id)
        .bind(start)
        .bind(end)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if cancelled {
            sqlx::query("DELETE FROM availability WHERE reservation_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        } else if enforce {
            let moved_rows = sqlx::query(
                "UPDATE availability SET start_date = $2, end_date = $3 WHERE reservation_id = $1",
            )
            .bind(id)
            .bind(start)
            .bind(end)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if moved_rows == 0 {
                sqlx::query(
                    r#"
                    INSERT INTO availability (property_id, reservation_id, start_date, end_date)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(reservation.property_id)
                .bind(id)
                .bind(start)
                .bind(end)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(reservation)
    }

    /// Delete a reservation; its block goes with it
    pub async fn reservations_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reservation {} not found", id)));
        }
        Ok(())
    }
}
