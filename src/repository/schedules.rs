//! Schedule methods on Repository

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use super::Repository;
use crate::{
    booking::{does_overlap, AdmissionError, Screening},
    config::OverlapScope,
    error::{AppError, AppResult},
    models::{
        auditorium::Auditorium,
        schedule::{Schedule, ScheduleDetails, ScheduleQuery, ScheduleSlot},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT d.*, d.capacity - d.tickets_sold AS seats_remaining
    FROM (
        SELECT s.id, s.date, s.movie_id, m.title AS movie_title, m.duration,
               s.auditorium_id, a.name AS auditorium_name, a.capacity,
               (SELECT COUNT(*) FROM tickets t WHERE t.schedule_id = s.id)
                 + (SELECT COUNT(*) FROM super_tickets st WHERE s.id = ANY(st.used_schedules))
                 AS tickets_sold
        FROM schedules s
        JOIN movies m ON m.id = s.movie_id
        JOIN auditoriums a ON a.id = s.auditorium_id
    ) d
"#;

/// Placement of a schedule to check and store
#[derive(Debug, Clone, Copy)]
pub struct SchedulePlacement {
    pub date: DateTime<Utc>,
    pub movie_id: i32,
    pub auditorium_id: i32,
}

/// How the overlap check is run
#[derive(Debug, Clone, Copy)]
pub struct OverlapRule {
    pub scope: OverlapScope,
    pub buffer_minutes: i64,
}

/// Seats claimed on a schedule by tickets and super-ticket bookings
pub(crate) async fn sold_count(conn: &mut PgConnection, schedule_id: i32) -> AppResult<i64> {
    let sold: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM tickets WHERE schedule_id = $1)
             + (SELECT COUNT(*) FROM super_tickets WHERE $1 = ANY(used_schedules))
        "#,
    )
    .bind(schedule_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(sold)
}

/// Lock a schedule row; fails with "Schedule does not exist"
pub(crate) async fn lock_schedule(conn: &mut PgConnection, schedule_id: i32) -> AppResult<Schedule> {
    let schedule = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1 FOR UPDATE")
        .bind(schedule_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AdmissionError::ScheduleNotFound)?;
    Ok(schedule)
}

/// Capacity of an auditorium; fails with "Auditorium does not exist"
pub(crate) async fn auditorium_capacity(conn: &mut PgConnection, auditorium_id: i32) -> AppResult<i32> {
    let capacity = sqlx::query_scalar::<_, i32>("SELECT capacity FROM auditoriums WHERE id = $1")
        .bind(auditorium_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AdmissionError::AuditoriumNotFound)?;
    Ok(capacity)
}

/// Overlap-key rows to lock, in ascending id order
fn lock_order(new_key: i32, old_key: Option<i32>) -> Vec<i32> {
    let mut keys = vec![new_key];
    if let Some(old) = old_key.filter(|old| *old != new_key) {
        keys.push(old);
    }
    keys.sort_unstable();
    keys
}

/// Lock the rows behind the overlap key, then verify the placement fits
/// next to the schedules sharing that key. `current` is the schedule being
/// moved, already locked by the caller.
async fn check_placement(
    conn: &mut PgConnection,
    placement: &SchedulePlacement,
    current: Option<&Schedule>,
    rule: OverlapRule,
) -> AppResult<()> {
    let (table, column, key, old_key) = match rule.scope {
        OverlapScope::Movie => ("movies", "movie_id", placement.movie_id, current.map(|s| s.movie_id)),
        OverlapScope::Auditorium => (
            "auditoriums",
            "auditorium_id",
            placement.auditorium_id,
            current.map(|s| s.auditorium_id),
        ),
    };
    for id in lock_order(key, old_key) {
        sqlx::query(&format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", table))
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    let auditorium = sqlx::query_as::<_, Auditorium>("SELECT * FROM auditoriums WHERE id = $1")
        .bind(placement.auditorium_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AdmissionError::AuditoriumNotFound)?;
    if auditorium.maintenance {
        return Err(AppError::BusinessRule("Auditorium is under maintenance".to_string()));
    }

    let duration = sqlx::query_scalar::<_, i32>("SELECT duration FROM movies WHERE id = $1")
        .bind(placement.movie_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", placement.movie_id)))?;

    let slots = sqlx::query_as::<_, ScheduleSlot>(&format!(
        r#"
        SELECT s.id, s.date, m.duration
        FROM schedules s
        JOIN movies m ON m.id = s.movie_id
        WHERE s.{} = $1 AND ($2::INTEGER IS NULL OR s.id != $2)
        "#,
        column
    ))
    .bind(key)
    .bind(current.map(|s| s.id))
    .fetch_all(&mut *conn)
    .await?;

    let existing: Vec<Screening> = slots.into_iter().map(Screening::from).collect();
    let candidate = Screening {
        id: current.map(|s| s.id),
        date: placement.date,
        duration_minutes: duration,
    };
    if does_overlap(&candidate, &existing, rule.buffer_minutes) {
        return Err(AppError::BusinessRule(
            "Schedule overlaps with an existing schedule".to_string(),
        ));
    }
    Ok(())
}

impl Repository {
    /// List schedules with their seat usage
    pub async fn schedules_list(&self, query: &ScheduleQuery) -> AppResult<Vec<ScheduleDetails>> {
        let rows = sqlx::query_as::<_, ScheduleDetails>(&format!(
            r#"
            {}
            WHERE ($1::INTEGER IS NULL OR d.movie_id = $1)
              AND ($2::INTEGER IS NULL OR d.auditorium_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR d.date >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR d.date <= $4)
            ORDER BY d.date, d.id
            "#,
            DETAILS_SELECT
        ))
        .bind(query.movie_id)
        .bind(query.auditorium_id)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn schedules_get_by_id(&self, id: i32) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    pub async fn schedules_get_details(&self, id: i32) -> AppResult<ScheduleDetails> {
        sqlx::query_as::<_, ScheduleDetails>(&format!("{} WHERE d.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    /// Insert a schedule after the maintenance and overlap checks
    pub async fn schedules_create(&self, placement: &SchedulePlacement, rule: OverlapRule) -> AppResult<Schedule> {
        let mut tx = self.pool.begin().await?;

        check_placement(&mut *tx, placement, None, rule).await?;

        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (date, movie_id, auditorium_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(placement.date)
        .bind(placement.movie_id)
        .bind(placement.auditorium_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(schedule)
    }

    /// Move a schedule; the new placement goes through the same checks
    pub async fn schedules_update(
        &self,
        id: i32,
        placement: &SchedulePlacement,
        rule: OverlapRule,
    ) -> AppResult<Schedule> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;
        check_placement(&mut *tx, placement, Some(&current), rule).await?;

        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules SET date = $2, movie_id = $3, auditorium_id = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(placement.date)
        .bind(placement.movie_id)
        .bind(placement.auditorium_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))?;

        tx.commit().await?;
        Ok(schedule)
    }

    pub async fn schedules_delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Schedule {} not found", id)));
        }
        // Passes keep no dangling schedule ids
        sqlx::query("UPDATE super_tickets SET used_schedules = array_remove(used_schedules, $1) WHERE $1 = ANY(used_schedules)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::lock_order;

    #[test]
    fn create_locks_only_the_new_key() {
        assert_eq!(lock_order(7, None), vec![7]);
    }

    #[test]
    fn unchanged_key_is_locked_once() {
        assert_eq!(lock_order(7, Some(7)), vec![7]);
    }

    #[test]
    fn moved_schedule_locks_both_keys_ascending() {
        assert_eq!(lock_order(9, Some(4)), vec![4, 9]);
        assert_eq!(lock_order(4, Some(9)), vec![4, 9]);
    }
}
