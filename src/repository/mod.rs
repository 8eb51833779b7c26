//! Repository layer for database operations
//!
//! Each file adds the methods of one domain to [`Repository`], prefixed with
//! the domain name (`users_get_by_id`, `tickets_purchase`, ...). Multi-step
//! admission sequences run inside a transaction and lock the contended rows
//! with `SELECT ... FOR UPDATE`.

pub mod auditoriums;
pub mod availability;
pub mod interventions;
pub mod invoices;
pub mod movies;
pub mod properties;
pub mod providers;
pub mod reservations;
pub mod schedules;
pub mod services;
pub mod super_tickets;
pub mod tickets;
pub mod transactions;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Ping the database
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Convert optional 1-based page parameters to (page, per_page, offset)
pub(crate) fn pagination(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page, (page - 1) * per_page)
}

#[cfg(test)]
mod tests {
    use super::pagination;

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(pagination(None, None), (1, 20, 0));
        assert_eq!(pagination(Some(3), Some(10)), (3, 10, 20));
        assert_eq!(pagination(Some(0), Some(1000)), (1, 100, 0));
    }
}
