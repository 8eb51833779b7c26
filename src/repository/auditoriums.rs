//! Auditorium methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::auditorium::{Auditorium, CreateAuditorium, UpdateAuditorium},
};

impl Repository {
    pub async fn auditoriums_list(&self) -> AppResult<Vec<Auditorium>> {
        let rows = sqlx::query_as::<_, Auditorium>("SELECT * FROM auditoriums ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn auditoriums_get_by_id(&self, id: i32) -> AppResult<Auditorium> {
        sqlx::query_as::<_, Auditorium>("SELECT * FROM auditoriums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Auditorium {} not found", id)))
    }

    pub async fn auditoriums_create(&self, data: &CreateAuditorium) -> AppResult<Auditorium> {
        let row = sqlx::query_as::<_, Auditorium>(
            r#"
            INSERT INTO auditoriums (name, description, capacity, maintenance, handicap)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.maintenance)
        .bind(data.handicap)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn auditoriums_update(&self, id: i32, data: &UpdateAuditorium) -> AppResult<Auditorium> {
        sqlx::query_as::<_, Auditorium>(
            r#"
            UPDATE auditoriums SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                capacity = COALESCE($4, capacity),
                maintenance = COALESCE($5, maintenance),
                handicap = COALESCE($6, handicap)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.maintenance)
        .bind(data.handicap)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Auditorium {} not found", id)))
    }

    pub async fn auditoriums_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM auditoriums WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Auditorium {} not found", id)));
        }
        Ok(())
    }
}
