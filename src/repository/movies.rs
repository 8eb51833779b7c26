//! Movie methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::movie::{CreateMovie, Movie, MovieQuery, UpdateMovie},
};

impl Repository {
    /// List movies, filtered by title fragment and genre
    pub async fn movies_search(&self, query: &MovieQuery) -> AppResult<Vec<Movie>> {
        let pattern = query.title.as_ref().map(|t| format!("%{}%", t.to_lowercase()));
        let rows = sqlx::query_as::<_, Movie>(
            r#"
            SELECT * FROM movies
            WHERE ($1::TEXT IS NULL OR LOWER(title) LIKE $1)
              AND ($2::TEXT IS NULL OR LOWER(genre) = LOWER($2))
            ORDER BY title, id
            "#,
        )
        .bind(pattern)
        .bind(&query.genre)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn movies_get_by_id(&self, id: i32) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
    }

    pub async fn movies_create(&self, data: &CreateMovie) -> AppResult<Movie> {
        let row = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, description, duration, genre)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.duration)
        .bind(&data.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn movies_update(&self, id: i32, data: &UpdateMovie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration),
                genre = COALESCE($5, genre)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.duration)
        .bind(&data.genre)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
    }

    pub async fn movies_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Movie {} not found", id)));
        }
        Ok(())
    }
}
