//! Service provider methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::provider::{CreateProvider, Provider, UpdateProvider},
};

impl Repository {
    pub async fn providers_list(&self) -> AppResult<Vec<Provider>> {
        let rows = sqlx::query_as::<_, Provider>("SELECT * FROM providers ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn providers_get_by_id(&self, id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))
    }

    pub async fn providers_create(&self, data: &CreateProvider) -> AppResult<Provider> {
        let row = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (name, email, phone, profession)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.profession)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn providers_update(&self, id: i32, data: &UpdateProvider) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                profession = COALESCE($5, profession)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.profession)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))
    }

    pub async fn providers_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Provider {} not found", id)));
        }
        Ok(())
    }
}
