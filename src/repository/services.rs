//! Rental service catalog methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::service::{CreateService, Service, UpdateService},
};

impl Repository {
    pub async fn services_list(&self) -> AppResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn services_get_by_id(&self, id: i32) -> AppResult<Service> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    pub async fn services_create(&self, data: &CreateService) -> AppResult<Service> {
        let row = sqlx::query_as::<_, Service>(
            "INSERT INTO services (name, description, price) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn services_update(&self, id: i32, data: &UpdateService) -> AppResult<Service> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }

    pub async fn services_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service {} not found", id)));
        }
        Ok(())
    }
}
