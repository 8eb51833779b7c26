//! Intervention methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::intervention::{CreateIntervention, Intervention, InterventionQuery, UpdateIntervention},
};

impl Repository {
    pub async fn interventions_list(&self, query: &InterventionQuery) -> AppResult<Vec<Intervention>> {
        let rows = sqlx::query_as::<_, Intervention>(
            r#"
            SELECT * FROM interventions
            WHERE ($1::INTEGER IS NULL OR property_id = $1)
              AND ($2::INTEGER IS NULL OR provider_id = $2)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(query.property_id)
        .bind(query.provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn interventions_get_by_id(&self, id: i32) -> AppResult<Intervention> {
        sqlx::query_as::<_, Intervention>("SELECT * FROM interventions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    pub async fn interventions_create(&self, data: &CreateIntervention) -> AppResult<Intervention> {
        let row = sqlx::query_as::<_, Intervention>(
            r#"
            INSERT INTO interventions (provider_id, service_id, property_id, date, price, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.provider_id)
        .bind(data.service_id)
        .bind(data.property_id)
        .bind(data.date)
        .bind(data.price)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn interventions_update(&self, id: i32, data: &UpdateIntervention) -> AppResult<Intervention> {
        sqlx::query_as::<_, Intervention>(
            r#"
            UPDATE interventions SET
                provider_id = COALESCE($2, provider_id),
                service_id = COALESCE($3, service_id),
                date = COALESCE($4, date),
                price = COALESCE($5, price),
                notes = COALESCE($6, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.provider_id)
        .bind(data.service_id)
        .bind(data.date)
        .bind(data.price)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    pub async fn interventions_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM interventions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Intervention {} not found", id)));
        }
        Ok(())
    }
}
