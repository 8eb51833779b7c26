//! Properties domain methods on Repository

use chrono::Utc;

use super::{pagination, Repository};
use crate::{
    error::{AppError, AppResult},
    models::property::{CreateProperty, Property, PropertyQuery, UpdateProperty},
};

impl Repository {
    /// List properties with optional filters and pagination
    pub async fn properties_list(&self, query: &PropertyQuery) -> AppResult<(Vec<Property>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);
        let city = query.city.as_ref().map(|c| c.to_lowercase());

        let filter = r#"
            WHERE ($1::TEXT IS NULL OR LOWER(city) = $1)
              AND ($2::INTEGER IS NULL OR owner_id = $2)
              AND ($3::NUMERIC IS NULL OR price_per_night <= $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM properties {}", filter))
            .bind(&city)
            .bind(query.owner_id)
            .bind(query.max_price)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Property>(&format!(
            "SELECT * FROM properties {} ORDER BY crea_date DESC, id DESC LIMIT $4 OFFSET $5",
            filter
        ))
        .bind(&city)
        .bind(query.owner_id)
        .bind(query.max_price)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Get property by ID
    pub async fn properties_get_by_id(&self, id: i32) -> AppResult<Property> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))
    }

    /// Create a property owned by `owner_id`
    pub async fn properties_create(&self, owner_id: i32, data: &CreateProperty) -> AppResult<Property> {
        let row = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (owner_id, name, description, address, city, property_type, price_per_night, capacity, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.property_type)
        .bind(data.price_per_night)
        .bind(data.capacity)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a property
    pub async fn properties_update(&self, id: i32, data: &UpdateProperty) -> AppResult<Property> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                property_type = COALESCE($6, property_type),
                price_per_night = COALESCE($7, price_per_night),
                capacity = COALESCE($8, capacity),
                image_url = COALESCE($9, image_url),
                modif_date = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.property_type)
        .bind(data.price_per_night)
        .bind(data.capacity)
        .bind(&data.image_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property {} not found", id)))
    }

    /// Delete a property
    pub async fn properties_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Property {} not found", id)));
        }
        Ok(())
    }
}
