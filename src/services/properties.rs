//! Rental properties service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        property::{CreateProperty, Property, PropertyQuery, UpdateProperty},
        UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PropertiesService {
    repository: Repository,
}

impl PropertiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PropertyQuery) -> AppResult<(Vec<Property>, i64)> {
        self.repository.properties_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Property> {
        self.repository.properties_get_by_id(id).await
    }

    /// The caller becomes the owner
    pub async fn create(&self, claims: &UserClaims, data: &CreateProperty) -> AppResult<Property> {
        data.validate()?;
        let property = self.repository.properties_create(claims.user_id, data).await?;
        tracing::info!(property_id = property.id, owner_id = claims.user_id, "Property created");
        Ok(property)
    }

    pub async fn update(&self, claims: &UserClaims, id: i32, data: &UpdateProperty) -> AppResult<Property> {
        data.validate()?;
        let property = self.repository.properties_get_by_id(id).await?;
        claims.require_self_or_admin(property.owner_id)?;
        self.repository.properties_update(id, data).await
    }

    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        let property = self.repository.properties_get_by_id(id).await?;
        claims.require_self_or_admin(property.owner_id)?;
        self.repository.properties_delete(id).await
    }
}
