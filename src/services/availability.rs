//! Availability blocks service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{Availability, AvailabilityCheck, AvailabilityResponse, CreateAvailability, UpdateAvailability},
        UserClaims,
    },
    repository::Repository,
};

/// Blocks written by a reservation follow the reservation's lifecycle
fn ensure_manual_block(block: &Availability) -> AppResult<()> {
    if block.reservation_id.is_some() {
        return Err(AppError::BusinessRule("Block belongs to a reservation".to_string()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, property_id: Option<i32>) -> AppResult<Vec<Availability>> {
        self.repository.availability_list(property_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Availability> {
        self.repository.availability_get_by_id(id).await
    }

    /// Whether the property can be booked over the whole range
    pub async fn check(&self, query: &AvailabilityCheck) -> AppResult<AvailabilityResponse> {
        query.validate()?;
        let available = self
            .repository
            .availability_is_property_available(query.property_id, query.start_date, query.end_date)
            .await?;
        Ok(AvailabilityResponse {
            property_id: query.property_id,
            available,
        })
    }

    /// Owners and administrators manage a property's blocks
    async fn require_owner(&self, claims: &UserClaims, property_id: i32) -> AppResult<()> {
        let property = self.repository.properties_get_by_id(property_id).await?;
        claims.require_self_or_admin(property.owner_id)
    }

    pub async fn create(&self, claims: &UserClaims, data: &CreateAvailability) -> AppResult<Availability> {
        data.validate()?;
        self.require_owner(claims, data.property_id).await?;
        self.repository.availability_create(data).await
    }

    pub async fn update(&self, claims: &UserClaims, id: i32, data: &UpdateAvailability) -> AppResult<Availability> {
        let block = self.repository.availability_get_by_id(id).await?;
        self.require_owner(claims, block.property_id).await?;
        ensure_manual_block(&block)?;
        self.repository.availability_update(id, data).await
    }

    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        let block = self.repository.availability_get_by_id(id).await?;
        self.require_owner(claims, block.property_id).await?;
        ensure_manual_block(&block)?;
        self.repository.availability_delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn block(reservation_id: Option<i32>) -> Availability {
        Availability {
            id: 1,
            property_id: 3,
            reservation_id,
            start_date: NaiveDate::from_ymd_opt(2030, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 7, 5).unwrap(),
            crea_date: Utc::now(),
        }
    }

    #[test]
    fn owner_block_can_be_changed() {
        assert!(ensure_manual_block(&block(None)).is_ok());
    }

    #[test]
    fn reservation_block_is_read_only() {
        match ensure_manual_block(&block(Some(8))) {
            Err(AppError::BusinessRule(message)) => assert_eq!(message, "Block belongs to a reservation"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
