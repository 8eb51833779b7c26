//! Rental services, providers and interventions

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        intervention::{CreateIntervention, Intervention, InterventionQuery, UpdateIntervention},
        provider::{CreateProvider, Provider, UpdateProvider},
        service::{CreateService, Service, UpdateService},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Services ----
    pub async fn list_services(&self) -> AppResult<Vec<Service>> {
        self.repository.services_list().await
    }

    pub async fn get_service(&self, id: i32) -> AppResult<Service> {
        self.repository.services_get_by_id(id).await
    }

    pub async fn create_service(&self, data: &CreateService) -> AppResult<Service> {
        data.validate()?;
        self.repository.services_create(data).await
    }

    pub async fn update_service(&self, id: i32, data: &UpdateService) -> AppResult<Service> {
        data.validate()?;
        self.repository.services_update(id, data).await
    }

    pub async fn delete_service(&self, id: i32) -> AppResult<()> {
        self.repository.services_delete(id).await
    }

    // ---- Providers ----
    pub async fn list_providers(&self) -> AppResult<Vec<Provider>> {
        self.repository.providers_list().await
    }

    pub async fn get_provider(&self, id: i32) -> AppResult<Provider> {
        self.repository.providers_get_by_id(id).await
    }

    pub async fn create_provider(&self, data: &CreateProvider) -> AppResult<Provider> {
        data.validate()?;
        self.repository.providers_create(data).await
    }

    pub async fn update_provider(&self, id: i32, data: &UpdateProvider) -> AppResult<Provider> {
        data.validate()?;
        self.repository.providers_update(id, data).await
    }

    pub async fn delete_provider(&self, id: i32) -> AppResult<()> {
        self.repository.providers_delete(id).await
    }

    // ---- Interventions ----
    pub async fn list_interventions(&self, query: &InterventionQuery) -> AppResult<Vec<Intervention>> {
        self.repository.interventions_list(query).await
    }

    pub async fn get_intervention(&self, id: i32) -> AppResult<Intervention> {
        self.repository.interventions_get_by_id(id).await
    }

    pub async fn create_intervention(&self, data: &CreateIntervention) -> AppResult<Intervention> {
        data.validate()?;
        self.repository.interventions_create(data).await
    }

    pub async fn update_intervention(&self, id: i32, data: &UpdateIntervention) -> AppResult<Intervention> {
        data.validate()?;
        self.repository.interventions_update(id, data).await
    }

    pub async fn delete_intervention(&self, id: i32) -> AppResult<()> {
        self.repository.interventions_delete(id).await
    }
}
