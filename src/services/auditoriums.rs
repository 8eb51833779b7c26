//! Auditoriums service

use validator::Validate;

use crate::{
    error::AppResult,
    models::auditorium::{Auditorium, CreateAuditorium, UpdateAuditorium},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditoriumsService {
    repository: Repository,
}

impl AuditoriumsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Auditorium>> {
        self.repository.auditoriums_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Auditorium> {
        self.repository.auditoriums_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateAuditorium) -> AppResult<Auditorium> {
        data.validate()?;
        self.repository.auditoriums_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateAuditorium) -> AppResult<Auditorium> {
        data.validate()?;
        let auditorium = self.repository.auditoriums_update(id, data).await?;
        if auditorium.maintenance {
            tracing::info!(auditorium_id = id, "Auditorium under maintenance");
        }
        Ok(auditorium)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.auditoriums_delete(id).await
    }
}
