//! Movies service

use validator::Validate;

use crate::{
    error::AppResult,
    models::movie::{CreateMovie, Movie, MovieQuery, UpdateMovie},
    repository::Repository,
};

#[derive(Clone)]
pub struct MoviesService {
    repository: Repository,
}

impl MoviesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, query: &MovieQuery) -> AppResult<Vec<Movie>> {
        self.repository.movies_search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Movie> {
        self.repository.movies_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateMovie) -> AppResult<Movie> {
        data.validate()?;
        self.repository.movies_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateMovie) -> AppResult<Movie> {
        data.validate()?;
        self.repository.movies_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.movies_delete(id).await
    }
}
