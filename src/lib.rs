//! Marketplace server
//!
//! REST JSON API for a property-rental marketplace and a cinema box office,
//! sharing users, balances and payments.

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
