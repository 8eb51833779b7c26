//! Business logic services

pub mod auditoriums;
pub mod availability;
pub mod catalog;
pub mod invoices;
pub mod movies;
pub mod payments;
pub mod properties;
pub mod reservations;
pub mod revocation;
pub mod schedules;
pub mod super_tickets;
pub mod tickets;
pub mod transactions;
pub mod uploads;
pub mod users;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub properties: properties::PropertiesService,
    pub reservations: reservations::ReservationsService,
    pub availability: availability::AvailabilityService,
    pub auditoriums: auditoriums::AuditoriumsService,
    pub movies: movies::MoviesService,
    pub schedules: schedules::SchedulesService,
    pub tickets: tickets::TicketsService,
    pub super_tickets: super_tickets::SuperTicketsService,
    pub transactions: transactions::TransactionsService,
    pub catalog: catalog::CatalogService,
    pub invoices: invoices::InvoicesService,
    pub payments: payments::PaymentsService,
    pub uploads: uploads::UploadsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig, revocations: Arc<dyn revocation::RevocationStore>) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), config.auth.clone(), revocations),
            properties: properties::PropertiesService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(
                repository.clone(),
                config.rentals.enforce_availability,
            ),
            availability: availability::AvailabilityService::new(repository.clone()),
            auditoriums: auditoriums::AuditoriumsService::new(repository.clone()),
            movies: movies::MoviesService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone(), config.cinema.clone()),
            tickets: tickets::TicketsService::new(repository.clone(), config.cinema.clone()),
            super_tickets: super_tickets::SuperTicketsService::new(repository.clone(), config.cinema.clone()),
            transactions: transactions::TransactionsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            invoices: invoices::InvoicesService::new(repository.clone()),
            payments: payments::PaymentsService::new(repository.clone(), config.payment.clone()),
            uploads: uploads::UploadsService::new(config.upload.clone()),
            repository,
        }
    }

    /// Database readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
