//! Tickets service

use chrono::Utc;

use crate::{
    booking::within_admission_window,
    config::CinemaConfig,
    error::AppResult,
    models::{
        ticket::{PurchaseTicket, Ticket, ValidationResponse},
        UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TicketsService {
    repository: Repository,
    config: CinemaConfig,
}

impl TicketsService {
    pub fn new(repository: Repository, config: CinemaConfig) -> Self {
        Self { repository, config }
    }

    /// Buy a ticket for the caller, or for `user_id` when an administrator asks
    pub async fn purchase(&self, claims: &UserClaims, data: &PurchaseTicket) -> AppResult<Ticket> {
        let buyer = data.user_id.unwrap_or(claims.user_id);
        if buyer != claims.user_id {
            claims.require_admin()?;
        }

        let ticket = self
            .repository
            .tickets_purchase(data.schedule_id, buyer, self.config.ticket_price)
            .await?;
        tracing::info!(
            ticket_id = ticket.id,
            schedule_id = ticket.schedule_id,
            user_id = buyer,
            price = %ticket.price,
            "Ticket purchased"
        );
        Ok(ticket)
    }

    pub async fn list(&self, claims: &UserClaims, schedule_id: Option<i32>) -> AppResult<Vec<Ticket>> {
        self.repository.tickets_list(claims.scope(), schedule_id).await
    }

    pub async fn get_by_id(&self, claims: &UserClaims, id: i32) -> AppResult<Ticket> {
        let ticket = self.repository.tickets_get_by_id(id).await?;
        claims.require_self_or_admin(ticket.user_id)?;
        Ok(ticket)
    }

    /// A ticket admits only around its schedule's start; once admitted it is marked used
    pub async fn validate(&self, claims: &UserClaims, id: i32) -> AppResult<ValidationResponse> {
        let ticket = self.get_by_id(claims, id).await?;
        let schedule = self.repository.schedules_get_by_id(ticket.schedule_id).await?;

        let valid = within_admission_window(Utc::now(), schedule.date, self.config.admission_window_minutes);
        if valid {
            self.repository.tickets_mark_used(ticket.id).await?;
        }
        tracing::debug!(ticket_id = id, valid, "Ticket validated");
        Ok(ValidationResponse { valid })
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.tickets_delete(id).await
    }
}
