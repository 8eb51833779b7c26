//! Super-tickets service

use chrono::{DateTime, Utc};

use crate::{
    booking::within_admission_window,
    config::CinemaConfig,
    error::AppResult,
    models::{
        ticket::{BookSchedule, PurchaseSuperTicket, SuperTicket, ValidationResponse},
        UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SuperTicketsService {
    repository: Repository,
    config: CinemaConfig,
}

impl SuperTicketsService {
    pub fn new(repository: Repository, config: CinemaConfig) -> Self {
        Self { repository, config }
    }

    pub async fn purchase(&self, claims: &UserClaims, data: &PurchaseSuperTicket) -> AppResult<SuperTicket> {
        let buyer = data.user_id.unwrap_or(claims.user_id);
        if buyer != claims.user_id {
            claims.require_admin()?;
        }

        let pass = self
            .repository
            .super_tickets_purchase(buyer, self.config.super_ticket_price, self.config.super_ticket_uses)
            .await?;
        tracing::info!(super_ticket_id = pass.id, user_id = buyer, "Super-ticket purchased");
        Ok(pass)
    }

    pub async fn book(&self, claims: &UserClaims, id: i32, data: &BookSchedule) -> AppResult<SuperTicket> {
        self.get_by_id(claims, id).await?;
        let pass = self
            .repository
            .super_tickets_book(id, data.schedule_id, self.config.max_booked_schedules())
            .await?;
        tracing::info!(
            super_ticket_id = id,
            schedule_id = data.schedule_id,
            uses_remaining = pass.uses_remaining,
            "Schedule booked on super-ticket"
        );
        Ok(pass)
    }

    pub async fn validate(&self, claims: &UserClaims, id: i32, data: &BookSchedule) -> AppResult<ValidationResponse> {
        let pass = self.get_by_id(claims, id).await?;
        let schedule = self.repository.schedules_get_by_id(data.schedule_id).await?;
        let valid = admits(
            &pass,
            schedule.id,
            Utc::now(),
            schedule.date,
            self.config.admission_window_minutes,
        );
        Ok(ValidationResponse { valid })
    }

    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<SuperTicket>> {
        self.repository.super_tickets_list(claims.scope()).await
    }

    pub async fn get_by_id(&self, claims: &UserClaims, id: i32) -> AppResult<SuperTicket> {
        let pass = self.repository.super_tickets_get_by_id(id).await?;
        claims.require_self_or_admin(pass.user_id)?;
        Ok(pass)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.super_tickets_delete(id).await
    }
}

/// A pass admits to a schedule it booked, around the schedule's start
fn admits(pass: &SuperTicket, schedule_id: i32, now: DateTime<Utc>, start: DateTime<Utc>, window: i64) -> bool {
    pass.used_schedules.contains(&schedule_id) && within_admission_window(now, start, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn pass(used: Vec<i32>) -> SuperTicket {
        SuperTicket {
            id: 1,
            user_id: 2,
            price: Decimal::new(8000, 2),
            uses_remaining: 10 - used.len() as i32,
            used_schedules: used,
            crea_date: Utc::now(),
        }
    }

    #[test]
    fn booked_schedule_admits_inside_window() {
        let start = Utc::now();
        assert!(admits(&pass(vec![4, 9]), 9, start + Duration::minutes(10), start, 15));
    }

    #[test]
    fn unbooked_schedule_never_admits() {
        let start = Utc::now();
        assert!(!admits(&pass(vec![4]), 9, start, start, 15));
    }

    #[test]
    fn booked_schedule_outside_window_is_refused() {
        let start = Utc::now();
        assert!(!admits(&pass(vec![9]), 9, start - Duration::minutes(16), start, 15));
    }
}
