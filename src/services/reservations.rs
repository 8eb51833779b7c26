//! Reservations service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ReservationStatus,
        reservation::{CreateReservation, Reservation, ReservationQuery, UpdateReservation},
        UserClaims,
    },
    repository::{reservations::NewReservation, Repository},
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    /// Book and block availability atomically
    enforce_availability: bool,
}

impl ReservationsService {
    pub fn new(repository: Repository, enforce_availability: bool) -> Self {
        Self {
            repository,
            enforce_availability,
        }
    }

    pub async fn list(&self, claims: &UserClaims, query: &ReservationQuery) -> AppResult<(Vec<Reservation>, i64)> {
        self.repository.reservations_list(claims.scope(), query).await
    }

    /// Fetch a reservation the caller books, travels on, or administers
    pub async fn get_by_id(&self, claims: &UserClaims, id: i32) -> AppResult<Reservation> {
        let reservation = self.repository.reservations_get_by_id(id).await?;
        require_party(claims, &reservation)?;
        Ok(reservation)
    }

    pub async fn create(&self, claims: &UserClaims, data: &CreateReservation) -> AppResult<Reservation> {
        data.validate()?;

        let client_id = data.client_id.unwrap_or(claims.user_id);
        if client_id != claims.user_id {
            claims.require_admin()?;
        }

        let reservation = self
            .repository
            .reservations_create(
                &NewReservation {
                    property_id: data.property_id,
                    client_id,
                    traveler_id: data.traveler_id.unwrap_or(client_id),
                    start_date: data.start_date,
                    end_date: data.end_date,
                },
                self.enforce_availability,
            )
            .await?;

        tracing::info!(
            reservation_id = reservation.id,
            property_id = reservation.property_id,
            client_id,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Parties may change dates, traveler or cancel; confirming or marking
    /// paid is for the property owner or an administrator
    pub async fn update(&self, claims: &UserClaims, id: i32, data: &UpdateReservation) -> AppResult<Reservation> {
        let reservation = self.repository.reservations_get_by_id(id).await?;

        if matches!(data.status, Some(ReservationStatus::Confirmed | ReservationStatus::Paid)) {
            let property = self.repository.properties_get_by_id(reservation.property_id).await?;
            claims.require_self_or_admin(property.owner_id)?;
        } else {
            require_party(claims, &reservation)?;
        }

        self.repository
            .reservations_update(id, data, self.enforce_availability)
            .await
    }

    pub async fn delete(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        let reservation = self.repository.reservations_get_by_id(id).await?;
        claims.require_self_or_admin(reservation.client_id)?;
        self.repository.reservations_delete(id).await
    }
}

fn require_party(claims: &UserClaims, reservation: &Reservation) -> AppResult<()> {
    if claims.is_admin() || claims.user_id == reservation.client_id || claims.user_id == reservation.traveler_id {
        Ok(())
    } else {
        Err(AppError::Authorization("Access restricted to the resource owner".to_string()))
    }
}
