//! Schedules (screenings) service

use chrono::{DateTime, Local, Utc};

use crate::{
    booking::check_screening_slot,
    config::CinemaConfig,
    error::{AppError, AppResult},
    models::schedule::{CreateSchedule, Schedule, ScheduleDetails, ScheduleQuery, UpdateSchedule},
    repository::{
        schedules::{OverlapRule, SchedulePlacement},
        Repository,
    },
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    config: CinemaConfig,
}

impl SchedulesService {
    pub fn new(repository: Repository, config: CinemaConfig) -> Self {
        Self { repository, config }
    }

    fn rule(&self) -> OverlapRule {
        OverlapRule {
            scope: self.config.overlap_scope,
            buffer_minutes: self.config.cleaning_buffer_minutes,
        }
    }

    /// Opening rules, evaluated on the server's local clock
    fn check_slot(&self, date: DateTime<Utc>) -> AppResult<()> {
        let start = date.with_timezone(&Local).naive_local();
        let today = Local::now().date_naive();
        check_screening_slot(start, today, self.config.opening_hour, self.config.closing_hour)
            .map_err(|e| AppError::BusinessRule(e.to_string()))
    }

    pub async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<ScheduleDetails>> {
        self.repository.schedules_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ScheduleDetails> {
        self.repository.schedules_get_details(id).await
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        self.check_slot(data.date)?;

        let placement = SchedulePlacement {
            date: data.date,
            movie_id: data.movie_id,
            auditorium_id: data.auditorium_id,
        };
        let schedule = self.repository.schedules_create(&placement, self.rule()).await?;
        tracing::info!(
            schedule_id = schedule.id,
            movie_id = schedule.movie_id,
            auditorium_id = schedule.auditorium_id,
            "Schedule created"
        );
        Ok(schedule)
    }

    /// Move a schedule; unchanged fields keep their stored value
    pub async fn update(&self, id: i32, data: &UpdateSchedule) -> AppResult<Schedule> {
        let current = self.repository.schedules_get_by_id(id).await?;

        if let Some(date) = data.date {
            self.check_slot(date)?;
        }

        let placement = SchedulePlacement {
            date: data.date.unwrap_or(current.date),
            movie_id: data.movie_id.unwrap_or(current.movie_id),
            auditorium_id: data.auditorium_id.unwrap_or(current.auditorium_id),
        };
        self.repository.schedules_update(id, &placement, self.rule()).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.schedules_delete(id).await
    }
}
