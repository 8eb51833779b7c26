//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auditoriums, availability, health, interventions, invoices, movies, payment, properties, providers,
    reservations, schedules, services, supertickets, tickets, transactions, upload, users,
};

/// Registers the JWT bearer scheme referenced by `security(("bearer_auth" = []))`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "1.0.0",
        description = "Property rentals and cinema booking REST API"
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::login,
        users::logout,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Properties
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::update_property,
        properties::delete_property,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        // Availability
        availability::list_availability,
        availability::check_availability,
        availability::get_availability,
        availability::create_availability,
        availability::update_availability,
        availability::delete_availability,
        // Cinema
        auditoriums::list_auditoriums,
        auditoriums::get_auditorium,
        auditoriums::create_auditorium,
        auditoriums::update_auditorium,
        auditoriums::delete_auditorium,
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        tickets::list_tickets,
        tickets::get_ticket,
        tickets::purchase_ticket,
        tickets::validate_ticket,
        tickets::delete_ticket,
        supertickets::list_super_tickets,
        supertickets::get_super_ticket,
        supertickets::purchase_super_ticket,
        supertickets::book_super_ticket,
        supertickets::validate_super_ticket,
        supertickets::delete_super_ticket,
        // Money
        transactions::deposit,
        transactions::withdraw,
        transactions::balance,
        transactions::list_transactions,
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::delete_invoice,
        payment::membership_checkout,
        payment::reservation_checkout,
        payment::stripe_webhook,
        // Rental services
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        providers::list_providers,
        providers::get_provider,
        providers::create_provider,
        providers::update_provider,
        providers::delete_provider,
        interventions::list_interventions,
        interventions::get_intervention,
        interventions::create_intervention,
        interventions::update_intervention,
        interventions::delete_intervention,
        // Upload
        upload::upload_files,
    ),
    components(
        schemas(
            // Users
            users::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::UserQuery,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::LoginRequest,
            crate::models::enums::Role,
            // Rentals
            crate::models::property::Property,
            crate::models::property::CreateProperty,
            crate::models::property::UpdateProperty,
            crate::models::reservation::Reservation,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::UpdateReservation,
            crate::models::enums::ReservationStatus,
            crate::models::availability::Availability,
            crate::models::availability::CreateAvailability,
            crate::models::availability::UpdateAvailability,
            crate::models::availability::AvailabilityResponse,
            crate::models::service::Service,
            crate::models::service::CreateService,
            crate::models::service::UpdateService,
            crate::models::provider::Provider,
            crate::models::provider::CreateProvider,
            crate::models::provider::UpdateProvider,
            crate::models::intervention::Intervention,
            crate::models::intervention::CreateIntervention,
            crate::models::intervention::UpdateIntervention,
            // Cinema
            crate::models::auditorium::Auditorium,
            crate::models::auditorium::CreateAuditorium,
            crate::models::auditorium::UpdateAuditorium,
            crate::models::movie::Movie,
            crate::models::movie::CreateMovie,
            crate::models::movie::UpdateMovie,
            crate::models::schedule::Schedule,
            crate::models::schedule::ScheduleDetails,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            crate::models::ticket::Ticket,
            crate::models::ticket::SuperTicket,
            crate::models::ticket::PurchaseTicket,
            crate::models::ticket::PurchaseSuperTicket,
            crate::models::ticket::BookSchedule,
            crate::models::ticket::ValidationResponse,
            // Money
            crate::models::transaction::Transaction,
            crate::models::transaction::AmountRequest,
            crate::models::transaction::BalanceResponse,
            crate::models::enums::TransactionType,
            crate::models::invoice::Invoice,
            crate::models::invoice::CheckoutResponse,
            crate::models::invoice::ReservationCheckout,
            crate::models::enums::InvoiceKind,
            // Upload
            crate::services::uploads::StoredFile,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Accounts and authentication"),
        (name = "properties", description = "Rental properties"),
        (name = "reservations", description = "Property reservations"),
        (name = "availability", description = "Property availability blocks"),
        (name = "auditoriums", description = "Cinema auditoriums"),
        (name = "movies", description = "Movies"),
        (name = "schedules", description = "Screenings"),
        (name = "tickets", description = "Single-screening tickets"),
        (name = "supertickets", description = "Multi-use passes"),
        (name = "transactions", description = "Balance and history"),
        (name = "invoices", description = "Invoices"),
        (name = "payment", description = "Stripe checkout and webhook"),
        (name = "services", description = "Rental services"),
        (name = "providers", description = "Service providers"),
        (name = "interventions", description = "Provider interventions"),
        (name = "upload", description = "File upload")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_core_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        for path in ["/tickets", "/supertickets/{id}/book", "/availability/check", "/api/payment/webhook"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
