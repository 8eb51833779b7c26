//! Marketplace Server
//!
//! Property rentals and cinema booking over a REST API.

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use marketplace_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::{revocation::RedisRevocationStore, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Marketplace Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let revocations = RedisRevocationStore::new(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    tracing::info!("Connected to Redis");

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config, Arc::new(revocations));
    services
        .users
        .ensure_admin()
        .await
        .context("Failed to create administrator account")?;

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Console output (pretty or JSON) plus an optional daily-rolling file
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("marketplace_server={},tower_http=debug", logging.level).into()
    });

    let console = if logging.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let path = std::path::Path::new(path);
            let directory = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "marketplace.log".to_string());
            let appender = tracing_appender::rolling::daily(directory, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.upload.max_bytes;
    let upload_dir = state.config.upload.directory.clone();
    let public_path = state.config.upload.public_path.clone();

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Users
        .route("/users/login", post(api::users::login))
        .route("/users/logout", post(api::users::logout))
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route(
            "/users/:id",
            get(api::users::get_user)
                .patch(api::users::update_user)
                .delete(api::users::delete_user),
        )
        // Properties
        .route(
            "/properties",
            get(api::properties::list_properties).post(api::properties::create_property),
        )
        .route(
            "/properties/:id",
            get(api::properties::get_property)
                .patch(api::properties::update_property)
                .delete(api::properties::delete_property),
        )
        // Reservations
        .route(
            "/reservations",
            get(api::reservations::list_reservations).post(api::reservations::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(api::reservations::get_reservation)
                .patch(api::reservations::update_reservation)
                .delete(api::reservations::delete_reservation),
        )
        // Availability
        .route(
            "/availability",
            get(api::availability::list_availability).post(api::availability::create_availability),
        )
        .route("/availability/check", get(api::availability::check_availability))
        .route(
            "/availability/:id",
            get(api::availability::get_availability)
                .patch(api::availability::update_availability)
                .delete(api::availability::delete_availability),
        )
        // Auditoriums
        .route(
            "/auditoriums",
            get(api::auditoriums::list_auditoriums).post(api::auditoriums::create_auditorium),
        )
        .route(
            "/auditoriums/:id",
            get(api::auditoriums::get_auditorium)
                .patch(api::auditoriums::update_auditorium)
                .delete(api::auditoriums::delete_auditorium),
        )
        // Movies
        .route("/movies", get(api::movies::list_movies).post(api::movies::create_movie))
        .route(
            "/movies/:id",
            get(api::movies::get_movie)
                .patch(api::movies::update_movie)
                .delete(api::movies::delete_movie),
        )
        // Schedules
        .route(
            "/schedules",
            get(api::schedules::list_schedules).post(api::schedules::create_schedule),
        )
        .route(
            "/schedules/:id",
            get(api::schedules::get_schedule)
                .patch(api::schedules::update_schedule)
                .delete(api::schedules::delete_schedule),
        )
        // Tickets
        .route("/tickets", get(api::tickets::list_tickets).post(api::tickets::purchase_ticket))
        .route(
            "/tickets/:id",
            get(api::tickets::get_ticket).delete(api::tickets::delete_ticket),
        )
        .route("/tickets/:id/validate", post(api::tickets::validate_ticket))
        // Super-tickets
        .route(
            "/supertickets",
            get(api::supertickets::list_super_tickets).post(api::supertickets::purchase_super_ticket),
        )
        .route(
            "/supertickets/:id",
            get(api::supertickets::get_super_ticket).delete(api::supertickets::delete_super_ticket),
        )
        .route("/supertickets/:id/book", post(api::supertickets::book_super_ticket))
        .route("/supertickets/:id/validate", post(api::supertickets::validate_super_ticket))
        // Transactions
        .route("/transactions", get(api::transactions::list_transactions))
        .route("/transactions/deposit", post(api::transactions::deposit))
        .route("/transactions/withdraw", post(api::transactions::withdraw))
        .route("/transactions/balance", get(api::transactions::balance))
        // Invoices
        .route("/invoices", get(api::invoices::list_invoices))
        .route(
            "/invoices/:id",
            get(api::invoices::get_invoice).delete(api::invoices::delete_invoice),
        )
        // Rental services, providers, interventions
        .route("/services", get(api::services::list_services).post(api::services::create_service))
        .route(
            "/services/:id",
            get(api::services::get_service)
                .patch(api::services::update_service)
                .delete(api::services::delete_service),
        )
        .route(
            "/providers",
            get(api::providers::list_providers).post(api::providers::create_provider),
        )
        .route(
            "/providers/:id",
            get(api::providers::get_provider)
                .patch(api::providers::update_provider)
                .delete(api::providers::delete_provider),
        )
        .route(
            "/interventions",
            get(api::interventions::list_interventions).post(api::interventions::create_intervention),
        )
        .route(
            "/interventions/:id",
            get(api::interventions::get_intervention)
                .patch(api::interventions::update_intervention)
                .delete(api::interventions::delete_intervention),
        )
        // Upload
        .route(
            "/upload",
            post(api::upload::upload_files).layer(DefaultBodyLimit::max(upload_limit + 64 * 1024)),
        )
        .with_state(state.clone());

    let payment = Router::new()
        .route("/membership", post(api::payment::membership_checkout))
        .route("/reservation", post(api::payment::reservation_checkout))
        .route("/webhook", post(api::payment::stripe_webhook))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .nest("/api/payment", payment)
        .nest_service(&public_path, ServeDir::new(upload_dir))
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
