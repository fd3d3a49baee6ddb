//! # Routine API
//!
//! HTTP surface for building a department's weekly class timetable. Clients
//! submit slots for a cohort (department and semester); every write goes
//! through the conflict and validation engine in `routine-core`.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into `RoutineService` calls
//! - **Middleware**: Error mapping to HTTP responses
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use eyre::{Result, WrapErr};
use routine_core::{catalog::Catalog, repository::RoutineRepository, service::RoutineService};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Timetable operations over the configured repository
    pub service: RoutineService,
}

impl ApiState {
    pub fn new(repository: Arc<dyn RoutineRepository>, catalog: Catalog) -> Self {
        Self {
            service: RoutineService::new(repository, Arc::new(catalog)),
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Timetable endpoints
        .merge(routes::routine::routes())
        // Conflict lookups
        .merge(routes::conflict::routes())
        // Free rooms and teachers
        .merge(routes::availability::routes())
        // Reference data
        .merge(routes::catalog::routes())
        .with_state(state)
}

/// Loads the catalog named in the configuration, or the built-in one.
pub fn load_catalog(config: &config::ApiConfig) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
}

/// Starts the API server with the provided configuration and repository
pub async fn start_server(
    config: config::ApiConfig,
    repository: Arc<dyn RoutineRepository>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.storage == config::StorageBackend::Memory {
        warn!("No DATABASE_URL or ROUTINE_STORE_PATH set; routines will not outlive this process");
    }

    let catalog = load_catalog(&config).wrap_err("Failed to load catalog")?;
    info!(
        departments = catalog.departments.len(),
        periods = catalog.time_slots().len(),
        "catalog loaded"
    );

    let state = Arc::new(ApiState::new(repository, catalog));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .allow_origin(allowed);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
