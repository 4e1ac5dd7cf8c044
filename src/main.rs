//! Team Roster Backend
//!
//! A small REST backend for team member records, persisted in SQLite or a flat JSON file.

mod api;
mod config;
mod errors;
mod models;
mod storage;
mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use storage::MemberStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MemberStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Team Roster Backend");
    tracing::info!("Storage backend: {:?}", config.storage);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Data file: {:?}", config.data_file);
    tracing::info!("Allowed origin: {:?}", config.cors_origin);

    // Create schema or initialize the data file
    let store = storage::open_store(&config).await?;

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Wildcard methods/headers cannot be combined with credentials, so mirror the request.
    // A list origin only answers requests that carry the configured origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config.cors_origin.clone()]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route(
            "/team-members",
            get(api::list_members).post(api::create_member),
        )
        .route(
            "/team-members/{id}",
            get(api::get_member)
                .put(api::update_member)
                .delete(api::delete_member),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
