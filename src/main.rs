//! Hostel Accommodation Backend
//!
//! Serves the hostel catalog, room availability over a persisted occupancy
//! snapshot, and the student application workflow.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod inventory;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
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

    tracing::info!("Starting Hostel Accommodation Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (HOSTEL_API_PSK). Admin routes are unprotected!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Seed the occupancy snapshot on first start
    let seeded = repo.seed_rooms(config.occupancy_seed).await?;
    if seeded > 0 {
        tracing::info!(
            rooms = seeded,
            seed = ?config.occupancy_seed,
            "Generated occupancy snapshot"
        );
    } else {
        tracing::info!("Using existing occupancy snapshot");
    }

    let state = AppState {
        repo,
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
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    // Admin routes
    let admin_routes = Router::new()
        .route("/applications", get(api::list_applications))
        .route("/applications/{id}/status", put(api::review_application))
        .route("/stats", get(api::get_dashboard_stats))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(psk.clone(), req, next)
        }));

    // Student-facing routes
    let api_routes = Router::new()
        // Catalog
        .route("/hostels", get(api::list_hostels))
        .route("/hostels/{id}", get(api::get_hostel))
        // Rooms
        .route("/rooms/available", get(api::list_available_rooms))
        .route("/rooms/{id}", get(api::get_room))
        // Applications
        .route("/applications", post(api::submit_application))
        .route("/applications/{id}", get(api::get_application))
        .nest("/admin", admin_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
