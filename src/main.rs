//! Studio Booking Backend
//!
//! REST backend for browsing recording studios and reserving hourly slots.

mod api;
mod availability;
mod booking;
mod catalog;
mod config;
mod db;
mod errors;
mod geo;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog::Catalog;
use config::Config;
use db::BookingStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn BookingStore>,
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

    tracing::info!("Starting Studio Booking Backend");
    tracing::info!("Booking store: {:?}", config.store);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Load the studio catalog
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    match &config.catalog_path {
        Some(path) => tracing::info!(
            "Loaded {} studios from {:?}",
            catalog.studios().len(),
            path
        ),
        None => tracing::info!(
            "Loaded {} studios from embedded catalog",
            catalog.studios().len()
        ),
    }

    // Open the booking store
    let store = db::open_store(&config).await?;
    let existing = store.list_all().await?;
    tracing::info!("Booking store holds {} bookings", existing.len());

    let state = AppState {
        catalog: Arc::new(catalog),
        store,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/studios", get(api::list_studios))
        .route("/studios/suggestions", get(api::location_suggestions))
        .route("/studios/nearby", get(api::nearby_studios))
        .route("/studios/{id}", get(api::get_studio))
        .route("/studios/{id}/availability", get(api::studio_availability))
        // Bookings
        .route("/bookings", get(api::list_bookings))
        .route("/bookings", post(api::create_booking));

    // Health check
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
