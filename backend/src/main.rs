//! Crop Yield Platform - Backend Server
//!
//! Estimates crop yield from environmental and input features through a
//! trained tree ensemble (with a rule-based fallback), and keeps a relational
//! log of every prediction for the dashboard and analytics.

use axum::{routing::get, Router};
use shared::ml::{load_artifact, ModelHandle, YieldModel};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub model: ModelHandle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cyp_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Yield Platform Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Load the persisted model artifact; a missing or unreadable artifact
    // leaves the server in fallback mode until a retrain completes
    let model = load_startup_model(&config.model.artifact_path);

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        model,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the model artifact written by the last successful training run
fn load_startup_model(artifact_path: &str) -> ModelHandle {
    match load_artifact(Path::new(artifact_path)) {
        Ok(Some(trained)) => {
            tracing::info!(
                path = artifact_path,
                r_squared = trained.metrics.r_squared,
                "Loaded trained model artifact"
            );
            ModelHandle::new(YieldModel::Trained(trained))
        }
        Ok(None) => {
            tracing::info!(
                path = artifact_path,
                "No model artifact found; predictions use the rule-based fallback"
            );
            ModelHandle::new(YieldModel::Untrained)
        }
        Err(err) => {
            tracing::warn!(
                path = artifact_path,
                error = %err,
                "Failed to load model artifact; predictions use the rule-based fallback"
            );
            ModelHandle::new(YieldModel::Untrained)
        }
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Yield Platform API v1.0"
}
