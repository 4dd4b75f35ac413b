//! Route definitions for the Crop Yield Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Prediction routes
        .nest("/predictions", prediction_routes())
        // Model lifecycle routes
        .nest("/model", model_routes())
        // Economic analysis routes
        .nest("/economics", economics_routes())
}

/// Yield prediction and prediction-history routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_predictions).post(handlers::create_prediction),
        )
        .route("/stats", get(handlers::get_yield_stats))
}

/// Model training and status routes
fn model_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_model_status))
        .route("/train", post(handlers::train_model))
}

/// Economic analysis routes
fn economics_routes() -> Router<AppState> {
    Router::new()
        .route("/roi", post(handlers::calculate_roi))
        .route("/fertilizer", post(handlers::optimize_fertilizer))
        .route("/water-efficiency", post(handlers::water_efficiency))
}
