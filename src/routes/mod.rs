//! Route definitions for the dashboard metrics API.

pub mod dashboard;
pub mod health;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full router. Cross-origin requests are allowed from anywhere.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/fetch-data", get(dashboard::fetch_data))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
