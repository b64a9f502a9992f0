pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::postgres::PgConnectOptions;

/// Shared application state passed to all Axum handlers.
///
/// Only connection parameters are shared; each request opens its own
/// connection from them.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgConnectOptions,
}
