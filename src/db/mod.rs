//! Per-request database connections.
//!
//! The store is owned by another system, so nothing here is pooled: every
//! request opens its own connection and tears it down before responding.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use crate::errors::AppError;

/// Open a fresh, unpooled connection to the configured store.
pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection, AppError> {
    options.connect().await.map_err(AppError::Connection)
}

/// Gracefully terminate a connection. Failures are logged and swallowed.
///
/// A connection dropped without reaching this point (e.g. the request was
/// cancelled) still has its socket closed by `Drop`.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close database connection");
    }
}

/// Connectivity probe: connect, `SELECT 1`, disconnect.
pub async fn ping(options: &PgConnectOptions) -> Result<(), AppError> {
    let mut conn = connect(options).await?;
    let result = sqlx::query("SELECT 1")
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(|source| AppError::Query {
            metric: "ping",
            source,
        });
    close(conn).await;
    result
}
