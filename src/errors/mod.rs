//! Unified error handling with a flat `{"error": "..."}` response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query {metric} failed: {source}")]
    Query {
        metric: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Connection(e) => {
                tracing::error!(error = %e, "Database connection error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to connect to database".to_string(),
                )
            }
            AppError::Query { metric, source } => {
                tracing::error!(error = %source, metric = *metric, "Database query error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch data".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request() {
        let response =
            AppError::Validation("account_id must be an integer".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "account_id must be an integer" }));
    }

    #[tokio::test]
    async fn query_failure_hides_cause() {
        let err = AppError::Query {
            metric: "tabela4",
            source: sqlx::Error::RowNotFound,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to fetch data");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn connection_failure_is_generic() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let response = AppError::Connection(sqlx::Error::Io(refused)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to connect to database");
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Query {
            metric: "tabela7",
            source: sqlx::Error::RowNotFound,
        };
        assert!(err.to_string().starts_with("Query tabela7 failed:"));
    }
}
