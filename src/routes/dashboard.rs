//! Dashboard route: every metric for one account in a single response.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::models::metrics::DashboardMetrics;
use crate::models::params::AccountParams;
use crate::services::dashboard;
use crate::AppState;

/// GET /fetch-data?account_id=N — aggregated dashboard metrics.
pub async fn fetch_data(
    State(state): State<AppState>,
    params: Result<Query<AccountParams>, QueryRejection>,
) -> Result<Json<DashboardMetrics>, AppError> {
    let account_id = match params
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
        .and_then(|Query(params)| params.account_id())
    {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected metrics request");
            return Err(e);
        }
    };

    let metrics = dashboard::collect_for_account(&state.db, account_id).await?;
    tracing::info!(account_id, "Served dashboard metrics");
    Ok(Json(metrics))
}
