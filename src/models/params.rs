//! Query-string parameters accepted by the metrics endpoint.

use serde::Deserialize;

use crate::errors::AppError;

/// Account used when the caller does not name one.
pub const DEFAULT_ACCOUNT_ID: i64 = 1;

/// Raw `?account_id=` parameter. Kept as a string so that a malformed value
/// is reported through [`AppError`] rather than the extractor's rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountParams {
    pub account_id: Option<String>,
}

impl AccountParams {
    /// Resolve the account identifier, defaulting when absent.
    pub fn account_id(&self) -> Result<i64, AppError> {
        match self.account_id.as_deref() {
            None => Ok(DEFAULT_ACCOUNT_ID),
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                AppError::Validation(format!("account_id must be an integer, got {raw:?}"))
            }),
        }
    }
}
