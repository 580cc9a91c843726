//! Bounded waits on backing stores.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;
use crate::result::AppResult;

/// Run `fut`, failing with `StoreUnavailable` if it does not finish within `limit`.
pub async fn bounded<T, F>(limit: Duration, store: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store_unavailable(format!(
            "{store} did not respond within {}ms",
            limit.as_millis()
        ))),
    }
}
