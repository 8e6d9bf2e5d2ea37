pub mod txn;

use std::future::Future;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::state::app_state::AppState;

/// The store connection, or `StoreUnavailable` when none is configured.
/// Writes go through here.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::store_unavailable("database not configured"))
}

/// Run a read that may degrade. `Ok(None)` means the store is missing or
/// unreachable and the caller should serve its degraded result; any other
/// failure is returned as an error.
pub async fn degradable_read<'a, T, F, Fut>(
    db: Option<&'a DatabaseConnection>,
    read: F,
) -> Result<Option<T>, AppError>
where
    F: FnOnce(&'a DatabaseConnection) -> Fut,
    Fut: Future<Output = Result<T, DomainError>> + 'a,
{
    let Some(conn) = db else {
        return Ok(None);
    };
    match read(conn).await {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_store_unavailable() => {
            warn!(error = %e, "store unavailable; serving degraded read");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
