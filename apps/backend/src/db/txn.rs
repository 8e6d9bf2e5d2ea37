use std::time::Duration;

use futures_util::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::errors::domain::DomainError;

const BUSY_MAX_ATTEMPTS: u32 = 6;
const BUSY_INITIAL_RETRY_DELAY_MS: u64 = 10;
const BUSY_MAX_RETRY_DELAY_MS: u64 = 200;

/// Run `f` in a transaction: commit on `Ok`, roll back on `Err`.
///
/// ```ignore
/// with_txn(db, |txn| Box::pin(async move { repos::events::register(txn, id, user).await })).await
/// ```
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    R: Send,
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, DomainError>> + Send,
{
    let txn = db.begin().await?;
    match f(&txn).await {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            // Best-effort rollback; the original error wins.
            if let Err(rollback) = txn.rollback().await {
                warn!(error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

/// [`with_txn`] that reruns `f` in a fresh transaction while the store
/// reports write contention. `f` must be safe to run more than once.
pub async fn with_txn_retry<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    R: Send,
    F: for<'a> Fn(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, DomainError>> + Send + Sync,
{
    let mut attempt = 1;
    loop {
        match with_txn(db, &f).await {
            Err(err) if err.is_busy() && attempt < BUSY_MAX_ATTEMPTS => {
                let delay_ms = BUSY_INITIAL_RETRY_DELAY_MS
                    .saturating_mul(2_u64.pow(attempt - 1))
                    .min(BUSY_MAX_RETRY_DELAY_MS);
                debug!(attempt, retry_delay_ms = delay_ms, "store busy, rerunning transaction");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
            out => return out,
        }
    }
}
