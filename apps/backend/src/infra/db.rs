use std::future::Future;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_INTERVAL: Duration = Duration::from_millis(500);

fn engine(kind: &DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry `connect_fn` a fixed number of times and return the last result.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %e, "connection_retry=failed");
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open a pool for `kind`. Does not touch the schema.
pub async fn connect_db(kind: &DbKind) -> Result<DatabaseConnection, AppError> {
    connect_db_url(kind, db_url(kind)?).await
}

/// Open a pool for `kind` at an explicit URL, with that backend's pool sizing.
pub async fn connect_db_url(kind: &DbKind, url: String) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        // Every connection to `sqlite::memory:` is its own database.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(16);
        }
    }

    let conn = retry_connection(
        || {
            let opts = opts.clone();
            async move {
                Database::connect(opts)
                    .await
                    .map_err(|e| AppError::store_unavailable(format!("connect failed: {e}")))
            }
        },
        CONNECT_ATTEMPTS,
        CONNECT_INTERVAL,
    )
    .await?;

    info!(engine = engine(kind), "database connected");
    Ok(conn)
}
