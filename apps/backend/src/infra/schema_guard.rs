//! Idempotent schema setup.
//!
//! Every table and index is created `IF NOT EXISTS`. On PostgreSQL the
//! migrator additionally runs inside a transaction that holds a
//! transaction-scoped advisory lock, so concurrent processes serialize and
//! the later one finds nothing left to apply.

use migration::{count_applied_migrations, Migrator, MigratorTrait};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement, TransactionTrait,
};
use tracing::info;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::AppError;

const SCHEMA_LOCK_KEY: &str = "portal-backend:schema";

pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Apply all pending migrations. Safe to call repeatedly and concurrently.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => {
            let txn = db.begin().await?;
            txn.execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT pg_advisory_xact_lock($1)",
                vec![pg_lock_id(SCHEMA_LOCK_KEY).into()],
            ))
            .await?;
            Migrator::up(&txn, None).await?;
            txn.commit().await?;
        }
        _ => {
            Migrator::up(db, None).await?;
        }
    }

    let applied = count_applied_migrations(db).await?;
    info!(applied, "schema ready");
    Ok(())
}
