//! SeaORM -> DomainError translation.
//!
//! Adapters convert `sea_orm::DbErr` here; higher layers map `DomainError`
//! to `AppError` via `From`.

use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// SQLite lock contention (SQLITE_BUSY and its extended codes) or a
/// Postgres serialization failure or deadlock.
fn is_write_contention(msg: &str) -> bool {
    msg.contains("database is locked")
        || msg.contains("(code: 5)")
        || msg.contains("(code: 517)")
        || mentions_sqlstate(msg, "40001")
        || mentions_sqlstate(msg, "40P01")
}

/// First `table.column` from a SQLite "UNIQUE constraint failed: ..." message.
fn sqlite_unique_target(msg: &str) -> Option<&str> {
    const PREFIX: &str = "UNIQUE constraint failed: ";
    let start = msg.find(PREFIX)? + PREFIX.len();
    msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

/// Unique indexes with a domain meaning, by SQLite column or Postgres index name.
fn unique_conflict(msg: &str) -> Option<(ConflictKind, &'static str)> {
    let target = sqlite_unique_target(msg);
    let hit = |column: &str, index: &str| target == Some(column) || msg.contains(index);

    if hit("event_registrations.event_id", "idx_event_registrations_event_user_unique") {
        return Some((
            ConflictKind::AlreadyRegistered,
            "Already registered for this event",
        ));
    }
    if hit("profiles.user_id", "idx_profiles_user_id_unique") {
        return Some((ConflictKind::ProfileExists, "Profile already exists"));
    }
    if hit("users.email", "idx_users_email_unique") {
        return Some((ConflictKind::UniqueEmail, "Email already registered"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let is_unique = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed");

    if is_unique {
        warn!(
            trace_id = %trace_id,
            raw_error = %Redacted(&error_msg),
            "Unique constraint violation"
        );
        if let Some((kind, detail)) = unique_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        || mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(
            trace_id = %trace_id,
            raw_error = %Redacted(&error_msg),
            "Foreign key constraint violation"
        );
        return DomainError::validation("Referenced record does not exist");
    }

    if is_write_contention(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database busy");
        return DomainError::infra(InfraErrorKind::Busy, "Database busy");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
