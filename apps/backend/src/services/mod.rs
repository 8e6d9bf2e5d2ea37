//! Request-level operations: validation, ownership scoping and the
//! degraded-store policy. Handlers call these; these call repos.

pub mod events;
pub mod exchange_rates;
pub mod knowledge;
pub mod notifications;
pub mod profiles;
pub mod shares;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// A required text field: present and not blank after trimming.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("{field} is required"),
        )),
    }
}

/// Blank optional text is stored as NULL.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
