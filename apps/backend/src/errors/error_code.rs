//! Error codes for the portal backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the portal backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Email/password pair did not match a known account
    InvalidCredentials,
    /// Session token missing, malformed, expired or unknown
    InvalidToken,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Login request without email or password
    MissingCredentials,
    /// Pagination parameters out of range
    InvalidPagination,

    // Resource Not Found (also used for records owned by someone else)
    /// General not found error
    NotFound,
    /// User not found
    UserNotFound,
    /// Profile not found
    ProfileNotFound,
    /// Share holding not found
    ShareNotFound,
    /// Notification not found
    NotificationNotFound,
    /// Event not found
    EventNotFound,
    /// No registration exists for this event and user
    NotRegistered,
    /// Exchange rate not found
    ExchangeRateNotFound,
    /// Knowledge base entry not found
    KnowledgeEntryNotFound,

    // Conflicts
    /// Generic conflict
    Conflict,
    /// User is already registered for the event
    AlreadyRegistered,
    /// Event has reached its capacity
    EventFull,
    /// A profile already exists for this user
    ProfileExists,
    /// Email already registered
    UniqueEmail,

    // System Errors
    /// Backing store unreachable or not configured
    StoreUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Stored data could not be interpreted
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidPagination => "INVALID_PAGINATION",

            Self::NotFound => "NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::ShareNotFound => "SHARE_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::NotRegistered => "NOT_REGISTERED",
            Self::ExchangeRateNotFound => "EXCHANGE_RATE_NOT_FOUND",
            Self::KnowledgeEntryNotFound => "KNOWLEDGE_ENTRY_NOT_FOUND",

            Self::Conflict => "CONFLICT",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::EventFull => "EVENT_FULL",
            Self::ProfileExists => "PROFILE_EXISTS",
            Self::UniqueEmail => "UNIQUE_EMAIL",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::InvalidCredentials,
        Self::InvalidToken,
        Self::ValidationError,
        Self::BadRequest,
        Self::MissingCredentials,
        Self::InvalidPagination,
        Self::NotFound,
        Self::UserNotFound,
        Self::ProfileNotFound,
        Self::ShareNotFound,
        Self::NotificationNotFound,
        Self::EventNotFound,
        Self::NotRegistered,
        Self::ExchangeRateNotFound,
        Self::KnowledgeEntryNotFound,
        Self::Conflict,
        Self::AlreadyRegistered,
        Self::EventFull,
        Self::ProfileExists,
        Self::UniqueEmail,
        Self::StoreUnavailable,
        Self::Internal,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
