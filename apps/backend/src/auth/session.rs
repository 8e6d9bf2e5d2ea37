//! Session issue and validation.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, warn};

use super::credentials::{normalize_email, CredentialStore, Identity};
use super::jwt::{mint_session_token, verify_session_token};
use crate::logging::Redacted;
use crate::state::security_config::SecurityConfig;

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Missing,
    Malformed,
    BadSignature,
    Expired,
    UnknownSubject,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenRejection::Missing => "missing",
            TokenRejection::Malformed => "malformed",
            TokenRejection::BadSignature => "bad signature",
            TokenRejection::Expired => "expired",
            TokenRejection::UnknownSubject => "unknown subject",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid session token: {0}")]
    InvalidToken(TokenRejection),
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("failed to issue session token: {0}")]
    Issue(String),
}

/// Turns credentials into tokens and tokens back into identities.
#[derive(Clone)]
pub struct SessionAuthority {
    security: SecurityConfig,
    store: Arc<dyn CredentialStore>,
}

impl SessionAuthority {
    pub fn new(security: SecurityConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self { security, store }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        let credential = self
            .store
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;

        match credential {
            Some(c) if self.store.verify_password(&c, password) => Ok(c.identity),
            _ => {
                debug!(email = %Redacted(&email), "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub fn issue_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_token_at(identity, SystemTime::now())
    }

    pub fn issue_token_at(
        &self,
        identity: &Identity,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        mint_session_token(identity, now, &self.security)
    }

    /// Resolve a token to its identity. When the credential store cannot be
    /// reached, a token with a valid signature and expiry still resolves to
    /// the identity it carries.
    pub async fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = verify_session_token(token, &self.security)?;

        match self.store.find_by_id(&claims.sub).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(AuthError::InvalidToken(TokenRejection::UnknownSubject)),
            Err(e) if e.is_store_unavailable() => {
                warn!(
                    sub = %claims.sub,
                    error = %e,
                    "credential store unavailable; trusting signed claims"
                );
                Ok(Identity {
                    id: claims.sub,
                    email: claims.email,
                    name: claims.name,
                })
            }
            Err(e) => Err(AuthError::StoreUnavailable(e.to_string())),
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }
}
