use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::session::SessionAuthority;
use crate::fallback::{EmptyFallback, FallbackProvider};

/// Shared resources handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the store is unreachable or not configured.
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub sessions: SessionAuthority,
    pub fallback: Arc<dyn FallbackProvider>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
        sessions: SessionAuthority,
        fallback: Arc<dyn FallbackProvider>,
    ) -> Self {
        Self {
            db,
            security,
            sessions,
            fallback,
        }
    }

    /// State without a store: every read is degraded, every write fails.
    pub fn without_db(security: SecurityConfig, sessions: SessionAuthority) -> Self {
        Self::new(None, security, sessions, Arc::new(EmptyFallback))
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn has_db(&self) -> bool {
        self.db.is_some()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
