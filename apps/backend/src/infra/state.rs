use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::auth::credentials::{normalize_email, CredentialStore};
use crate::auth::password::hash_password;
use crate::auth::{DbCredentialStore, SessionAuthority, StaticCredentialStore};
use crate::config::db::DbKind;
use crate::config::{CredentialSource, DemoUser};
use crate::error::AppError;
use crate::fallback::{EmptyFallback, FallbackProvider};
use crate::infra::db::connect_db;
use crate::infra::schema_guard::ensure_schema;
use crate::logging::Redacted;
use crate::repos::users::{self, UserCreate};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbSource {
    None,
    Connect(DbKind),
    Existing(DatabaseConnection),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: Option<SecurityConfig>,
    db: DbSource,
    allow_degraded: bool,
    credential_source: CredentialSource,
    demo_user: DemoUser,
    fallback: Arc<dyn FallbackProvider>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: None,
            db: DbSource::None,
            allow_degraded: false,
            credential_source: CredentialSource::Static,
            demo_user: DemoUser::default(),
            fallback: Arc::new(EmptyFallback),
        }
    }

    /// Connect to `kind` and bring the schema up to date during `build`.
    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db = DbSource::Connect(kind);
        self
    }

    /// Use an already open connection; the schema is still ensured.
    pub fn with_connection(mut self, conn: DatabaseConnection) -> Self {
        self.db = DbSource::Existing(conn);
        self
    }

    /// Start without a store instead of failing when it cannot be reached.
    pub fn allow_degraded_start(mut self, allow: bool) -> Self {
        self.allow_degraded = allow;
        self
    }

    /// Required: `build` refuses to sign sessions with an implicit key.
    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_credential_store(mut self, source: CredentialSource) -> Self {
        self.credential_source = source;
        self
    }

    pub fn with_demo_user(mut self, demo_user: DemoUser) -> Self {
        self.demo_user = demo_user;
        self
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    async fn open(
        source: DbSource,
        allow_degraded: bool,
    ) -> Result<Option<DatabaseConnection>, AppError> {
        let attempt = match source {
            DbSource::None => return Ok(None),
            DbSource::Existing(conn) => ensure_schema(&conn).await.map(|_| conn),
            DbSource::Connect(kind) => match connect_db(&kind).await {
                Ok(conn) => ensure_schema(&conn).await.map(|_| conn),
                Err(e) => Err(e),
            },
        };

        match attempt {
            Ok(conn) => Ok(Some(conn)),
            Err(e) if allow_degraded => {
                warn!(error = %e, "store unreachable at startup; running degraded");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn credential_store(
        source: CredentialSource,
        demo: &DemoUser,
        security: &SecurityConfig,
        db: Option<&DatabaseConnection>,
    ) -> Result<Arc<dyn CredentialStore>, AppError> {
        match source {
            CredentialSource::Static => Ok(Arc::new(StaticCredentialStore::new(
                demo.identity(),
                &demo.password,
                security.password_cost,
            )?)),
            CredentialSource::Database => {
                if let Some(conn) = db {
                    let seeded = users::ensure(
                        conn,
                        UserCreate {
                            id: demo.id.clone(),
                            email: normalize_email(&demo.email),
                            name: demo.name.clone(),
                            password_hash: hash_password(&demo.password, security.password_cost)?,
                        },
                    )
                    .await?;
                    if seeded {
                        info!(email = %Redacted(&demo.email), "seeded demo account");
                    }
                }
                Ok(Arc::new(DbCredentialStore::new(db.cloned())))
            }
        }
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("state built without a security config"))?;
        let db = Self::open(self.db, self.allow_degraded).await?;
        let store = Self::credential_store(
            self.credential_source,
            &self.demo_user,
            &security,
            db.as_ref(),
        )
        .await?;
        let sessions = SessionAuthority::new(security.clone(), store);
        Ok(AppState::new(db, security, sessions, self.fallback))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
