//! Credential lookup behind one trait so the session authority does not
//! care whether accounts live in configuration or in the `users` table.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use super::password::{self, PasswordCost};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::users;

/// The authenticated subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// An identity together with its password hash (PHC string).
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub identity: Identity,
    pub password_hash: String,
}

/// Emails compare trimmed and case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `email` is already normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError>;

    fn verify_password(&self, credential: &StoredCredential, password: &str) -> bool {
        password::verify_password(&credential.password_hash, password)
    }
}

/// Exactly one configured account.
pub struct StaticCredentialStore {
    credential: StoredCredential,
}

impl StaticCredentialStore {
    pub fn new(identity: Identity, password: &str, cost: PasswordCost) -> Result<Self, AppError> {
        let password_hash = password::hash_password(password, cost)?;
        let identity = Identity {
            email: normalize_email(&identity.email),
            ..identity
        };
        Ok(Self {
            credential: StoredCredential {
                identity,
                password_hash,
            },
        })
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, DomainError> {
        Ok((self.credential.identity.email == email).then(|| self.credential.clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        Ok((self.credential.identity.id == id).then(|| self.credential.identity.clone()))
    }
}

/// Accounts from the `users` table.
pub struct DbCredentialStore {
    db: Option<DatabaseConnection>,
}

impl DbCredentialStore {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn conn(&self) -> Result<&DatabaseConnection, DomainError> {
        self.db.as_ref().ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DbUnavailable, "credential store not connected")
        })
    }
}

#[async_trait]
impl CredentialStore for DbCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, DomainError> {
        let user = users::find_by_email(self.conn()?, email).await?;
        Ok(user.map(|u| StoredCredential {
            identity: Identity {
                id: u.id,
                email: u.email,
                name: u.name,
            },
            password_hash: u.password_hash,
        }))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        let user = users::find_by_id(self.conn()?, id).await?;
        Ok(user.map(|u| Identity {
            id: u.id,
            email: u.email,
            name: u.name,
        }))
    }
}
