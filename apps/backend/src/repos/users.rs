//! User repository (credential table).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
pub use crate::adapters::users_sea::UserCreate;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_email(conn, email).await?.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_id(conn, id).await?.map(User::from))
}

pub async fn create<C: ConnectionTrait>(conn: &C, dto: UserCreate) -> Result<User, DomainError> {
    Ok(User::from(users_adapter::insert(conn, dto).await?))
}

pub async fn ensure<C: ConnectionTrait>(conn: &C, dto: UserCreate) -> Result<bool, DomainError> {
    Ok(users_adapter::insert_if_absent(conn, dto).await?)
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
