use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::profiles_sea as profiles_adapter;
pub use crate::adapters::profiles_sea::{ProfileCreate, ProfileUpdate};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn find_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Option<Profile>, DomainError> {
    Ok(profiles_adapter::find_by_user(conn, user_id)
        .await?
        .map(Profile::from))
}

/// Unique on `user_id`: a second profile is a `ProfileExists` conflict.
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    dto: ProfileCreate,
) -> Result<Profile, DomainError> {
    Ok(Profile::from(profiles_adapter::insert(conn, dto).await?))
}

pub async fn update_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    dto: ProfileUpdate,
) -> Result<Profile, DomainError> {
    let current = profiles_adapter::find_by_user(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Profile, "Profile not found"))?;
    Ok(Profile::from(profiles_adapter::update(conn, current, dto).await?))
}

pub async fn delete_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<(), DomainError> {
    match profiles_adapter::delete_by_user(conn, user_id).await? {
        0 => Err(DomainError::not_found(NotFoundKind::Profile, "Profile not found")),
        _ => Ok(()),
    }
}

impl From<crate::entities::profiles::Model> for Profile {
    fn from(m: crate::entities::profiles::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            full_name: m.full_name,
            phone: m.phone,
            address: m.address,
            city: m.city,
            country: m.country,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
