//! SeaORM adapter for profiles.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::profiles;

#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub user_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// `None` leaves a column untouched; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub country: Option<Option<String>>,
}

pub async fn find_by_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dto: ProfileCreate,
) -> Result<profiles::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    profiles::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(dto.user_id),
        full_name: Set(dto.full_name),
        phone: Set(dto.phone),
        address: Set(dto.address),
        city: Set(dto.city),
        country: Set(dto.country),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    current: profiles::Model,
    dto: ProfileUpdate,
) -> Result<profiles::Model, DbErr> {
    let mut active = current.into_active_model();
    if let Some(v) = dto.full_name {
        active.full_name = Set(v);
    }
    if let Some(v) = dto.phone {
        active.phone = Set(v);
    }
    if let Some(v) = dto.address {
        active.address = Set(v);
    }
    if let Some(v) = dto.city {
        active.city = Set(v);
    }
    if let Some(v) = dto.country {
        active.country = Set(v);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_by_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<u64, DbErr> {
    let res = profiles::Entity::delete_many()
        .filter(profiles::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
