//! SeaORM adapter for the `users` credential table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::users;

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl UserCreate {
    fn into_active(self) -> users::ActiveModel {
        users::ActiveModel {
            id: Set(self.id),
            email: Set(self.email),
            name: Set(self.name),
            password_hash: Set(self.password_hash),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
    }
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id.to_owned()).one(conn).await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, dto: UserCreate) -> Result<users::Model, DbErr> {
    dto.into_active().insert(conn).await
}

/// Insert unless a row with the same id exists. Returns whether a row was written.
pub async fn insert_if_absent<C: ConnectionTrait>(
    conn: &C,
    dto: UserCreate,
) -> Result<bool, DbErr> {
    let rows = users::Entity::insert(dto.into_active())
        .on_conflict(OnConflict::column(users::Column::Id).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;
    Ok(rows == 1)
}
