//! SeaORM adapter for notifications.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};
use time::OffsetDateTime;

use crate::entities::notifications;

#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationUpdate {
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

fn owned_by(user_id: &str) -> Select<notifications::Entity> {
    notifications::Entity::find().filter(notifications::Column::UserId.eq(user_id))
}

pub async fn page_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    unread_only: bool,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<notifications::Model>, u64), DbErr> {
    let mut query = owned_by(user_id);
    if unread_only {
        query = query.filter(notifications::Column::IsRead.eq(false));
    }
    let paginator = query
        .order_by_desc(notifications::Column::CreatedAt)
        .order_by_desc(notifications::Column::Id)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

pub async fn unread_count<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<u64, DbErr> {
    owned_by(user_id)
        .filter(notifications::Column::IsRead.eq(false))
        .count(conn)
        .await
}

pub async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<Option<notifications::Model>, DbErr> {
    owned_by(user_id)
        .filter(notifications::Column::Id.eq(id))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dto: NotificationCreate,
) -> Result<notifications::Model, DbErr> {
    notifications::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        message: Set(dto.message),
        kind: Set(dto.kind),
        is_read: Set(false),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    current: notifications::Model,
    dto: NotificationUpdate,
) -> Result<notifications::Model, DbErr> {
    let mut active = current.into_active_model();
    if let Some(v) = dto.title {
        active.title = Set(v);
    }
    if let Some(v) = dto.message {
        active.message = Set(v);
    }
    if let Some(v) = dto.is_read {
        active.is_read = Set(v);
    }
    active.update(conn).await
}

pub async fn mark_all_read<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<u64, DbErr> {
    let res = notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, Expr::value(true))
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<u64, DbErr> {
    let res = notifications::Entity::delete_many()
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
