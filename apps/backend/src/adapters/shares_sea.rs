//! SeaORM adapter for share holdings. Every query is scoped by `user_id`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::shares;

#[derive(Debug, Clone)]
pub struct ShareCreate {
    pub user_id: String,
    pub share_type: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub certificate_number: Option<String>,
    pub acquired_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct ShareUpdate {
    pub share_type: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub certificate_number: Option<Option<String>>,
    pub acquired_at: Option<OffsetDateTime>,
}

fn owned_by(user_id: &str) -> sea_orm::Select<shares::Entity> {
    shares::Entity::find().filter(shares::Column::UserId.eq(user_id))
}

pub async fn page_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<shares::Model>, u64), DbErr> {
    let paginator = owned_by(user_id)
        .order_by_desc(shares::Column::AcquiredAt)
        .order_by_asc(shares::Column::Id)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

pub async fn all_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<shares::Model>, DbErr> {
    owned_by(user_id)
        .order_by_asc(shares::Column::ShareType)
        .all(conn)
        .await
}

pub async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<Option<shares::Model>, DbErr> {
    owned_by(user_id)
        .filter(shares::Column::Id.eq(id))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dto: ShareCreate,
) -> Result<shares::Model, DbErr> {
    shares::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(dto.user_id),
        share_type: Set(dto.share_type),
        quantity: Set(dto.quantity),
        unit_price: Set(dto.unit_price),
        certificate_number: Set(dto.certificate_number),
        acquired_at: Set(dto.acquired_at),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    current: shares::Model,
    dto: ShareUpdate,
) -> Result<shares::Model, DbErr> {
    let mut active = current.into_active_model();
    if let Some(v) = dto.share_type {
        active.share_type = Set(v);
    }
    if let Some(v) = dto.quantity {
        active.quantity = Set(v);
    }
    if let Some(v) = dto.unit_price {
        active.unit_price = Set(v);
    }
    if let Some(v) = dto.certificate_number {
        active.certificate_number = Set(v);
    }
    if let Some(v) = dto.acquired_at {
        active.acquired_at = Set(v);
    }
    active.update(conn).await
}

pub async fn delete_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<u64, DbErr> {
    let res = shares::Entity::delete_many()
        .filter(shares::Column::UserId.eq(user_id))
        .filter(shares::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
