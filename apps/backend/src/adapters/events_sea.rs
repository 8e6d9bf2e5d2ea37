//! SeaORM adapter for events and event registrations.

use std::collections::{HashMap, HashSet};

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{event_registrations, events};

#[derive(Debug, Clone)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: OffsetDateTime,
    pub capacity: Option<i32>,
}

/// Events ordered by start time; `starting_after` keeps only later ones.
pub async fn page<C: ConnectionTrait>(
    conn: &C,
    starting_after: Option<OffsetDateTime>,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<events::Model>, u64), DbErr> {
    let mut query = events::Entity::find();
    if let Some(t) = starting_after {
        query = query.filter(events::Column::StartsAt.gt(t));
    }
    let paginator = query
        .order_by_asc(events::Column::StartsAt)
        .order_by_asc(events::Column::Id)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<events::Model>, DbErr> {
    events::Entity::find_by_id(id.to_owned()).one(conn).await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dto: EventCreate,
) -> Result<events::Model, DbErr> {
    events::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        title: Set(dto.title),
        description: Set(dto.description),
        location: Set(dto.location),
        starts_at: Set(dto.starts_at),
        capacity: Set(dto.capacity),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

/// Registration count per event id; ids without registrations are absent.
pub async fn registration_counts<C: ConnectionTrait>(
    conn: &C,
    event_ids: &[String],
) -> Result<HashMap<String, u64>, DbErr> {
    if event_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(String, i64)> = event_registrations::Entity::find()
        .select_only()
        .column(event_registrations::Column::EventId)
        .column_as(Expr::col(event_registrations::Column::Id).count(), "registrations")
        .filter(event_registrations::Column::EventId.is_in(event_ids.iter().cloned()))
        .group_by(event_registrations::Column::EventId)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(id, n)| (id, n.max(0) as u64))
        .collect())
}

/// Subset of `event_ids` the user is registered for.
pub async fn registered_event_ids<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    event_ids: &[String],
) -> Result<HashSet<String>, DbErr> {
    if event_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<String> = event_registrations::Entity::find()
        .select_only()
        .column(event_registrations::Column::EventId)
        .filter(event_registrations::Column::UserId.eq(user_id))
        .filter(event_registrations::Column::EventId.is_in(event_ids.iter().cloned()))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(ids.into_iter().collect())
}

pub async fn count_registrations<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
) -> Result<u64, DbErr> {
    event_registrations::Entity::find()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .count(conn)
        .await
}

pub async fn find_registration<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
    user_id: &str,
) -> Result<Option<event_registrations::Model>, DbErr> {
    event_registrations::Entity::find()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .filter(event_registrations::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Fails with a unique violation when the pair is already registered.
pub async fn insert_registration<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
    user_id: &str,
) -> Result<event_registrations::Model, DbErr> {
    event_registrations::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        event_id: Set(event_id.to_owned()),
        user_id: Set(user_id.to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn delete_registration<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
    user_id: &str,
) -> Result<u64, DbErr> {
    let res = event_registrations::Entity::delete_many()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .filter(event_registrations::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// The user's registrations, newest first, each with its event.
pub async fn registrations_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<(event_registrations::Model, Option<events::Model>)>, u64), DbErr> {
    let paginator = event_registrations::Entity::find()
        .find_also_related(events::Entity)
        .filter(event_registrations::Column::UserId.eq(user_id))
        .order_by_desc(event_registrations::Column::CreatedAt)
        .order_by_asc(event_registrations::Column::Id)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}
