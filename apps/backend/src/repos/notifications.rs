use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::notifications_sea as notifications_adapter;
pub use crate::adapters::notifications_sea::{NotificationCreate, NotificationUpdate};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::pagination::{Page, PageRequest};

/// Allowed values for `kind`.
pub const KINDS: &[&str] = &["info", "success", "warning", "alert"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn page_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    unread_only: bool,
    req: PageRequest,
) -> Result<Page<Notification>, DomainError> {
    let (rows, total) =
        notifications_adapter::page_for_user(conn, user_id, unread_only, req.index(), req.limit)
            .await?;
    Ok(Page::new(
        rows.into_iter().map(Notification::from).collect(),
        total,
        req,
    ))
}

pub async fn unread_count<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<u64, DomainError> {
    Ok(notifications_adapter::unread_count(conn, user_id).await?)
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    dto: NotificationCreate,
) -> Result<Notification, DomainError> {
    Ok(Notification::from(notifications_adapter::insert(conn, dto).await?))
}

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Notification, "Notification not found")
}

pub async fn update_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
    dto: NotificationUpdate,
) -> Result<Notification, DomainError> {
    let current = notifications_adapter::find_owned(conn, user_id, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Notification::from(
        notifications_adapter::update(conn, current, dto).await?,
    ))
}

pub async fn mark_all_read<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<u64, DomainError> {
    Ok(notifications_adapter::mark_all_read(conn, user_id).await?)
}

pub async fn delete_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<(), DomainError> {
    match notifications_adapter::delete_owned(conn, user_id, id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}

impl From<crate::entities::notifications::Model> for Notification {
    fn from(m: crate::entities::notifications::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            message: m.message,
            kind: m.kind,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}
