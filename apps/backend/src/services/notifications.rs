use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::required_text;
use crate::db::{degradable_read, require_db};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::pagination::{Page, PageRequest};
use crate::repos::notifications::{
    self, Notification, NotificationCreate, NotificationUpdate, KINDS,
};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NewNotification {
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: u64,
    pub degraded: bool,
}

fn parse_kind(kind: Option<String>) -> Result<String, AppError> {
    let kind = kind
        .map(|k| k.trim().to_ascii_lowercase())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| "info".to_string());
    if KINDS.contains(&kind.as_str()) {
        Ok(kind)
    } else {
        Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("kind must be one of: {}", KINDS.join(", ")),
        ))
    }
}

pub async fn list(
    state: &AppState,
    user_id: &str,
    unread_only: bool,
    req: PageRequest,
) -> Result<Page<Notification>, AppError> {
    let page = degradable_read(state.db(), |conn| {
        notifications::page_for_user(conn, user_id, unread_only, req)
    })
    .await?;
    Ok(page.unwrap_or_else(|| Page::empty(req).mark_degraded()))
}

pub async fn unread_count(state: &AppState, user_id: &str) -> Result<UnreadCount, AppError> {
    let count =
        degradable_read(state.db(), |conn| notifications::unread_count(conn, user_id)).await?;
    Ok(UnreadCount {
        count: count.unwrap_or(0),
        degraded: count.is_none(),
    })
}

pub async fn create(
    state: &AppState,
    user_id: &str,
    input: NewNotification,
) -> Result<Notification, AppError> {
    let title = required_text(input.title, "title")?;
    let message = required_text(input.message, "message")?;
    let kind = parse_kind(input.kind)?;
    let db = require_db(state)?;

    let created = notifications::create(
        db,
        NotificationCreate {
            user_id: user_id.to_string(),
            title,
            message,
            kind,
        },
    )
    .await?;
    debug!(user_id, notification_id = %created.id, "notification created");
    Ok(created)
}

pub async fn update(
    state: &AppState,
    user_id: &str,
    id: &str,
    patch: NotificationPatch,
) -> Result<Notification, AppError> {
    let title = patch.title.map(|t| required_text(Some(t), "title")).transpose()?;
    let message = patch
        .message
        .map(|m| required_text(Some(m), "message"))
        .transpose()?;
    let db = require_db(state)?;

    let dto = NotificationUpdate {
        title,
        message,
        is_read: patch.is_read,
    };
    Ok(notifications::update_owned(db, user_id, id, dto).await?)
}

pub async fn mark_all_read(state: &AppState, user_id: &str) -> Result<u64, AppError> {
    let db = require_db(state)?;
    let updated = notifications::mark_all_read(db, user_id).await?;
    info!(user_id, updated, "notifications marked read");
    Ok(updated)
}

pub async fn delete(state: &AppState, user_id: &str, id: &str) -> Result<(), AppError> {
    let db = require_db(state)?;
    Ok(notifications::delete_owned(db, user_id, id).await?)
}
