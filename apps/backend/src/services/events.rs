use time::OffsetDateTime;
use tracing::info;

use crate::db::txn::with_txn_retry;
use crate::db::{degradable_read, require_db};
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use crate::repos::events::{self, Event, EventView, Registration};
use crate::state::app_state::AppState;

/// Degraded view of a fallback event: no counts are known.
fn fallback_view(event: Event, viewer: Option<&str>) -> EventView {
    EventView {
        event,
        registration_count: 0,
        is_registered: viewer.map(|_| false),
    }
}

pub async fn list(
    state: &AppState,
    viewer: Option<&str>,
    upcoming: bool,
    req: PageRequest,
) -> Result<Page<EventView>, AppError> {
    let now = OffsetDateTime::now_utc();
    let starting_after = upcoming.then_some(now);
    let page =
        degradable_read(state.db(), |conn| events::page(conn, starting_after, viewer, req)).await?;
    if let Some(page) = page {
        return Ok(page);
    }

    let mut snapshot: Vec<Event> = state
        .fallback
        .events()
        .into_iter()
        .filter(|e| !upcoming || e.starts_at > now)
        .collect();
    snapshot.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
    let views = snapshot
        .into_iter()
        .map(|e| fallback_view(e, viewer))
        .collect();
    Ok(Page::from_items(views, req).mark_degraded())
}

pub async fn get(state: &AppState, id: &str, viewer: Option<&str>) -> Result<EventView, AppError> {
    if let Some(view) = degradable_read(state.db(), |conn| events::find(conn, id, viewer)).await? {
        return Ok(view);
    }
    state
        .fallback
        .events()
        .into_iter()
        .find(|e| e.id == id)
        .map(|e| fallback_view(e, viewer))
        .ok_or_else(|| AppError::store_unavailable("event store unavailable"))
}

pub async fn my_registrations(
    state: &AppState,
    user_id: &str,
    req: PageRequest,
) -> Result<Page<Registration>, AppError> {
    let page = degradable_read(state.db(), |conn| {
        events::registrations_for_user(conn, user_id, req)
    })
    .await?;
    Ok(page.unwrap_or_else(|| Page::empty(req).mark_degraded()))
}

/// Register `user_id` for `event_id`. Of concurrent attempts one commits;
/// the rest fail with `ALREADY_REGISTERED` either from the pre-check or
/// from the unique index. Attempts that lose a SQLite write lock are rerun,
/// and the rerun sees the committed registration.
pub async fn register(
    state: &AppState,
    user_id: &str,
    event_id: &str,
) -> Result<Registration, AppError> {
    let db = require_db(state)?;
    let registration = with_txn_retry(db, |txn| {
        let (uid, eid) = (user_id.to_string(), event_id.to_string());
        Box::pin(async move { events::register(txn, &eid, &uid).await })
    })
    .await?;
    info!(user_id, event_id, registration_id = %registration.id, "event registration created");
    Ok(registration)
}

pub async fn cancel(state: &AppState, user_id: &str, event_id: &str) -> Result<(), AppError> {
    let db = require_db(state)?;
    events::cancel(db, event_id, user_id).await?;
    info!(user_id, event_id, "event registration cancelled");
    Ok(())
}
