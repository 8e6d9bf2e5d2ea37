//! Events are global; registrations are per user.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::events_sea as events_adapter;
pub use crate::adapters::events_sea::EventCreate;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    pub capacity: Option<i32>,
}

/// An event as listed to a caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub registration_count: u64,
    /// Absent for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
}

async fn decorate<C: ConnectionTrait>(
    conn: &C,
    events: Vec<Event>,
    viewer: Option<&str>,
) -> Result<Vec<EventView>, DomainError> {
    let ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
    let counts = events_adapter::registration_counts(conn, &ids).await?;
    let mine = match viewer {
        Some(user_id) => Some(events_adapter::registered_event_ids(conn, user_id, &ids).await?),
        None => None,
    };

    Ok(events
        .into_iter()
        .map(|event| EventView {
            registration_count: counts.get(&event.id).copied().unwrap_or(0),
            is_registered: mine.as_ref().map(|m| m.contains(&event.id)),
            event,
        })
        .collect())
}

pub async fn page<C: ConnectionTrait>(
    conn: &C,
    starting_after: Option<OffsetDateTime>,
    viewer: Option<&str>,
    req: PageRequest,
) -> Result<Page<EventView>, DomainError> {
    let (rows, total) = events_adapter::page(conn, starting_after, req.index(), req.limit).await?;
    let events = rows.into_iter().map(Event::from).collect();
    Ok(Page::new(decorate(conn, events, viewer).await?, total, req))
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    viewer: Option<&str>,
) -> Result<EventView, DomainError> {
    let event = events_adapter::find_by_id(conn, id)
        .await?
        .map(Event::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Event, "Event not found"))?;
    decorate(conn, vec![event], viewer)
        .await?
        .pop()
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Event, "Event not found"))
}

pub async fn create<C: ConnectionTrait>(conn: &C, dto: EventCreate) -> Result<Event, DomainError> {
    Ok(Event::from(events_adapter::insert(conn, dto).await?))
}

/// Register `user_id` for `event_id`. Meant to run inside a transaction;
/// the unique (event_id, user_id) index settles concurrent attempts.
pub async fn register<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
    user_id: &str,
) -> Result<Registration, DomainError> {
    let event = events_adapter::find_by_id(conn, event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Event, "Event not found"))?;

    if events_adapter::find_registration(conn, event_id, user_id)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyRegistered,
            "Already registered for this event",
        ));
    }

    if let Some(capacity) = event.capacity {
        let taken = events_adapter::count_registrations(conn, event_id).await?;
        if taken >= capacity.max(0) as u64 {
            return Err(DomainError::conflict(ConflictKind::EventFull, "Event is full"));
        }
    }

    let row = events_adapter::insert_registration(conn, event_id, user_id).await?;
    Ok(Registration::from((row, Some(event))))
}

pub async fn cancel<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
    user_id: &str,
) -> Result<(), DomainError> {
    match events_adapter::delete_registration(conn, event_id, user_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Registration,
            "Not registered for this event",
        )),
        _ => Ok(()),
    }
}

pub async fn registrations_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    req: PageRequest,
) -> Result<Page<Registration>, DomainError> {
    let (rows, total) =
        events_adapter::registrations_for_user(conn, user_id, req.index(), req.limit).await?;
    Ok(Page::new(
        rows.into_iter().map(Registration::from).collect(),
        total,
        req,
    ))
}

pub async fn registration_count<C: ConnectionTrait>(
    conn: &C,
    event_id: &str,
) -> Result<u64, DomainError> {
    Ok(events_adapter::count_registrations(conn, event_id).await?)
}

impl From<crate::entities::events::Model> for Event {
    fn from(m: crate::entities::events::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            location: m.location,
            starts_at: m.starts_at,
            capacity: m.capacity,
        }
    }
}

impl
    From<(
        crate::entities::event_registrations::Model,
        Option<crate::entities::events::Model>,
    )> for Registration
{
    fn from(
        (reg, event): (
            crate::entities::event_registrations::Model,
            Option<crate::entities::events::Model>,
        ),
    ) -> Self {
        Self {
            id: reg.id,
            event_id: reg.event_id,
            user_id: reg.user_id,
            created_at: reg.created_at,
            event: event.map(Event::from),
        }
    }
}
