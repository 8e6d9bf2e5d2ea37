use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::shares_sea as shares_adapter;
pub use crate::adapters::shares_sea::{ShareCreate, ShareUpdate};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    Ordinary,
    Preferred,
}

impl ShareType {
    pub fn as_str(self) -> &'static str {
        match self {
            ShareType::Ordinary => "ordinary",
            ShareType::Preferred => "preferred",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinary" => Some(ShareType::Ordinary),
            "preferred" => Some(ShareType::Preferred),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub id: String,
    pub user_id: String,
    pub share_type: ShareType,
    pub quantity: i64,
    pub unit_price: f64,
    pub certificate_number: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub acquired_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Share {
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

pub async fn page_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    req: PageRequest,
) -> Result<Page<Share>, DomainError> {
    let (rows, total) = shares_adapter::page_for_user(conn, user_id, req.index(), req.limit).await?;
    let items = rows.into_iter().map(Share::try_from).collect::<Result<_, _>>()?;
    Ok(Page::new(items, total, req))
}

pub async fn all_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<Share>, DomainError> {
    shares_adapter::all_for_user(conn, user_id)
        .await?
        .into_iter()
        .map(Share::try_from)
        .collect()
}

pub async fn create<C: ConnectionTrait>(conn: &C, dto: ShareCreate) -> Result<Share, DomainError> {
    Share::try_from(shares_adapter::insert(conn, dto).await?)
}

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Share, "Share holding not found")
}

/// Rows owned by someone else are reported exactly like missing rows.
pub async fn update_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
    dto: ShareUpdate,
) -> Result<Share, DomainError> {
    let current = shares_adapter::find_owned(conn, user_id, id)
        .await?
        .ok_or_else(not_found)?;
    Share::try_from(shares_adapter::update(conn, current, dto).await?)
}

pub async fn delete_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    id: &str,
) -> Result<(), DomainError> {
    match shares_adapter::delete_owned(conn, user_id, id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}

impl TryFrom<crate::entities::shares::Model> for Share {
    type Error = DomainError;

    fn try_from(m: crate::entities::shares::Model) -> Result<Self, Self::Error> {
        let share_type = ShareType::parse(&m.share_type).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("share {} has unknown type '{}'", m.id, m.share_type),
            )
        })?;
        Ok(Self {
            id: m.id,
            user_id: m.user_id,
            share_type,
            quantity: m.quantity,
            unit_price: m.unit_price,
            certificate_number: m.certificate_number,
            acquired_at: m.acquired_at,
            created_at: m.created_at,
        })
    }
}
