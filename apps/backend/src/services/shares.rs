use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use time::OffsetDateTime;
use tracing::info;

use super::{optional_text, required_text};
use crate::db::{degradable_read, require_db};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::pagination::{Page, PageRequest};
use crate::repos::shares::{self, Share, ShareCreate, ShareType, ShareUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NewShare {
    pub share_type: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub certificate_number: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub acquired_at: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SharePatch {
    #[serde(default)]
    pub share_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default, with = "double_option")]
    pub certificate_number: Option<Option<String>>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub acquired_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareSummary {
    pub holdings: u64,
    pub total_quantity: i64,
    pub total_value: f64,
    pub degraded: bool,
}

/// Largest quantity a single holding may record.
pub const MAX_QUANTITY: i64 = 1_000_000_000_000_000;

impl ShareSummary {
    /// Totals over `holdings`. Quantities that cannot be summed in an `i64`
    /// mean the stored rows are outside what the service ever writes.
    pub fn of(holdings: &[Share]) -> Result<Self, DomainError> {
        let total_quantity = holdings
            .iter()
            .try_fold(0_i64, |acc, s| acc.checked_add(s.quantity))
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    "share quantities overflow the summary total",
                )
            })?;
        Ok(Self {
            holdings: holdings.len() as u64,
            total_quantity,
            total_value: holdings.iter().map(Share::value).sum(),
            degraded: false,
        })
    }

    fn degraded() -> Self {
        Self {
            holdings: 0,
            total_quantity: 0,
            total_value: 0.0,
            degraded: true,
        }
    }
}

fn invalid(detail: impl Into<String>) -> AppError {
    AppError::invalid(ErrorCode::ValidationError, detail)
}

fn parse_share_type(raw: &str) -> Result<ShareType, AppError> {
    ShareType::parse(raw).ok_or_else(|| invalid("share_type must be 'ordinary' or 'preferred'"))
}

fn check_quantity(quantity: i64) -> Result<i64, AppError> {
    if quantity <= 0 {
        Err(invalid("quantity must be greater than 0"))
    } else if quantity > MAX_QUANTITY {
        Err(invalid(format!("quantity must not exceed {MAX_QUANTITY}")))
    } else {
        Ok(quantity)
    }
}

fn check_unit_price(price: f64) -> Result<f64, AppError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(invalid("unit_price must be a non-negative number"))
    }
}

pub async fn list(
    state: &AppState,
    user_id: &str,
    req: PageRequest,
) -> Result<Page<Share>, AppError> {
    let page =
        degradable_read(state.db(), |conn| shares::page_for_user(conn, user_id, req)).await?;
    Ok(page.unwrap_or_else(|| Page::empty(req).mark_degraded()))
}

pub async fn summary(state: &AppState, user_id: &str) -> Result<ShareSummary, AppError> {
    let holdings =
        degradable_read(state.db(), |conn| shares::all_for_user(conn, user_id)).await?;
    match holdings {
        Some(holdings) => Ok(ShareSummary::of(&holdings)?),
        None => Ok(ShareSummary::degraded()),
    }
}

pub async fn create(state: &AppState, user_id: &str, input: NewShare) -> Result<Share, AppError> {
    let share_type = parse_share_type(&required_text(input.share_type, "share_type")?)?;
    let quantity =
        check_quantity(input.quantity.ok_or_else(|| invalid("quantity is required"))?)?;
    let unit_price =
        check_unit_price(input.unit_price.ok_or_else(|| invalid("unit_price is required"))?)?;
    let db = require_db(state)?;

    let share = shares::create(
        db,
        ShareCreate {
            user_id: user_id.to_string(),
            share_type: share_type.as_str().to_string(),
            quantity,
            unit_price,
            certificate_number: optional_text(input.certificate_number),
            acquired_at: input.acquired_at.unwrap_or_else(OffsetDateTime::now_utc),
        },
    )
    .await?;
    info!(user_id, share_id = %share.id, quantity, "share holding created");
    Ok(share)
}

pub async fn update(
    state: &AppState,
    user_id: &str,
    id: &str,
    patch: SharePatch,
) -> Result<Share, AppError> {
    let share_type = patch
        .share_type
        .as_deref()
        .map(parse_share_type)
        .transpose()?
        .map(|t| t.as_str().to_string());
    let quantity = patch.quantity.map(check_quantity).transpose()?;
    let unit_price = patch.unit_price.map(check_unit_price).transpose()?;
    let db = require_db(state)?;

    let dto = ShareUpdate {
        share_type,
        quantity,
        unit_price,
        certificate_number: patch.certificate_number.map(optional_text),
        acquired_at: patch.acquired_at,
    };
    Ok(shares::update_owned(db, user_id, id, dto).await?)
}

pub async fn delete(state: &AppState, user_id: &str, id: &str) -> Result<(), AppError> {
    let db = require_db(state)?;
    shares::delete_owned(db, user_id, id).await?;
    info!(user_id, share_id = id, "share holding deleted");
    Ok(())
}
