use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::exchange_rates_sea as rates_adapter;
pub use crate::adapters::exchange_rates_sea::RateUpsert;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency_code: String,
    pub currency_name: String,
    pub buying_rate: f64,
    pub selling_rate: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Codes are stored and compared upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

pub async fn page<C: ConnectionTrait>(
    conn: &C,
    req: PageRequest,
) -> Result<Page<ExchangeRate>, DomainError> {
    let (rows, total) = rates_adapter::page(conn, req.index(), req.limit).await?;
    Ok(Page::new(
        rows.into_iter().map(ExchangeRate::from).collect(),
        total,
        req,
    ))
}

pub async fn find_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<ExchangeRate, DomainError> {
    rates_adapter::find_by_code(conn, &normalize_code(code))
        .await?
        .map(ExchangeRate::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::ExchangeRate,
                format!("No exchange rate for {}", normalize_code(code)),
            )
        })
}

pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    dto: RateUpsert,
) -> Result<ExchangeRate, DomainError> {
    let dto = RateUpsert {
        currency_code: normalize_code(&dto.currency_code),
        ..dto
    };
    Ok(ExchangeRate::from(rates_adapter::upsert(conn, dto).await?))
}

impl From<crate::entities::exchange_rates::Model> for ExchangeRate {
    fn from(m: crate::entities::exchange_rates::Model) -> Self {
        Self {
            currency_code: m.currency_code,
            currency_name: m.currency_name,
            buying_rate: m.buying_rate,
            selling_rate: m.selling_rate,
            updated_at: m.updated_at,
        }
    }
}
