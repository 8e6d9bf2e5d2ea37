//! SeaORM adapter for exchange rates.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::exchange_rates;

#[derive(Debug, Clone)]
pub struct RateUpsert {
    pub currency_code: String,
    pub currency_name: String,
    pub buying_rate: f64,
    pub selling_rate: f64,
}

pub async fn page<C: ConnectionTrait>(
    conn: &C,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<exchange_rates::Model>, u64), DbErr> {
    let paginator = exchange_rates::Entity::find()
        .order_by_asc(exchange_rates::Column::CurrencyCode)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

/// `code` must already be upper-case.
pub async fn find_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<exchange_rates::Model>, DbErr> {
    exchange_rates::Entity::find()
        .filter(exchange_rates::Column::CurrencyCode.eq(code))
        .one(conn)
        .await
}

/// Insert a rate or overwrite the existing one for the same currency.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    dto: RateUpsert,
) -> Result<exchange_rates::Model, DbErr> {
    let code = dto.currency_code.clone();
    let active = exchange_rates::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        currency_code: Set(dto.currency_code),
        currency_name: Set(dto.currency_name),
        buying_rate: Set(dto.buying_rate),
        selling_rate: Set(dto.selling_rate),
        updated_at: Set(OffsetDateTime::now_utc()),
    };
    exchange_rates::Entity::insert(active)
        .on_conflict(
            OnConflict::column(exchange_rates::Column::CurrencyCode)
                .update_columns([
                    exchange_rates::Column::CurrencyName,
                    exchange_rates::Column::BuyingRate,
                    exchange_rates::Column::SellingRate,
                    exchange_rates::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_code(conn, &code)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("exchange_rates.currency_code {code}")))
}
