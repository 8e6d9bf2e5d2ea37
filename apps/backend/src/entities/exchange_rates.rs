use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exchange_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// ISO 4217, stored upper-case
    #[sea_orm(unique)]
    pub currency_code: String,
    pub currency_name: String,
    #[sea_orm(column_type = "Double")]
    pub buying_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub selling_rate: f64,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
