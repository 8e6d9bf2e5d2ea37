//! SeaORM adapters. Functions return `DbErr`; repos translate to `DomainError`.

pub mod events_sea;
pub mod exchange_rates_sea;
pub mod knowledge_sea;
pub mod notifications_sea;
pub mod profiles_sea;
pub mod shares_sea;
pub mod users_sea;
