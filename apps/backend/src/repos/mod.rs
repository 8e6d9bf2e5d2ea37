//! Repositories: domain types over the SeaORM adapters, errors as `DomainError`.

pub mod events;
pub mod exchange_rates;
pub mod knowledge;
pub mod notifications;
pub mod profiles;
pub mod shares;
pub mod users;
