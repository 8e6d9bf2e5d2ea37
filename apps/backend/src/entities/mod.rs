pub mod event_registrations;
pub mod events;
pub mod exchange_rates;
pub mod knowledge_base;
pub mod notifications;
pub mod profiles;
pub mod shares;
pub mod users;

pub use event_registrations::Entity as EventRegistrations;
pub use events::Entity as Events;
pub use exchange_rates::Entity as ExchangeRates;
pub use knowledge_base::Entity as KnowledgeBase;
pub use notifications::Entity as Notifications;
pub use profiles::Entity as Profiles;
pub use shares::Entity as Shares;
pub use users::Entity as Users;
