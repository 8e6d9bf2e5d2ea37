mod events;
mod health;
mod notifications;
mod profile;
mod reference_data;
mod shares;
