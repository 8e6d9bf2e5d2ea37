mod event_registration;
mod records;
