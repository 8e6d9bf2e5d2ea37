pub mod pii;

pub use pii::{redact, Redacted};
