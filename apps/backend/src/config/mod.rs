pub mod app;
pub mod db;

pub use app::{Config, CredentialSource, DemoUser};
pub use db::{DbKind, RuntimeEnv};
