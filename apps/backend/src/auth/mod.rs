pub mod claims;
pub mod cookies;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::{CredentialStore, DbCredentialStore, Identity, StaticCredentialStore};
pub use session::{AuthError, SessionAuthority, TokenRejection};
