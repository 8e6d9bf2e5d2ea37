use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::password::PasswordCost;

/// Session lifetime for both the signed token and the auth cookie.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for session signing, cookies and password hashing
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// Token algorithm (HS256)
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
    /// Whether session cookies carry the `Secure` attribute
    pub cookie_secure: bool,
    pub password_cost: PasswordCost,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: SESSION_TTL,
            cookie_secure: false,
            password_cost: PasswordCost::Default,
        }
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_password_cost(mut self, cost: PasswordCost) -> Self {
        self.password_cost = cost;
        self
    }

    /// Fast hashing and a fixed secret; never use outside tests.
    pub fn for_tests() -> Self {
        Self::new(b"portal_test_secret_key_do_not_use".to_vec())
            .with_password_cost(PasswordCost::Low)
    }
}
