use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;
use super::credentials::Identity;
use super::session::{AuthError, TokenRejection};
use crate::state::security_config::SecurityConfig;

/// Sign a session token for `identity`, valid for the configured TTL from `now`.
pub fn mint_session_token(
    identity: &Identity,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AuthError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AuthError::Issue("system clock before unix epoch".to_string()))?
        .as_secs() as i64;
    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = SessionClaims {
        sub: identity.id.clone(),
        email: identity.email.clone(),
        name: identity.name.clone(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AuthError::Issue(format!("failed to encode session token: {e}")))
}

/// Check signature and expiry and return the claims.
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, AuthError> {
    if token.trim().is_empty() {
        return Err(AuthError::InvalidToken(TokenRejection::Missing));
    }

    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let rejection = match e.kind() {
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::InvalidSignature => TokenRejection::BadSignature,
            _ => TokenRejection::Malformed,
        };
        AuthError::InvalidToken(rejection)
    })
}
