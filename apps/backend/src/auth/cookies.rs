//! Session cookie placement.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use crate::state::security_config::SecurityConfig;

pub const AUTH_COOKIE: &str = "auth-token";
pub const MARKER_COOKIE: &str = "is-authenticated";

fn max_age(security: &SecurityConfig) -> Duration {
    Duration::seconds(security.token_ttl.as_secs() as i64)
}

/// Http-only cookie carrying the session token.
pub fn session_cookie(token: &str, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token.to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.cookie_secure)
        .max_age(max_age(security))
        .finish()
}

/// Script-readable marker so the front-end can tell it is signed in.
pub fn marker_cookie(security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build(MARKER_COOKIE, "true")
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(security.cookie_secure)
        .max_age(max_age(security))
        .finish()
}

/// Empty, immediately expiring replacements for both cookies.
pub fn cleared_cookies(security: &SecurityConfig) -> [Cookie<'static>; 2] {
    let clear = |name: &'static str, http_only: bool| {
        Cookie::build(name, "")
            .path("/")
            .http_only(http_only)
            .same_site(SameSite::Lax)
            .secure(security.cookie_secure)
            .max_age(Duration::ZERO)
            .finish()
    };
    [clear(AUTH_COOKIE, true), clear(MARKER_COOKIE, false)]
}
