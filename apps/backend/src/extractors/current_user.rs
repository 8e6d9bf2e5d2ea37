use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;
use tracing::debug;

use crate::auth::cookies::AUTH_COOKIE;
use crate::auth::{AuthError, Identity};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Signed-in caller, recovered from the session cookie or a bearer header.
/// Rejects the request with 401 when neither yields a valid session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<Identity> for CurrentUser {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            name: identity.name,
        }
    }
}

/// Caller identity when there is one. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.id.as_str())
    }
}

/// Session token presented with the request. The cookie wins over
/// `Authorization: Bearer`.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(AUTH_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next()?;
    let token = parts.next()?.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

async fn resolve(req: &HttpRequest) -> Result<Option<CurrentUser>, AppError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    match state.sessions.validate(&token).await {
        Ok(identity) => Ok(Some(identity.into())),
        Err(AuthError::InvalidToken(reason)) => {
            debug!(%reason, "session token rejected");
            Err(AuthError::InvalidToken(reason).into())
        }
        Err(e) => Err(e.into()),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve(&req).await?.ok_or_else(AppError::not_authenticated) })
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            match resolve(&req).await {
                Ok(user) => Ok(MaybeUser(user)),
                Err(e) => {
                    debug!(error = %e, "treating caller as anonymous");
                    Ok(MaybeUser(None))
                }
            }
        })
    }
}
