use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::cookies::{cleared_cookies, marker_cookie, session_cookie};
use crate::auth::Identity;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{MaybeUser, ValidatedJson};
use crate::logging::Redacted;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<Identity>,
    pub authenticated: bool,
}

async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();
    let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
    let password = password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::invalid(
            ErrorCode::MissingCredentials,
            "Email and password are required",
        ));
    };

    let identity = app_state.sessions.authenticate(&email, &password).await?;
    let token = app_state.sessions.issue_token(&identity)?;
    info!(user_id = %identity.id, email = %Redacted(&identity.email), "login succeeded");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token, &app_state.security))
        .cookie(marker_cookie(&app_state.security))
        .json(LoginResponse {
            success: true,
            user: identity,
        }))
}

async fn logout(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let [session, marker] = cleared_cookies(&app_state.security);
    Ok(HttpResponse::Ok()
        .cookie(session)
        .cookie(marker)
        .json(serde_json::json!({ "success": true })))
}

async fn me(user: MaybeUser) -> Result<HttpResponse, AppError> {
    let user = user.0.map(|u| Identity {
        id: u.id,
        email: u.email,
        name: u.name,
    });
    Ok(HttpResponse::Ok().json(MeResponse {
        authenticated: user.is_some(),
        user,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::post().to(logout)))
        .service(web::resource("/me").route(web::get().to(me)));
}
