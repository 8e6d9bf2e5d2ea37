use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::profiles::{self, NewProfile, ProfilePatch};
use crate::state::app_state::AppState;

async fn get_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(profiles::get(&app_state, &user.id).await?))
}

async fn create_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewProfile>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles::create(&app_state, &user.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(profile))
}

async fn update_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ProfilePatch>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles::update(&app_state, &user.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn delete_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    profiles::delete(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(get_profile))
            .route(web::post().to(create_profile))
            .route(web::patch().to(update_profile))
            .route(web::delete().to(delete_profile)),
    );
}
