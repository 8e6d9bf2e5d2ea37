use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, MaybeUser};
use crate::pagination::PageQuery;
use crate::services::events;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub upcoming: bool,
}

async fn list_events(
    viewer: MaybeUser,
    app_state: web::Data<AppState>,
    page: web::Query<PageQuery>,
    filter: web::Query<EventFilter>,
) -> Result<HttpResponse, AppError> {
    let page = events::list(&app_state, viewer.id(), filter.upcoming, page.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn my_registrations(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = events::my_registrations(&app_state, &user.id, page.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn get_event(
    viewer: MaybeUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(events::get(&app_state, &path, viewer.id()).await?))
}

async fn register(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let registration = events::register(&app_state, &user.id, &path).await?;
    Ok(HttpResponse::Created().json(registration))
}

async fn cancel_registration(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    events::cancel(&app_state, &user.id, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_events)))
        .service(web::resource("/registrations").route(web::get().to(my_registrations)))
        .service(web::resource("/{id}").route(web::get().to(get_event)))
        .service(
            web::resource("/{id}/register")
                .route(web::post().to(register))
                .route(web::delete().to(cancel_registration)),
        );
}
