use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::pagination::PageQuery;
use crate::services::notifications::{self, NewNotification, NotificationPatch};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread_only: bool,
}

async fn list_notifications(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    page: web::Query<PageQuery>,
    filter: web::Query<NotificationFilter>,
) -> Result<HttpResponse, AppError> {
    let page =
        notifications::list(&app_state, &user.id, filter.unread_only, page.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn unread_count(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(notifications::unread_count(&app_state, &user.id).await?))
}

async fn create_notification(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewNotification>,
) -> Result<HttpResponse, AppError> {
    let created = notifications::create(&app_state, &user.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

async fn mark_all_read(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let updated = notifications::mark_all_read(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "updated": updated })))
}

async fn update_notification(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<NotificationPatch>,
) -> Result<HttpResponse, AppError> {
    let updated = notifications::update(&app_state, &user.id, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

async fn delete_notification(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    notifications::delete(&app_state, &user.id, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_notifications))
            .route(web::post().to(create_notification)),
    )
    .service(web::resource("/unread-count").route(web::get().to(unread_count)))
    .service(web::resource("/read-all").route(web::post().to(mark_all_read)))
    .service(
        web::resource("/{id}")
            .route(web::patch().to(update_notification))
            .route(web::delete().to(delete_notification)),
    );
}
