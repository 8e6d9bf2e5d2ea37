use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::pagination::PageQuery;
use crate::services::shares::{self, NewShare, SharePatch};
use crate::state::app_state::AppState;

async fn list_shares(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = shares::list(&app_state, &user.id, query.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn share_summary(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(shares::summary(&app_state, &user.id).await?))
}

async fn create_share(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewShare>,
) -> Result<HttpResponse, AppError> {
    let share = shares::create(&app_state, &user.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(share))
}

async fn update_share(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<SharePatch>,
) -> Result<HttpResponse, AppError> {
    let share = shares::update(&app_state, &user.id, &path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(share))
}

async fn delete_share(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    shares::delete(&app_state, &user.id, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_shares))
            .route(web::post().to(create_share)),
    )
    .service(web::resource("/summary").route(web::get().to(share_summary)))
    .service(
        web::resource("/{id}")
            .route(web::patch().to(update_share))
            .route(web::delete().to(delete_share)),
    );
}
