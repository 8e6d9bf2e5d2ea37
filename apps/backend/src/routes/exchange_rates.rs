use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::pagination::PageQuery;
use crate::services::exchange_rates;
use crate::state::app_state::AppState;

async fn list_rates(
    app_state: web::Data<AppState>,
    page: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = exchange_rates::list(&app_state, page.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn get_rate(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(exchange_rates::get(&app_state, &path).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_rates)))
        .service(web::resource("/{code}").route(web::get().to(get_rate)));
}
