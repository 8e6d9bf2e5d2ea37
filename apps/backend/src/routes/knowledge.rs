use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::pagination::PageQuery;
use crate::repos::knowledge::KnowledgeQuery;
use crate::services::knowledge;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
}

async fn search(
    app_state: web::Data<AppState>,
    page: web::Query<PageQuery>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let query = KnowledgeQuery::parse(params.q.as_deref(), params.category.as_deref());
    let page = knowledge::search(&app_state, &query, page.validate()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn get_entry(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(knowledge::get(&app_state, &path).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(search)))
        .service(web::resource("/{id}").route(web::get().to(get_entry)));
}
