use actix_web::{web, HttpRequest};

use crate::error::AppError;

pub mod auth;
pub mod events;
pub mod exchange_rates;
pub mod health;
pub mod knowledge;
pub mod notifications;
pub mod profile;
pub mod shares;

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(format!("Invalid query string: {err}")).into()
}

fn path_error(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(format!("Invalid path: {err}")).into()
}

/// Register every route. `main.rs` adds the middleware stack around this;
/// tests call it directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));

    cfg.service(web::resource("/").route(web::get().to(health::root)));
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/profile").configure(profile::configure_routes));
    cfg.service(web::scope("/api/shares").configure(shares::configure_routes));
    cfg.service(web::scope("/api/notifications").configure(notifications::configure_routes));
    cfg.service(web::scope("/api/events").configure(events::configure_routes));
    cfg.service(web::scope("/api/exchange-rates").configure(exchange_rates::configure_routes));
    cfg.service(web::scope("/api/knowledge").configure(knowledge::configure_routes));
}
