use actix_web::{web, App, HttpServer};
use portal_backend::config::Config;
use portal_backend::error::set_expose_details;
use portal_backend::infra::state::build_state;
use portal_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use portal_backend::routes;
use portal_backend::state::security_config::SecurityConfig;
use portal_backend::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.env);
    set_expose_details(!config.env.is_prod());

    let security = SecurityConfig::new(config.jwt_secret.as_bytes())
        .with_cookie_secure(config.cookie_secure);

    let app_state = match build_state()
        .with_db(config.db_kind.clone())
        .allow_degraded_start(true)
        .with_security(security)
        .with_credential_store(config.credential_source)
        .with_demo_user(config.demo_user.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    if app_state.has_db() {
        info!(db = ?config.db_kind, "store connected");
    } else {
        warn!("starting without a store; reads are degraded and writes return 503");
    }

    info!(host = %config.host, port = config.port, env = ?config.env, "starting portal backend");

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(SecurityHeaders)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
