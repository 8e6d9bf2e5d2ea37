use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::db::RuntimeEnv;

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Install the process-wide subscriber: JSON lines in production, a
/// compact human format everywhere else. `RUST_LOG` overrides the filter.
pub fn init_tracing(env: RuntimeEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    match env {
        RuntimeEnv::Prod => {
            let json = fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .json();
            registry.with(json).init();
        }
        RuntimeEnv::Dev | RuntimeEnv::Test => {
            registry.with(fmt::layer().with_target(true).compact()).init();
        }
    }
}
