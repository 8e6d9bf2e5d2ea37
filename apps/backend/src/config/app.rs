//! Process configuration read once at startup.

use std::env;

use super::db::{DbKind, RuntimeEnv};
use crate::auth::Identity;
use crate::error::AppError;

/// Which credential store backs login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Static,
    Database,
}

/// Placeholder account served by the static store and seeded into `users`
/// when the database store is selected.
#[derive(Debug, Clone)]
pub struct DemoUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl DemoUser {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl Default for DemoUser {
    fn default() -> Self {
        Self {
            id: "user-1".to_string(),
            email: "abebe@gmail.com".to_string(),
            name: "Abebe Kebede".to_string(),
            password: "password123".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub env: RuntimeEnv,
    pub db_kind: DbKind,
    pub jwt_secret: String,
    pub cookie_secure: bool,
    pub credential_source: CredentialSource,
    pub demo_user: DemoUser,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let env_kind = match env::var("PORTAL_ENV") {
            Ok(v) => v.parse()?,
            Err(_) => RuntimeEnv::Prod,
        };

        let port = match env::var("PORTAL_PORT") {
            Ok(v) => v.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORTAL_PORT must be a valid port number, got '{v}'"))
            })?,
            Err(_) => 3001,
        };

        let db_kind = match env::var("PORTAL_DB") {
            Ok(v) => v.parse()?,
            Err(_) => DbKind::Postgres,
        };

        let jwt_secret = super::db::must_var("PORTAL_JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("PORTAL_JWT_SECRET must not be empty"));
        }

        let cookie_secure = match env::var("PORTAL_COOKIE_SECURE") {
            Ok(v) => parse_bool("PORTAL_COOKIE_SECURE", &v)?,
            Err(_) => env_kind.is_prod(),
        };

        let credential_source = match env::var("PORTAL_CREDENTIAL_STORE") {
            Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
                "static" => CredentialSource::Static,
                "database" | "db" => CredentialSource::Database,
                other => {
                    return Err(AppError::config(format!(
                        "PORTAL_CREDENTIAL_STORE must be static or database, got '{other}'"
                    )))
                }
            },
            Err(_) => CredentialSource::Static,
        };

        let defaults = DemoUser::default();
        let demo_user = DemoUser {
            id: var_or("PORTAL_DEMO_USER_ID", defaults.id),
            email: var_or("PORTAL_DEMO_USER_EMAIL", defaults.email),
            name: var_or("PORTAL_DEMO_USER_NAME", defaults.name),
            password: var_or("PORTAL_DEMO_USER_PASSWORD", defaults.password),
        };

        Ok(Self {
            host: var_or("PORTAL_HOST", "0.0.0.0".to_string()),
            port,
            env: env_kind,
            db_kind,
            jwt_secret,
            cookie_secure,
            credential_source,
            demo_user,
            cors_origins: parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

fn var_or(name: &str, default: String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

/// Comma-separated http(s) origins; empty and "null" entries are dropped.
/// Falls back to the local front-end.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        origins
    }
}
