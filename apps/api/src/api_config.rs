use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use stockroom_application::{
    BootstrapAdminInput, DEFAULT_SESSION_TOKEN_TTL_MINUTES, MAX_SESSION_TOKEN_TTL_MINUTES,
};
use stockroom_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_BOOTSTRAP_DISPLAY_NAME: &str = "Administrator";

#[derive(Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub session_token_ttl_minutes: i64,
    pub bootstrap_admin: Option<BootstrapAdminInput>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiConfig")
            .field("migrate_only", &self.migrate_only)
            .field("database_max_connections", &self.database_max_connections)
            .field("frontend_url", &self.frontend_url)
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("session_token_ttl_minutes", &self.session_token_ttl_minutes)
            .field(
                "bootstrap_admin",
                &self.bootstrap_admin.as_ref().map(|input| &input.email),
            )
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parsed_or(&lookup, "API_PORT", 3001_u16)?;
        let database_max_connections = parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let session_token_ttl_minutes = parsed_or(
            &lookup,
            "SESSION_TOKEN_TTL_MINUTES",
            DEFAULT_SESSION_TOKEN_TTL_MINUTES,
        )?;

        if !(1..=MAX_SESSION_TOKEN_TTL_MINUTES).contains(&session_token_ttl_minutes) {
            return Err(AppError::Validation(format!(
                "SESSION_TOKEN_TTL_MINUTES must be between 1 and {MAX_SESSION_TOKEN_TTL_MINUTES}"
            )));
        }

        let bootstrap_admin = bootstrap_admin(&lookup)?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            session_token_ttl_minutes,
            bootstrap_admin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parsed_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

fn bootstrap_admin(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<BootstrapAdminInput>, AppError> {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    match (
        non_empty("BOOTSTRAP_ADMIN_EMAIL"),
        non_empty("BOOTSTRAP_ADMIN_PASSWORD"),
    ) {
        (Some(email), Some(password)) => Ok(Some(BootstrapAdminInput {
            email,
            password,
            display_name: non_empty("BOOTSTRAP_ADMIN_DISPLAY_NAME")
                .unwrap_or_else(|| DEFAULT_BOOTSTRAP_DISPLAY_NAME.to_owned()),
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::Validation(
            "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together".to_owned(),
        )),
    }
}
