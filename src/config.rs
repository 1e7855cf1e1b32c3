use std::env;
use std::net::SocketAddr;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
///
/// `database_url` and `jwt_secret` are the two required connection secrets;
/// startup fails immediately when either is missing. Everything else has a
/// sensible default and can be overridden via `APP__`-prefixed environment
/// variables or files under `config/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub auto_migrate: bool,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,

    /// Comma-separated list of allowed CORS origins; permissive when unset
    /// in development
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_true() -> bool {
    true
}
fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_acquire_timeout_secs() -> u64 {
    8
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}

impl AppConfig {
    /// Minimal config for tests and tooling; everything defaulted except the
    /// two required secrets.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            host: default_host(),
            port: default_port(),
            environment: "test".to_string(),
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: true,
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            cors_allowed_origins: None,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppConfigError::Invalid("host/port do not form a valid socket address"))
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Load configuration from `config/` files plus `APP__`-prefixed environment
/// variables.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    // No defaults for database_url or jwt_secret: both MUST be supplied.
    let config = Config::builder()
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    if config.get_string("database_url").is_err() {
        error!("Database URL is not configured. Set APP__DATABASE_URL.");
        return Err(AppConfigError::Missing("database_url"));
    }
    if config.get_string("jwt_secret").is_err() {
        error!("JWT secret is not configured. Set APP__JWT_SECRET with a secure random string.");
        return Err(AppConfigError::Missing("jwt_secret"));
    }

    let app_config: AppConfig = config.try_deserialize()?;
    Ok(app_config)
}

/// Initialise the tracing subscriber. `RUST_LOG` wins over the configured
/// level when present.
pub fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
