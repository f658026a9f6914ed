//! Process configuration for the blog API host.
//!
//! # Responsibility
//! - Collect database, bind address and logging settings from environment
//!   variables, with defaults for everything except the database URL.
//!
//! # Invariants
//! - `database_url` is validated with `DatabaseUrl::parse` at load time.
//! - Loading configuration never touches the database.

use crate::db::{DatabaseUrl, DbError};
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const HOST_ENV: &str = "BLOG_HOST";
pub const PORT_ENV: &str = "BLOG_PORT";
pub const LOG_LEVEL_ENV: &str = "BLOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BLOG_LOG_DIR";

const LOG_DIR_NAME: &str = "blog_api_logs";

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar { name: &'static str, value: String },
    Database(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is required"),
            Self::InvalidVar { name, value } => {
                write!(f, "environment variable `{name}` has invalid value `{value}`")
            }
            Self::Database(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Database(value)
    }
}

/// Blog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Connection URL for the relational store.
    pub database_url: String,

    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 8080)
    pub port: u16,

    /// Log level (default: `debug` in debug builds, `info` otherwise)
    pub log_level: String,

    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR_NAME)
}

impl BlogConfig {
    /// Creates a config for `database_url` with every other field defaulted.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: default_host(),
            port: default_port(),
            log_level: default_level(),
            log_dir: default_log_dir(),
        }
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_ENV).ok_or(ConfigError::MissingVar(DATABASE_URL_ENV))?;
        DatabaseUrl::parse(&database_url)?;

        let mut config = Self::new(database_url);
        if let Some(host) = read(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = read(PORT_ENV) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidVar {
                name: PORT_ENV,
                value: port.clone(),
            })?;
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Parsed database target.
    pub fn database(&self) -> Result<DatabaseUrl, ConfigError> {
        Ok(DatabaseUrl::parse(&self.database_url)?)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
