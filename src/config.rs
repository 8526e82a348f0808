//! Process configuration read from environment variables.
//!
//! All defaults target a local development database. [`Settings::from_lookup`]
//! accepts any key lookup so tests can supply values without touching the
//! process environment.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "postgres";
const DEFAULT_DATABASE: &str = "kanban";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value {value:?} for {variable}: {reason}")]
    InvalidValue {
        /// Environment variable name.
        variable: &'static str,
        /// Rejected raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// `PostgreSQL` through the connection pool.
    #[default]
    Postgres,
    /// Process-local memory; state is lost on exit.
    Memory,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err("expected `postgres` or `memory`".to_owned()),
        }
    }
}

/// Connection parameters for the board database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
            name: DEFAULT_DATABASE.to_owned(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl DatabaseSettings {
    /// Renders a libpq key/value connection string.
    ///
    /// Every value is single-quoted with backslash escapes, so spaces and
    /// quotes in passwords survive intact.
    #[must_use]
    pub fn conninfo(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            quote_conninfo_value(&self.host),
            self.port,
            quote_conninfo_value(&self.user),
            quote_conninfo_value(&self.password),
            quote_conninfo_value(&self.name),
        )
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

/// Complete process settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Database connection parameters.
    pub database: DatabaseSettings,
    /// HTTP listen address.
    pub bind_addr: SocketAddr,
    /// Selected backing store.
    pub storage: StorageMode,
    /// Artificial latency added to uncached board reads.
    pub read_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageMode::default(),
            read_delay: Duration::ZERO,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is set to an unusable
    /// value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// or blank keys.
    ///
    /// Text values are used verbatim; only parsed values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a value cannot be parsed or is out
    /// of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database = DatabaseSettings {
            host: read("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_or("POSTGRES_PORT", read("POSTGRES_PORT"), DEFAULT_PORT)?,
            user: read("POSTGRES_USER").unwrap_or_else(|| DEFAULT_USER.to_owned()),
            password: read("POSTGRES_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_owned()),
            name: read("POSTGRES_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_owned()),
            pool_size: parse_or("KANBAN_POOL_SIZE", read("KANBAN_POOL_SIZE"), DEFAULT_POOL_SIZE)?,
        };
        if database.pool_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                variable: "KANBAN_POOL_SIZE",
                value: "0".to_owned(),
                reason: "pool size must be greater than zero".to_owned(),
            });
        }

        let raw_bind_addr = read("KANBAN_BIND_ADDR");
        let bind_addr = parse_value(
            "KANBAN_BIND_ADDR",
            raw_bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR),
        )?;
        let storage = parse_or("KANBAN_STORAGE", read("KANBAN_STORAGE"), StorageMode::default())?;
        let delay_ms = parse_or("KANBAN_READ_DELAY_MS", read("KANBAN_READ_DELAY_MS"), 0_u64)?;

        Ok(Self {
            database,
            bind_addr,
            storage,
            read_delay: Duration::from_millis(delay_ms),
        })
    }
}

fn parse_or<T>(variable: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| parse_value(variable, &value))
}

fn parse_value<T>(variable: &'static str, raw: &str) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| ConfigurationError::InvalidValue {
            variable,
            value: raw.to_owned(),
            reason: err.to_string(),
        })
}

/// Quotes a value for a libpq key/value connection string.
fn quote_conninfo_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}
