//! Configuration module for the hostel backend.
//!
//! Values come from `HOSTEL_*` environment variables (optionally via a
//! `.env` file). Unset variables fall back to defaults; malformed ones are
//! reported as a [`ConfigError`] so startup fails with a clear message.

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "./data/hostel.sqlite";
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the admin routes
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed for the initial occupancy snapshot; random when unset
    pub occupancy_seed: Option<u64>,
}

/// A configuration variable that is set but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid {} '{}': expected {}",
            self.variable, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank counts as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match var("HOSTEL_BIND_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError {
                variable: "HOSTEL_BIND_ADDR",
                value,
                expected: "a socket address such as 127.0.0.1:8080",
            })?,
            None => SocketAddr::from(DEFAULT_BIND_ADDR),
        };

        let occupancy_seed = match var("HOSTEL_OCCUPANCY_SEED") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError {
                variable: "HOSTEL_OCCUPANCY_SEED",
                value,
                expected: "an unsigned integer",
            })?),
            None => None,
        };

        Ok(Self {
            api_psk: var("HOSTEL_API_PSK"),
            db_path: var("HOSTEL_DB_PATH")
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
                .into(),
            bind_addr,
            log_level: var("HOSTEL_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            occupancy_seed,
        })
    }
}
