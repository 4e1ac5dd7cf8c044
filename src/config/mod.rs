//! Configuration module for the team roster backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

/// Which persistence mechanism backs the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    JsonFile,
}

impl StorageBackend {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Some(StorageBackend::Sqlite),
            "json" => Some(StorageBackend::JsonFile),
            _ => None,
        }
    }
}

/// Malformed configuration value.
#[derive(Debug)]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.var, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (`sqlite` or `json`)
    pub storage: StorageBackend,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to the roster JSON file
    pub data_file: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// The single front-end origin allowed to make cross-origin requests
    pub cors_origin: HeaderValue,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let storage_raw = env::var("ROSTER_STORAGE").unwrap_or_else(|_| "sqlite".to_string());
        let storage = StorageBackend::parse(&storage_raw).ok_or_else(|| ConfigError {
            var: "ROSTER_STORAGE",
            message: format!("unknown backend '{}', expected 'sqlite' or 'json'", storage_raw),
        })?;

        let db_path = env::var("ROSTER_DB_PATH")
            .unwrap_or_else(|_| "./data/roster.sqlite".to_string())
            .into();

        let data_file = env::var("ROSTER_DATA_FILE")
            .unwrap_or_else(|_| "./data/team_members.json".to_string())
            .into();

        let bind_addr = env::var("ROSTER_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: "ROSTER_BIND_ADDR",
                message: e.to_string(),
            })?;

        let cors_origin = env::var("ROSTER_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .parse::<HeaderValue>()
            .map_err(|e| ConfigError {
                var: "ROSTER_CORS_ORIGIN",
                message: e.to_string(),
            })?;
        if cors_origin == "*" {
            return Err(ConfigError {
                var: "ROSTER_CORS_ORIGIN",
                message: "a wildcard origin cannot be combined with credentials".to_string(),
            });
        }

        let log_level = env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            storage,
            db_path,
            data_file,
            bind_addr,
            cors_origin,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "ROSTER_STORAGE",
        "ROSTER_DB_PATH",
        "ROSTER_DATA_FILE",
        "ROSTER_BIND_ADDR",
        "ROSTER_CORS_ORIGIN",
        "ROSTER_LOG_LEVEL",
    ];

    // Environment variables are process-wide, so defaults and overrides run in one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.db_path, PathBuf::from("./data/roster.sqlite"));
        assert_eq!(config.data_file, PathBuf::from("./data/team_members.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert_eq!(config.log_level, "info");

        env::set_var("ROSTER_STORAGE", "JSON");
        assert_eq!(
            Config::from_env().unwrap().storage,
            StorageBackend::JsonFile
        );

        env::set_var("ROSTER_STORAGE", "postgres");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.var, "ROSTER_STORAGE");
        env::remove_var("ROSTER_STORAGE");

        env::set_var("ROSTER_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.var, "ROSTER_BIND_ADDR");
        env::remove_var("ROSTER_BIND_ADDR");

        env::set_var("ROSTER_CORS_ORIGIN", "*");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.var, "ROSTER_CORS_ORIGIN");
        env::remove_var("ROSTER_CORS_ORIGIN");
    }
}
