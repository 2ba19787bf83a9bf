//! Configuration module for the studio booking backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;

/// Which booking store to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite database
    Sqlite,
    /// Single JSON array file
    Json,
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "json" => Ok(StoreKind::Json),
            other => Err(AppError::Config(format!(
                "Invalid STUDIO_STORE \"{}\", expected sqlite or json",
                other
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Studio catalog JSON file; the embedded catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Booking store backend
    pub store: StoreKind,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to the JSON bookings file
    pub bookings_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let catalog_path = env::var("STUDIO_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let store = env::var("STUDIO_STORE")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse()?;

        let db_path = env::var("STUDIO_DB_PATH")
            .unwrap_or_else(|_| "./data/bookings.sqlite".to_string())
            .into();

        let bookings_path = env::var("STUDIO_BOOKINGS_PATH")
            .unwrap_or_else(|_| "./data/studioBookings.json".to_string())
            .into();

        let bind_addr_raw =
            env::var("STUDIO_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr_raw.parse().map_err(|_| {
            AppError::Config(format!("Invalid STUDIO_BIND_ADDR \"{}\"", bind_addr_raw))
        })?;

        let log_level = env::var("STUDIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            catalog_path,
            store,
            db_path,
            bookings_path,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("STUDIO_CATALOG_PATH");
        env::remove_var("STUDIO_STORE");
        env::remove_var("STUDIO_DB_PATH");
        env::remove_var("STUDIO_BOOKINGS_PATH");
        env::remove_var("STUDIO_BIND_ADDR");
        env::remove_var("STUDIO_LOG_LEVEL");

        let config = Config::from_env().unwrap();

        assert!(config.catalog_path.is_none());
        assert_eq!(config.store, StoreKind::Sqlite);
        assert_eq!(config.db_path, PathBuf::from("./data/bookings.sqlite"));
        assert_eq!(
            config.bookings_path,
            PathBuf::from("./data/studioBookings.json")
        );
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("JSON".parse::<StoreKind>().unwrap(), StoreKind::Json);
        assert_eq!(" sqlite ".parse::<StoreKind>().unwrap(), StoreKind::Sqlite);
        assert!(matches!(
            "redis".parse::<StoreKind>(),
            Err(AppError::Config(_))
        ));
    }
}
