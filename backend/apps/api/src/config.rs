//! Process configuration
//!
//! Read once from the environment (after `.env` is loaded). Empty values
//! count as unset and fall back to the defaults below.

use anyhow::{Context, Result};
use platform::config::Environment;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Startup configuration
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub server_port: u16,
    pub environment: Environment,
    pub allowed_origins: String,
    pub total_tagihan: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in `main`, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                or("DB_USER", "postgres"),
                or("DB_PASSWORD", ""),
                or("DB_HOST", "localhost"),
                or("DB_PORT", "5432"),
                or("DB_NAME", "komite_sekolah"),
            ),
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse().context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let server_port = match get("SERVER_PORT") {
            Some(v) => v.trim().parse().context("SERVER_PORT must be a port number")?,
            None => DEFAULT_SERVER_PORT,
        };

        let total_tagihan = match get("TOTAL_TAGIHAN") {
            Some(v) => v.trim().parse().context("TOTAL_TAGIHAN must be an integer")?,
            None => 0,
        };

        let environment = get("ENVIRONMENT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            database_url,
            db_max_connections,
            jwt_secret: or("JWT_SECRET", DEFAULT_JWT_SECRET),
            server_port,
            environment,
            allowed_origins: or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS),
            total_tagihan,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

// Manual impl: keeps the secret and the database password out of logs
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("db_max_connections", &self.db_max_connections)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("allowed_origins", &self.allowed_origins)
            .field("total_tagihan", &self.total_tagihan)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.database_url, "postgres://postgres:@localhost:5432/komite_sekolah");
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.server_port, 8080);
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.allowed_origins, "http://localhost:3000");
        assert_eq!(cfg.total_tagihan, 0);
        assert!(cfg.uses_default_secret());
    }

    #[test]
    fn test_empty_values_fall_back() {
        let cfg = config(&[("SERVER_PORT", ""), ("JWT_SECRET", "  "), ("DB_HOST", "")]).unwrap();
        assert_eq!(cfg.server_port, 8080);
        assert!(cfg.uses_default_secret());
        assert!(cfg.database_url.contains("@localhost:"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DB_USER", "komite"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "dues"),
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s3cret"),
            ("TOTAL_TAGIHAN", "1500000"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://komite:pw@localhost:5432/dues");
        assert!(cfg.environment.is_production());
        assert!(!cfg.uses_default_secret());
        assert_eq!(cfg.total_tagihan, 1_500_000);

        let cfg = config(&[("DATABASE_URL", "postgres://x/y"), ("DB_USER", "ignored")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://x/y");
    }

    #[test]
    fn test_malformed_number_is_error() {
        assert!(config(&[("SERVER_PORT", "eighty")]).is_err());
        assert!(config(&[("TOTAL_TAGIHAN", "1.5")]).is_err());
    }
}
