use std::str::FromStr;

use bodyfit_core::access::{ApiKeyRegistry, DEFAULT_API_KEYS};

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// In-process store; data is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected postgres or memory)"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Apply embedded migrations at startup (default: `true`).
    pub run_migrations: bool,
    /// API keys accepted by the access gate.
    pub api_keys: ApiKeyRegistry,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `STORAGE_BACKEND`          | `postgres`                 |
    /// | `DATABASE_URL`             | (none)                     |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                       |
    /// | `RUN_MIGRATIONS`           | `true`                     |
    /// | `API_KEYS`                 | the two development keys   |
    ///
    /// Panics on malformed values; misconfiguration should stop the server
    /// before it binds.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.into());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage: StorageBackend = var("STORAGE_BACKEND", "postgres")
            .parse()
            .unwrap_or_else(|e| panic!("STORAGE_BACKEND: {e}"));

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let database_max_connections: u32 = var("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let run_migrations = parse_bool(&var("RUN_MIGRATIONS", "true"))
            .expect("RUN_MIGRATIONS must be true or false");

        let api_keys = ApiKeyRegistry::parse(&var("API_KEYS", DEFAULT_API_KEYS))
            .unwrap_or_else(|e| panic!("API_KEYS: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            database_url,
            database_max_connections,
            run_migrations,
            api_keys,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 10);
        assert!(config.run_migrations);
        assert!(config.api_keys.is_admin("admin_secret_key_123"));
        assert!(config.api_keys.is_valid_key("user_readonly_key_456"));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("STORAGE_BACKEND", "Memory"),
            ("RUN_MIGRATIONS", "off"),
            ("API_KEYS", "k1:admin"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(!config.run_migrations);
        assert_eq!(config.api_keys.len(), 1);
        assert!(config.api_keys.is_admin("k1"));
    }

    #[test]
    #[should_panic(expected = "API_KEYS")]
    fn unknown_role_aborts() {
        config_from(&[("API_KEYS", "k1:superuser")]);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}
