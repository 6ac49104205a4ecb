//! Configuration management

use serde::Serialize;

use crate::db::DbConfig;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8082;

/// Default time allowed for open connections to drain on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DbConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
            allow_credentials: false,
        }
    }
}

impl ServerConfig {
    /// Read `ENCOUNTERS_HOST`, `ENCOUNTERS_PORT` and `ENCOUNTERS_SHUTDOWN_TIMEOUT`
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("ENCOUNTERS_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: std::env::var("ENCOUNTERS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            shutdown_timeout_secs: std::env::var("ENCOUNTERS_SHUTDOWN_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }
}

impl CorsConfig {
    /// Read `CORS_ALLOWED_ORIGINS` (comma-separated) and `CORS_ALLOW_CREDENTIALS`
    pub fn from_env() -> Self {
        Self {
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            allow_credentials: std::env::var("CORS_ALLOW_CREDENTIALS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig::from_env(),
            database: DbConfig::from_env()?,
            cors: CorsConfig::from_env(),
        };

        config.validate()?;

        tracing::info!(
            host = %config.server.host,
            port = config.server.port,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        self.database.validate()?;

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config() -> Config {
        Config {
            server: ServerConfig::default(),
            database: DbConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config();
        assert_eq!(config.server.port, 8082);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut config = config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = config();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = config();
        config.database.min_connections = config.database.max_connections + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        std::env::set_var("ENCOUNTERS_HOST", "0.0.0.0");
        std::env::set_var("ENCOUNTERS_PORT", "9090");
        std::env::set_var("ENCOUNTERS_SHUTDOWN_TIMEOUT", "not-a-number");

        let server = ServerConfig::from_env();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 9090);
        assert_eq!(server.shutdown_timeout_secs, DEFAULT_SHUTDOWN_TIMEOUT_SECS);

        std::env::remove_var("ENCOUNTERS_HOST");
        std::env::remove_var("ENCOUNTERS_PORT");
        std::env::remove_var("ENCOUNTERS_SHUTDOWN_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_cors_config_from_env() {
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,");
        std::env::set_var("CORS_ALLOW_CREDENTIALS", "true");

        let cors = CorsConfig::from_env();
        assert_eq!(cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert!(cors.allow_credentials);

        std::env::remove_var("CORS_ALLOWED_ORIGINS");
        std::env::remove_var("CORS_ALLOW_CREDENTIALS");
    }
}
