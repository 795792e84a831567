//! Application configuration
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Default backend address for the contact form client
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Marketing page assets directory
    pub frontend_dir: String,
    /// CORS allowed origins (production only)
    pub cors_origins: Vec<String>,
    /// Environment (development/production)
    pub environment: Environment,
    /// Trusted proxy IP prefixes (e.g., ["10.0.0.", "172.16."])
    /// Only trust X-Forwarded-For headers from these IPs
    pub trusted_proxies: Vec<String>,
    /// Bearer token for the lead management endpoints; `None` disables them
    pub admin_api_token: Option<String>,
    /// Contact form submissions allowed per IP per hour
    pub max_contact_attempts: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match var("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        };

        let port = match var("PORT") {
            Some(p) => p.parse().map_err(|_| {
                ConfigError::Invalid(format!("PORT must be a port number, got '{}'", p))
            })?,
            None => 8001,
        };

        let max_contact_attempts = match var("MAX_CONTACT_ATTEMPTS") {
            Some(n) => n.parse().map_err(|_| {
                ConfigError::Invalid(format!("MAX_CONTACT_ATTEMPTS must be a number, got '{}'", n))
            })?,
            None => 10,
        };

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: database_url(&var)?,
            frontend_dir: var("FRONTEND_DIR").unwrap_or_else(|| "./frontend".to_string()),
            cors_origins: var("CORS_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]),
            environment,
            // Examples: "10.0.0.", "172.16.", "127.0.0.1"
            trusted_proxies: var("TRUSTED_PROXIES")
                .map(|s| split_list(&s))
                .unwrap_or_default(),
            admin_api_token: var("ADMIN_API_TOKEN").filter(|t| !t.trim().is_empty()),
            max_contact_attempts,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build DATABASE_URL from various env var formats:
/// 1. DATABASE_URL (standard)
/// 2. DATABASE_SERVER_FULL (platform alias)
/// 3. Individual components: DATABASE_SERVER_HOST, DATABASE_SERVER_PORT,
///    DATABASE_SERVER_USER, DATABASE_PASSWORD, DATABASE_DB
fn database_url<F>(var: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = var("DATABASE_URL").or_else(|| var("DATABASE_SERVER_FULL")) {
        return Ok(url);
    }

    let components = (|| {
        let host = var("DATABASE_SERVER_HOST")?;
        let port = var("DATABASE_SERVER_PORT").unwrap_or_else(|| "5432".to_string());
        let user = var("DATABASE_SERVER_USER")?;
        let password = var("DATABASE_PASSWORD")?;
        let db = var("DATABASE_DB")?;
        Some(format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, db))
    })();

    components.ok_or_else(|| {
        ConfigError::Missing(
            "DATABASE_URL, DATABASE_SERVER_FULL, or DATABASE_SERVER_HOST + DATABASE_SERVER_USER + DATABASE_PASSWORD + DATABASE_DB is required".to_string(),
        )
    })
}

/// Backend base URL for the contact form transport, read once at startup
pub fn backend_url_from_env() -> String {
    dotenvy::dotenv().ok();
    env::var("BACKEND_URL")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/etana")]))
            .unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8001");
        assert_eq!(config.frontend_dir, "./frontend");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.max_contact_attempts, 10);
        assert!(config.admin_api_token.is_none());
        assert!(config.trusted_proxies.is_empty());
    }

    #[test]
    fn test_database_url_missing() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_database_url_from_components() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_SERVER_HOST", "db"),
            ("DATABASE_SERVER_USER", "etana"),
            ("DATABASE_PASSWORD", "secret"),
            ("DATABASE_DB", "leads"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://etana:secret@db:5432/leads");
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            Config::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/etana"),
                ("PORT", "eighty"),
            ])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_production_lists() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/etana"),
            ("ENVIRONMENT", "Prod"),
            ("CORS_ORIGINS", "https://etanainteriors.co.ke, https://www.etanainteriors.co.ke"),
            ("TRUSTED_PROXIES", "10.0.0.,,172.16."),
            ("ADMIN_API_TOKEN", "  "),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.trusted_proxies, vec!["10.0.0.", "172.16."]);
        assert!(config.admin_api_token.is_none());
    }
}
