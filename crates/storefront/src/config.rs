//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `LA_REYNA_BACKEND_URL` - REST backend (default: <http://localhost:3001>)
//! - `LA_REYNA_ADMIN_URL` - Back-office URL; admins are sent there after login
//! - `CATALOG_SOURCE` - `static` (default) or `api`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::catalog::CatalogSource;

/// Default backend location.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// REST backend base URL
    pub backend_url: String,
    /// Back-office URL for admin users
    pub admin_url: Option<String>,
    /// Where the product list comes from
    pub catalog_source: CatalogSource,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        validate_url("STOREFRONT_BASE_URL", &base_url)?;

        let backend_url = get_env_or_default("LA_REYNA_BACKEND_URL", DEFAULT_BACKEND_URL);
        validate_url("LA_REYNA_BACKEND_URL", &backend_url)?;

        let admin_url = get_optional_env("LA_REYNA_ADMIN_URL");
        if let Some(url) = &admin_url {
            validate_url("LA_REYNA_ADMIN_URL", url)?;
        }

        let catalog_source = get_env_or_default("CATALOG_SOURCE", "static")
            .parse::<CatalogSource>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_SOURCE".to_string(), e))?;

        Ok(Self {
            host,
            port,
            base_url,
            backend_url,
            admin_url,
            catalog_source,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_sample_rate(
                "SENTRY_SAMPLE_RATE",
                &get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"),
            )?,
            sentry_traces_sample_rate: parse_sample_rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                &get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Check that a value is an absolute http(s) URL.
fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(())
}

/// Parse a Sentry sample rate in `0.0..=1.0`.
fn parse_sample_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: base_url.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            admin_url: None,
            catalog_source: CatalogSource::Static,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config("http://localhost:3000").socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        assert!(!config("http://localhost:3000").is_secure());
        assert!(config("https://lareyna.pe").is_secure());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("X", "http://localhost:3001").is_ok());
        assert!(validate_url("X", "https://api.lareyna.pe/").is_ok());
        assert!(validate_url("X", "localhost:3001").is_err());
        assert!(validate_url("X", "ftp://lareyna.pe").is_err());
    }

    #[test]
    fn test_parse_sample_rate() {
        assert!((parse_sample_rate("X", "0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate("X", "1.5").is_err());
        assert!(parse_sample_rate("X", "-0.1").is_err());
        assert!(matches!(
            parse_sample_rate("X", "half"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
