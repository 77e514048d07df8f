//! # Application Configuration
//!
//! Everything the server needs at startup, read from environment variables
//! (a `.env` file is honored). Provider secrets live in their own config
//! structs and are handed to the adapters that use them.

use anyhow::{bail, Context};
use gym_core::CheckoutUrls;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEV_JWT_SECRET: &str = "gym-store-development-secret-change-me";

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }
}

/// Object storage configuration. No bucket means uploads stay in memory.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack)
    pub endpoint: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Frontend origin allowed by CORS
    pub cors_allowed_origin: String,
    /// Postgres connection string; in-memory stores when absent
    pub database_url: Option<String>,
    /// Redirect destinations for checkout sessions
    pub checkout_urls: CheckoutUrls,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let environment = env_or("ENVIRONMENT", "development");
        let defaults = CheckoutUrls::default();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt_expiration_secs: u64 =
            parse_var("JWT_EXPIRATION_SECS", env::var("JWT_EXPIRATION_SECS").ok(), 86_400)?;
        let port: u16 = parse_var("PORT", env::var("PORT").ok(), 8080)?;
        let max_upload_bytes: usize = parse_var(
            "MAX_UPLOAD_BYTES",
            env::var("MAX_UPLOAD_BYTES").ok(),
            DEFAULT_MAX_UPLOAD_BYTES,
        )?;

        Ok(Self {
            host: env_or("HOST", "127.0.0.1"),
            port,
            environment,
            cors_allowed_origin: env_or("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            checkout_urls: CheckoutUrls::new(
                env_or("CHECKOUT_SUCCESS_URL", &defaults.success_url),
                env_or("CHECKOUT_CANCEL_URL", &defaults.cancel_url),
            ),
            jwt: JwtConfig::new(jwt_secret, Duration::from_secs(jwt_expiration_secs)),
            storage: StorageConfig {
                bucket: env::var("S3_BUCKET").ok().filter(|b| !b.is_empty()),
                region: env::var("AWS_REGION").ok(),
                endpoint: env::var("S3_ENDPOINT").ok(),
            },
            max_upload_bytes,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    /// Local development defaults, independent of the environment
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            cors_allowed_origin: "http://localhost:5173".to_string(),
            database_url: None,
            checkout_urls: CheckoutUrls::default(),
            jwt: JwtConfig::new(DEV_JWT_SECRET, Duration::from_secs(86_400)),
            storage: StorageConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Parse an optional variable; a present but malformed value is an error.
fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.is_production());
        assert!(config.database_url.is_none());
        assert_eq!(config.checkout_urls.cancel_url, "http://localhost:5173/cart");
        assert_eq!(config.jwt.expiration, Duration::from_secs(86_400));
    }

    #[test]
    fn test_numeric_variables_reject_garbage() {
        assert_eq!(parse_var::<usize>("MAX_UPLOAD_BYTES", None, 42).unwrap(), 42);
        assert_eq!(
            parse_var::<usize>("MAX_UPLOAD_BYTES", Some("2048".into()), 42).unwrap(),
            2048
        );

        let err = parse_var::<usize>("MAX_UPLOAD_BYTES", Some("10MB".into()), 42).unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_BYTES"));

        assert!(parse_var::<u16>("PORT", Some("70000".into()), 8080).is_err());
        assert!(parse_var::<u64>("JWT_EXPIRATION_SECS", Some("-1".into()), 86_400).is_err());
    }
}
