//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the published store.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_CSV_URL` - Published spreadsheet CSV with the catalog
//! - `CATALOG_REVALIDATE_SECS` - Seconds a fetched catalog stays fresh (default: 10)
//! - `CHECKOUT_PHONE` - WhatsApp number receiving orders, international format
//! - `STORE_NAME` - Heading shown on every page (default: Almacency)
//! - `STORE_TAGLINE` - Subheading shown under the store name
//! - `SESSION_MAX_ENTRIES` - Sessions kept in memory before the least used are evicted (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use almacency_core::{CheckoutLink, CheckoutLinkError};
use thiserror::Error;
use url::Url;

/// Published Google Sheets CSV the store is managed from.
pub const DEFAULT_CATALOG_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTWCJ18xPPRt656JAF0zf1oTJhxIFWzycHiSovBIYR4RU5WNSlwtpBHCNx8i2c2Sa3aNAVhZ2GSWtG9/pub?output=csv";

/// Number that receives checkout messages.
pub const DEFAULT_CHECKOUT_PHONE: &str = "543886050010";

const DEFAULT_REVALIDATE_SECS: u64 = 10;

const DEFAULT_SESSION_MAX_ENTRIES: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid checkout phone: {0}")]
    CheckoutPhone(#[from] CheckoutLinkError),
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
    /// Catalog feed configuration
    pub catalog: CatalogConfig,
    /// Messaging checkout link for the store's phone number
    pub checkout: CheckoutLink,
    /// Branding shown in the page header
    pub store: StoreBranding,
    /// Upper bound on sessions held by the in-memory store
    pub session_max_entries: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Where the catalog comes from and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// CSV document URL
    pub csv_url: Url,
    /// Time a successfully fetched catalog is served before refetching
    pub revalidate: Duration,
}

/// Store name and tagline.
#[derive(Debug, Clone)]
pub struct StoreBranding {
    pub name: String,
    pub tagline: String,
}

impl Default for StoreBranding {
    fn default() -> Self {
        Self {
            name: "Almacency".to_string(),
            tagline: "Tu almacén de confianza".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1", |v| v.parse::<IpAddr>())?;
        let port = parse_env("STOREFRONT_PORT", "3000", |v| v.parse::<u16>())?;
        let base_url = parse_env("STOREFRONT_BASE_URL", "http://localhost:3000", Url::parse)?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let catalog = CatalogConfig::from_env()?;
        let checkout = CheckoutLink::new(&get_env_or_default(
            "CHECKOUT_PHONE",
            DEFAULT_CHECKOUT_PHONE,
        ))?;

        let defaults = StoreBranding::default();
        let store = StoreBranding {
            name: get_env_or_default("STORE_NAME", &defaults.name),
            tagline: get_env_or_default("STORE_TAGLINE", &defaults.tagline),
        };
        let session_max_entries = parse_env(
            "SESSION_MAX_ENTRIES",
            &DEFAULT_SESSION_MAX_ENTRIES.to_string(),
            |v| v.parse::<u64>(),
        )?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            checkout,
            store,
            session_max_entries,
            sentry_dsn,
        })
    }

    /// Default configuration reading the catalog from `csv_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the default checkout phone is invalid.
    pub fn for_catalog(csv_url: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogConfig {
                csv_url,
                revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            },
            checkout: CheckoutLink::new(DEFAULT_CHECKOUT_PHONE)?,
            store: StoreBranding::default(),
            session_max_entries: DEFAULT_SESSION_MAX_ENTRIES,
            sentry_dsn: None,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let csv_url = parse_env("CATALOG_CSV_URL", DEFAULT_CATALOG_CSV_URL, Url::parse)?;
        let revalidate_secs = parse_env(
            "CATALOG_REVALIDATE_SECS",
            &DEFAULT_REVALIDATE_SECS.to_string(),
            |v| v.parse::<u64>(),
        )?;

        Ok(Self {
            csv_url,
            revalidate: Duration::from_secs(revalidate_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) with `parse`.
fn parse_env<T, E: std::fmt::Display>(
    key: &str,
    default: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError> {
    let value = get_env_or_default(key, default);
    parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig::for_catalog(Url::parse(DEFAULT_CATALOG_CSV_URL).unwrap()).unwrap()
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = test_config();
        assert!(!config.is_secure());

        config.base_url = "https://almacency.com.ar".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_for_catalog_defaults() {
        let config = test_config();
        assert_eq!(config.catalog.revalidate, Duration::from_secs(10));
        assert_eq!(config.checkout.phone(), DEFAULT_CHECKOUT_PHONE);
        assert_eq!(config.store.name, "Almacency");
        assert_eq!(config.session_max_entries, 10_000);
    }

    #[test]
    fn test_default_catalog_url_parses() {
        let url = Url::parse(DEFAULT_CATALOG_CSV_URL).unwrap();
        assert_eq!(url.host_str(), Some("docs.google.com"));
        assert_eq!(url.query(), Some("output=csv"));
    }

    #[test]
    fn test_parse_env_uses_default_for_unset_key() {
        let port = parse_env("ALMACENCY_TEST_UNSET_PORT", "3000", |v| v.parse::<u16>()).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_reports_key_on_failure() {
        let err = parse_env("ALMACENCY_TEST_UNSET_PORT", "not-a-port", |v| {
            v.parse::<u16>()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ALMACENCY_TEST_UNSET_PORT"));
    }
}
