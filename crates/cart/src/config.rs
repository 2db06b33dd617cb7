//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `CART_API_URL` - Catalog API base URL (default: `http://localhost:3333`)
//! - `CART_API_TOKEN` - Bearer token sent to the catalog API
//! - `CART_API_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `CART_PRODUCT_CACHE_TTL_SECS` - Product detail cache TTL, 0 disables (default: 300)
//! - `CART_STORAGE_DIR` - Directory holding the persistence slot (default: `.rocketshoes`)
//! - `CART_STORAGE_KEY` - Persistence slot key (default: `@RocketShoes:cart`)
//! - `CART_CURRENCY` - Currency used for cart totals (default: `BRL`)

use std::path::PathBuf;
use std::time::Duration;

use rocketshoes_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PRODUCT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
/// Slot key used by the storefront for the cart blob.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Persistence slot configuration
    pub storage: StorageConfig,
    /// Currency used when summarizing the cart
    pub currency: CurrencyCode,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL serving `/stock/{id}` and `/products/{id}`
    pub api_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// TTL for cached product details (zero disables the cache)
    pub product_cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .finish()
    }
}

impl CatalogConfig {
    /// Configuration for `api_url` with default timeout and cache TTL.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            product_cache_ttl: Duration::from_secs(DEFAULT_PRODUCT_CACHE_TTL_SECS),
        }
    }
}

/// Persistence slot configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the slot files
    pub dir: PathBuf,
    /// Slot key
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = get_or_default(&lookup, "CART_API_URL", DEFAULT_API_URL);
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CART_API_URL".to_string(), e.to_string()))?;

        let catalog = CatalogConfig {
            api_url,
            api_token: lookup("CART_API_TOKEN")
                .filter(|token| !token.trim().is_empty())
                .map(SecretString::from),
            timeout: Duration::from_secs(get_secs(
                &lookup,
                "CART_API_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            product_cache_ttl: Duration::from_secs(get_secs(
                &lookup,
                "CART_PRODUCT_CACHE_TTL_SECS",
                DEFAULT_PRODUCT_CACHE_TTL_SECS,
            )?),
        };

        let storage = StorageConfig {
            dir: PathBuf::from(get_or_default(
                &lookup,
                "CART_STORAGE_DIR",
                DEFAULT_STORAGE_DIR,
            )),
            key: get_or_default(&lookup, "CART_STORAGE_KEY", DEFAULT_STORAGE_KEY),
        };

        let currency = get_or_default(&lookup, "CART_CURRENCY", CurrencyCode::BRL.code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e.to_string()))?;

        Ok(Self {
            catalog,
            storage,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a whole number of seconds.
fn get_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
