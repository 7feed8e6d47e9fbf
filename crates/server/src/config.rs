//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_ACCESS_TOKEN` - API access token (sent as a bearer credential)
//! - `SHOPIFY_STORE_URL` - Store base URL (e.g., <https://your-store.myshopify.com>)
//! - `SHOPIFY_API_URL` - GraphQL endpoint URL
//!
//! ## Optional
//! - `SHOPIFY_TOOLS_<CATEGORY>` - Per-category boolean flags (see `resolver`)
//! - `SHOPIFY_TOOL_CATEGORIES` - Legacy combined category list (see `resolver`)
//! - `RUST_LOG` - Tracing filter (default: `shoptools_server=info`)
//! - `LOG_FORMAT` - Set to `json` for structured log output
//!
//! All lookups go through an [`Environment`] snapshot taken once at the
//! composition root, so tests inject literal maps instead of mutating the
//! process environment.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
///
/// Any of these is fatal at startup: there is no degraded mode without
/// credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Immutable snapshot of key/value configuration.
///
/// Built once from the process environment in `main` and passed by
/// reference to the resolver and the client config loader.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build an environment from literal pairs (used by tests).
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Returns `None` when unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether the variable is present at all, regardless of value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

/// Connection configuration for the storefront API.
///
/// All three values are required; loading fails atomically if any is
/// absent, so a partially-configured client never exists. Implements
/// `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// API access token (bearer credential).
    pub access_token: SecretString,
    /// Store base URL (e.g., <https://your-store.myshopify.com>).
    pub store_url: String,
    /// GraphQL endpoint URL requests are POSTed to.
    pub api_url: String,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("access_token", &"[REDACTED]")
            .field("store_url", &self.store_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load the client configuration from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any of the three required variables is
    /// missing, or if either URL does not parse.
    pub fn from_environment(env: &Environment) -> Result<Self, ConfigError> {
        let access_token = get_required(env, "SHOPIFY_ACCESS_TOKEN")?;
        let store_url = get_required_url(env, "SHOPIFY_STORE_URL")?;
        let api_url = get_required_url(env, "SHOPIFY_API_URL")?;

        Ok(Self {
            access_token: SecretString::from(access_token),
            store_url,
            api_url,
        })
    }

    /// Expose the access token for header construction.
    #[must_use]
    pub fn token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

/// Get a required variable from the snapshot.
fn get_required(env: &Environment, key: &str) -> Result<String, ConfigError> {
    env.get(key)
        .map(String::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required variable and validate it parses as a URL.
fn get_required_url(env: &Environment, key: &str) -> Result<String, ConfigError> {
    let value = get_required(env, key)?;
    Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value)
}
