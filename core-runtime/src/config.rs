//! # Core Configuration Module
//!
//! Provides configuration management for the FileShelf client core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the backend base URL and all bridge dependencies. It
//! enforces fail-fast validation so that a missing capability or a malformed
//! base URL is reported at startup instead of on the first request.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - Outbound HTTP (desktop default: reqwest)
//! - `SecureStore` - Session token persistence (desktop default: keyring)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected automatically if not provided.
//!
//! ## Base URL Resolution
//!
//! The backend base URL is resolved in order:
//! 1. an explicit `.api_base_url(...)` value,
//! 2. the `FILESHELF_API_BASE_URL` environment variable,
//! 3. the default `http://localhost:5000/api`.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://vault.example.com/api")
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, SecureStore};
use std::sync::Arc;
use url::Url;

/// Base URL used when neither the builder nor the environment supplies one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable consulted for the backend base URL.
pub const API_BASE_URL_ENV: &str = "FILESHELF_API_BASE_URL";

/// Core configuration for the FileShelf client core.
///
/// This struct holds all dependencies and settings required to initialize
/// the core. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Backend API base URL
    pub api_base_url: String,

    /// HTTP client for making API requests
    pub http_client: Arc<dyn HttpClient>,

    /// Secure credential storage for the session token
    pub secure_store: Arc<dyn SecureStore>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_base_url", &self.api_base_url)
            .field("http_client", &"HttpClient { ... }")
            .field("secure_store", &"SecureStore { ... }")
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks that the base URL parses and uses an http(s) scheme.
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API base URL must use http or https, got {}",
                parsed.scheme()
            )));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for backend requests. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Other hosts: inject a platform-native HTTP adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn secure_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "SecureStore".to_string(),
        message: "SecureStore implementation is required for session token persistence. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default KeyringSecureStore. \
                 Mobile: inject platform-native secure storage (Keychain/Keystore). \
                 Web: inject WebCrypto-based secure storage."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_secure_store() -> Result<Arc<dyn SecureStore>> {
    use bridge_desktop::KeyringSecureStore;

    let store: Arc<dyn SecureStore> = Arc::new(KeyringSecureStore::new());
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_secure_store() -> Result<Arc<dyn SecureStore>> {
    Err(secure_store_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_base_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
}

impl CoreConfigBuilder {
    /// Sets the backend API base URL.
    ///
    /// When not set, the `FILESHELF_API_BASE_URL` environment variable is
    /// consulted, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) is used when the
    /// `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the secure store implementation.
    ///
    /// The secure store persists the session token across restarts. It must
    /// provide platform-appropriate security (Keychain on macOS, Credential
    /// Manager on Windows, Secret Service on Linux).
    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - Required bridges are missing (HttpClient, SecureStore)
    /// - The resolved base URL is not a valid http(s) URL
    pub fn build(self) -> Result<CoreConfig> {
        let api_base_url = self
            .api_base_url
            .or_else(|| std::env::var(API_BASE_URL_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let secure_store = match self.secure_store {
            Some(store) => store,
            None => provide_default_secure_store()?,
        };

        let config = CoreConfig {
            api_base_url,
            http_client,
            secure_store,
        };

        config.validate()?;

        Ok(config)
    }
}
