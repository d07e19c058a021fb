//! Session Token Storage
//!
//! Persists the single session token using the platform-specific secure
//! store, so the session survives process restarts.
//!
//! ## Security
//!
//! - The token value is never logged or exposed in error messages
//! - Storage goes through the injected `SecureStore` trait
//! - Corrupted stored data is deleted on read
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::{TokenStore, SessionToken};
//! use std::sync::Arc;
//! # use bridge_traits::storage::SecureStore;
//! # async fn example(secure_store: Arc<dyn SecureStore>) -> core_auth::Result<()> {
//! let token_store = TokenStore::new(secure_store);
//!
//! token_store.store(&SessionToken::new("t1")).await?;
//! let current = token_store.get().await?;
//! token_store.clear().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::SessionToken;
use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::storage::SecureStore;
use core_api::TokenSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key under which the session token lives.
///
/// A single fixed key keeps the invariant that the store holds at most one
/// token at a time.
const TOKEN_KEY: &str = "session_token";

/// Persistent store for the session token.
///
/// Cheap to clone; all clones share the underlying secure store.
#[derive(Clone)]
pub struct TokenStore {
    secure_store: Arc<dyn SecureStore>,
}

impl TokenStore {
    /// Create a new token store over a platform secure store.
    pub fn new(secure_store: Arc<dyn SecureStore>) -> Self {
        debug!("Initializing TokenStore");
        Self { secure_store }
    }

    /// Persist the session token, overwriting any previous one.
    pub async fn store(&self, token: &SessionToken) -> Result<()> {
        self.secure_store
            .set_secret(TOKEN_KEY, token.as_str().as_bytes())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to store session token");
                AuthError::SecureStorageUnavailable(e.to_string())
            })?;

        info!("Session token stored");
        Ok(())
    }

    /// Retrieve the current session token.
    ///
    /// Returns `Ok(None)` when no token is stored. Corrupted stored data is
    /// deleted and reported as [`AuthError::TokenCorrupted`].
    pub async fn get(&self) -> Result<Option<SessionToken>> {
        let data = self.secure_store.get_secret(TOKEN_KEY).await.map_err(|e| {
            warn!(error = %e, "Failed to read session token from secure storage");
            AuthError::SecureStorageUnavailable(e.to_string())
        })?;

        let Some(data) = data else {
            debug!("No session token in storage");
            return Ok(None);
        };

        match String::from_utf8(data) {
            Ok(value) => Ok(Some(SessionToken::new(value))),
            Err(e) => {
                warn!("Stored session token is not valid UTF-8, deleting it");

                if let Err(delete_err) = self.secure_store.delete_secret(TOKEN_KEY).await {
                    warn!(error = %delete_err, "Failed to delete corrupted token data");
                }

                Err(AuthError::TokenCorrupted(e.to_string()))
            }
        }
    }

    /// Remove the session token.
    ///
    /// Idempotent: succeeds even when no token is stored.
    pub async fn clear(&self) -> Result<()> {
        self.secure_store.delete_secret(TOKEN_KEY).await.map_err(|e| {
            warn!(error = %e, "Failed to delete session token");
            AuthError::SecureStorageUnavailable(e.to_string())
        })?;

        info!("Session token cleared");
        Ok(())
    }

    /// Whether a token is currently stored, without retrieving it.
    pub async fn is_present(&self) -> Result<bool> {
        self.secure_store.has_secret(TOKEN_KEY).await.map_err(|e| {
            warn!(error = %e, "Failed to check session token presence");
            AuthError::SecureStorageUnavailable(e.to_string())
        })
    }
}

#[async_trait]
impl TokenSource for TokenStore {
    async fn current(&self) -> std::result::Result<Option<String>, BridgeError> {
        self.get()
            .await
            .map(|token| token.map(SessionToken::into_string))
            .map_err(|e| BridgeError::OperationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// Mock implementation of SecureStore for testing
    #[derive(Clone, Default)]
    struct MockSecureStore {
        storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    #[async_trait]
    impl SecureStore for MockSecureStore {
        async fn set_secret(&self, key: &str, value: &[u8]) -> bridge_traits::error::Result<()> {
            let mut storage = self.storage.lock().await;
            storage.insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn get_secret(&self, key: &str) -> bridge_traits::error::Result<Option<Vec<u8>>> {
            let storage = self.storage.lock().await;
            Ok(storage.get(key).cloned())
        }

        async fn delete_secret(&self, key: &str) -> bridge_traits::error::Result<()> {
            let mut storage = self.storage.lock().await;
            storage.remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_and_get_token() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        token_store
            .store(&SessionToken::new("t1"))
            .await
            .expect("Failed to store token");

        let retrieved = token_store
            .get()
            .await
            .expect("Failed to retrieve token")
            .expect("Token not found");

        assert_eq!(retrieved.as_str(), "t1");
    }

    #[tokio::test]
    async fn test_get_without_stored_token() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        let result = token_store.get().await.expect("Failed to check for token");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites_previous_token() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        token_store.store(&SessionToken::new("t1")).await.unwrap();
        token_store.store(&SessionToken::new("t2")).await.unwrap();

        let retrieved = token_store.get().await.unwrap().unwrap();
        assert_eq!(retrieved.as_str(), "t2");
    }

    #[tokio::test]
    async fn test_clear_token() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        token_store.store(&SessionToken::new("t1")).await.unwrap();
        assert!(token_store.is_present().await.unwrap());

        token_store.clear().await.unwrap();
        assert!(!token_store.is_present().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_without_stored_token() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        // Clear should succeed even if no token exists
        token_store
            .clear()
            .await
            .expect("Clear should succeed for nonexistent token");
    }

    #[tokio::test]
    async fn test_corrupted_token_is_deleted_and_reported() {
        let secure_store = Arc::new(MockSecureStore::default());
        secure_store
            .set_secret(TOKEN_KEY, &[0xff, 0xfe, 0x80])
            .await
            .unwrap();

        let token_store = TokenStore::new(secure_store.clone());

        let result = token_store.get().await;
        assert!(matches!(result, Err(AuthError::TokenCorrupted(_))));

        // The corrupted value is gone afterwards
        assert!(secure_store.get_secret(TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_source_exposes_current_value() {
        let token_store = TokenStore::new(Arc::new(MockSecureStore::default()));

        assert_eq!(token_store.current().await.unwrap(), None);

        token_store.store(&SessionToken::new("t1")).await.unwrap();
        assert_eq!(
            token_store.current().await.unwrap(),
            Some("t1".to_string())
        );
    }
}
