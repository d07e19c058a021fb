//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP, secure
//! storage) and the resolved configuration into the session manager and the
//! upload workspace. Desktop apps typically enable the `desktop-shims`
//! feature, which fills in reqwest- and keyring-based defaults for any
//! bridge the host does not inject.
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use core_service::CoreService;
//!
//! let config = CoreConfig::builder().build()?;
//! let core = CoreService::new(config)?;
//!
//! let mut events = core.subscribe();
//! core.session().login(&credentials).await?;
//! core.files().refresh().await?;
//! ```

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use core_api::ApiClient;
use core_auth::{SessionManager, TokenStore};
use core_files::FileWorkspace;
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, Receiver};

/// Primary façade exposed to host applications.
///
/// Holds one API client, one session manager, and one upload workspace, all
/// sharing the same token store and event bus. Cheap to clone.
#[derive(Clone)]
pub struct CoreService {
    session: SessionManager,
    files: Arc<FileWorkspace>,
    event_bus: EventBus,
}

impl CoreService {
    /// Wire the core from a validated configuration.
    pub fn new(config: CoreConfig) -> Result<Self> {
        let event_bus = EventBus::default();
        let token_store = TokenStore::new(config.secure_store.clone());

        let api = ApiClient::new(
            config.http_client.clone(),
            &config.api_base_url,
            Arc::new(token_store.clone()),
        )
        .map_err(|e| CoreError::InitializationFailed(e.to_string()))?;

        let session = SessionManager::new(api.clone(), token_store, event_bus.clone());
        let files = Arc::new(FileWorkspace::new(api, event_bus.clone()));

        Ok(Self {
            session,
            files,
            event_bus,
        })
    }

    /// Session operations: login, register, logout.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// The upload workspace.
    pub fn files(&self) -> Arc<FileWorkspace> {
        Arc::clone(&self.files)
    }

    /// Subscribe to core events (auth state changes, file operations).
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.event_bus.subscribe()
    }
}
