//! Session manager driving the backend auth endpoints.
//!
//! The manager owns the login/register/logout flows: it sends credentials
//! through the [`ApiClient`](core_api::ApiClient), stores the issued token,
//! and emits auth events for hosts to navigate on. Failure messages surfaced
//! to users stay generic; the backend's own error text is logged only.

use crate::error::{AuthError, Result};
use crate::token_store::TokenStore;
use crate::types::{Credentials, Registration, SessionToken};
use bridge_traits::http::HttpResponse;
use core_api::ApiClient;
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Login endpoint path.
pub const LOGIN_ROUTE: &str = "/user/login";

/// Register endpoint path.
pub const REGISTER_ROUTE: &str = "/user/register";

/// Generic message surfaced when login is rejected.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed.";

/// Generic message surfaced when registration is rejected.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed.";

/// Wire body for both auth endpoints. Only email and password ever leave
/// the client.
#[derive(Serialize)]
struct AuthRequestBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponseBody {
    token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// High-level session operations: login, register, logout.
///
/// Cheap to clone; clones share the token store and event bus.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    token_store: TokenStore,
    event_bus: EventBus,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(api: ApiClient, token_store: TokenStore, event_bus: EventBus) -> Self {
        Self {
            api,
            token_store,
            event_bus,
        }
    }

    /// The token store backing this session.
    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }

    /// Attempt to log in with the given credentials.
    ///
    /// On success the issued token is stored and [`AuthEvent::SignedIn`] is
    /// emitted. A rejection or a response without a token yields
    /// [`AuthError::AuthenticationFailed`]; the server's error detail is
    /// logged, never surfaced.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let body = AuthRequestBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self.api.post_json(LOGIN_ROUTE, &body).await?;

        if !response.is_success() {
            let detail = server_error(&response);
            warn!(status = response.status, detail = %detail, "Login rejected by backend");
            self.emit_auth_failure(LOGIN_FAILED_MESSAGE);
            return Err(AuthError::AuthenticationFailed);
        }

        let parsed: LoginResponseBody = match response.json() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Login response was not valid JSON");
                self.emit_auth_failure(LOGIN_FAILED_MESSAGE);
                return Err(AuthError::AuthenticationFailed);
            }
        };

        match parsed.token {
            Some(token) if !token.is_empty() => {
                self.token_store.store(&SessionToken::new(token)).await?;
                info!("Login succeeded");
                self.event_bus
                    .emit(CoreEvent::Auth(AuthEvent::SignedIn))
                    .ok();
                Ok(())
            }
            _ => {
                warn!("Login response carried no token");
                self.emit_auth_failure(LOGIN_FAILED_MESSAGE);
                Err(AuthError::AuthenticationFailed)
            }
        }
    }

    /// Register a new account.
    ///
    /// The password confirmation was already checked by the form and never
    /// leaves the client. No token is stored; hosts navigate to the login
    /// form on [`AuthEvent::Registered`].
    #[instrument(skip(self, registration))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let body = AuthRequestBody {
            email: &registration.email,
            password: &registration.password,
        };
        let response = self.api.post_json(REGISTER_ROUTE, &body).await?;

        if !response.is_success() {
            let detail = server_error(&response);
            warn!(status = response.status, detail = %detail, "Registration rejected by backend");
            self.emit_auth_failure(REGISTRATION_FAILED_MESSAGE);
            return Err(AuthError::RegistrationFailed);
        }

        info!("Registration succeeded");
        self.event_bus
            .emit(CoreEvent::Auth(AuthEvent::Registered))
            .ok();
        Ok(())
    }

    /// Clear the stored session token.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.token_store.clear().await?;
        info!("Signed out");
        self.event_bus
            .emit(CoreEvent::Auth(AuthEvent::SignedOut))
            .ok();
        Ok(())
    }

    /// Token presence implies "authenticated"; no expiry is tracked locally.
    pub async fn is_authenticated(&self) -> Result<bool> {
        self.token_store.is_present().await
    }

    fn emit_auth_failure(&self, message: &str) {
        self.event_bus
            .emit(CoreEvent::Auth(AuthEvent::AuthFailed {
                message: message.to_string(),
            }))
            .ok();
    }
}

/// Best-effort extraction of the backend's error detail for logging.
fn server_error(response: &HttpResponse) -> String {
    response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}
