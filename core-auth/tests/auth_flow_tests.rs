//! End-to-end tests of the login and registration flows through the public
//! crate API, with the HTTP bridge and secure store mocked out.

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::storage::SecureStore;
use bytes::Bytes;
use core_api::ApiClient;
use core_auth::{AuthError, Field, LoginForm, RegisterForm, SessionManager, TokenStore};
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use mockall::mock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

mock! {
    Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

#[derive(Clone, Default)]
struct MemorySecureStore {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn set_secret(&self, key: &str, value: &[u8]) -> BridgeResult<()> {
        self.storage
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> BridgeResult<Option<Vec<u8>>> {
        Ok(self.storage.lock().await.get(key).cloned())
    }

    async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
        self.storage.lock().await.remove(key);
        Ok(())
    }
}

fn response(status: u16, body: &'static str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: Bytes::from_static(body.as_bytes()),
    }
}

/// Build an API client and a session manager sharing the same token store,
/// mirroring how the service façade wires them.
fn build_session(mock_http: MockHttp) -> (ApiClient, SessionManager, TokenStore, EventBus) {
    let token_store = TokenStore::new(Arc::new(MemorySecureStore::default()));
    let event_bus = EventBus::new(16);
    let api = ApiClient::new(
        Arc::new(mock_http),
        "http://localhost:5000/api",
        Arc::new(token_store.clone()),
    )
    .unwrap();
    let session = SessionManager::new(api.clone(), token_store.clone(), event_bus.clone());
    (api, session, token_store, event_bus)
}

#[tokio::test]
async fn login_flow_stores_token_and_authenticates_later_requests() {
    let mut mock_http = MockHttp::new();

    // Login goes out without a bearer header and yields a token
    mock_http
        .expect_execute()
        .withf(|req| req.url.ends_with("/user/login"))
        .times(1)
        .returning(|req| {
            assert!(!req.headers.contains_key("Authorization"));
            Ok(response(200, r#"{"token":"t1"}"#))
        });

    // A later non-auth request through the same client carries the token
    mock_http
        .expect_execute()
        .withf(|req| req.url.ends_with("/file"))
        .times(1)
        .returning(|req| {
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer t1".to_string())
            );
            Ok(response(200, r#"{"files":[]}"#))
        });

    let (api, session, token_store, event_bus) = build_session(mock_http);
    let mut events = event_bus.subscribe();

    let mut form = LoginForm::new();
    form.set_email("a@b.com");
    form.set_password("secret1");
    assert!(form.can_submit());

    form.submit(&session).await.unwrap();

    assert_eq!(token_store.get().await.unwrap().unwrap().as_str(), "t1");
    assert!(session.is_authenticated().await.unwrap());
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Auth(AuthEvent::SignedIn)
    );

    // The stored token is attached automatically on the next request
    let listing = api.get("/file").await.unwrap();
    assert!(listing.is_success());
}

#[tokio::test]
async fn invalid_credentials_scenario_matches_expected_errors() {
    let form = {
        let mut form = LoginForm::new();
        form.set_email("bad");
        form.set_password("123");
        form
    };

    assert_eq!(
        form.errors().get(Field::Email),
        Some("Invalid email address")
    );
    assert_eq!(
        form.errors().get(Field::Password),
        Some("Password must be at least 6 characters")
    );
    assert!(!form.can_submit());
}

#[tokio::test]
async fn registration_flow_redirects_to_login_without_token() {
    let mut mock_http = MockHttp::new();
    mock_http
        .expect_execute()
        .withf(|req| req.url.ends_with("/user/register"))
        .times(1)
        .returning(|_| Ok(response(200, r#"{"success":true}"#)));

    let (_api, session, token_store, event_bus) = build_session(mock_http);
    let mut events = event_bus.subscribe();

    let mut form = RegisterForm::new();
    form.set_email("a@b.com");
    form.set_password("abcdef");
    form.set_confirm_password("abcdef");

    form.submit(&session).await.unwrap();

    assert!(form.phase().is_succeeded());
    assert!(token_store.get().await.unwrap().is_none());
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Auth(AuthEvent::Registered)
    );
}

#[tokio::test]
async fn mismatched_confirmation_blocks_registration() {
    // No expectations: nothing may reach the network
    let (_api, session, _, _) = build_session(MockHttp::new());

    let mut form = RegisterForm::new();
    form.set_email("a@b.com");
    form.set_password("abcdef");
    form.set_confirm_password("abcxyz");

    let result = form.submit(&session).await;

    match result {
        Err(AuthError::Validation(errors)) => {
            assert_eq!(
                errors.get(Field::ConfirmPassword),
                Some("Passwords do not match")
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}
