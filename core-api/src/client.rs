//! Backend API client with bearer-token request interception.

use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ApiError, Result};

/// Source of the current session token.
///
/// The API client consults this before every request. The session domain
/// implements it on top of its token store; tests substitute fixed values.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// The current session token, or `None` when signed out.
    async fn current(&self) -> std::result::Result<Option<String>, BridgeError>;
}

/// Paths exempt from bearer attachment.
///
/// Login and register are always sent unauthenticated, even when a stale
/// token is still present in the store.
fn is_auth_route(path: &str) -> bool {
    path.contains("/login") || path.contains("/register")
}

/// HTTP client wrapper for the FileShelf backend API.
///
/// All outbound requests go through this type, which:
/// - joins request paths onto the configured base URL,
/// - attaches `Authorization: Bearer <token>` to non-auth routes when a
///   token is available,
/// - passes transport errors through to the caller unchanged.
///
/// # Example
///
/// ```ignore
/// use core_api::ApiClient;
///
/// let api = ApiClient::new(http_client, "http://localhost:5000/api", tokens)?;
/// let response = api.get("/file").await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP bridge for request execution
    http: Arc<dyn HttpClient>,

    /// Base URL with any trailing slash removed
    base_url: String,

    /// Session token lookup
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` does not parse as
    /// an http(s) URL.
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self> {
        let base_url = base_url.into();

        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url,
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// The configured base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a request path onto the base URL.
    ///
    /// Plain concatenation with slash normalization: the base URL's path
    /// prefix (e.g. `/api`) is always preserved, unlike RFC 3986 reference
    /// resolution of an absolute path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request for `path` with the bearer policy applied.
    async fn prepare(&self, method: HttpMethod, path: &str) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(method, self.endpoint(path));

        if !is_auth_route(path) {
            if let Some(token) = self.tokens.current().await? {
                request = request.bearer_token(token);
            }
        }

        Ok(request)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, method = ?request.method, "Dispatching API request");
        let response = self.http.execute(request).await?;
        debug!(status = response.status, "API response received");
        Ok(response)
    }

    /// Issue a GET request.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        let request = self.prepare(HttpMethod::Get, path).await?;
        self.execute(request).await
    }

    /// Issue a POST request with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<HttpResponse> {
        let request = self.prepare(HttpMethod::Post, path).await?.json(body)?;
        self.execute(request).await
    }

    /// Issue a POST request with a multipart body.
    #[instrument(skip(self, form))]
    pub async fn post_multipart(&self, path: &str, form: MultipartForm) -> Result<HttpResponse> {
        let request = self.prepare(HttpMethod::Post, path).await?.multipart(form);
        self.execute(request).await
    }

    /// Issue a DELETE request.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<HttpResponse> {
        let request = self.prepare(HttpMethod::Delete, path).await?;
        self.execute(request).await
    }
}
