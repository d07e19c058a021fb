//! Error types for the backend API client

use thiserror::Error;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base URL does not parse as an http(s) URL
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Transport-level failure, passed through from the HTTP bridge
    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;
