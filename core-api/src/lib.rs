//! # Backend API Client
//!
//! Single point of outbound HTTP requests to the FileShelf backend.
//!
//! ## Overview
//!
//! The [`ApiClient`](client::ApiClient) joins request paths onto a configured
//! base URL and applies the bearer-attachment policy: when a session token is
//! available and the target path is not an auth route (login/register), the
//! token is attached as an `Authorization: Bearer` header. Callers never
//! manage authentication headers themselves.
//!
//! The token is looked up through the [`TokenSource`](client::TokenSource)
//! seam, so the session context is an explicit injected object rather than a
//! hidden global.
//!
//! ## Failure Semantics
//!
//! Transport errors pass through as [`ApiError::Bridge`](error::ApiError).
//! Non-success HTTP statuses are returned to the caller in the response; the
//! client performs no retry and no error transformation.

pub mod client;
pub mod error;

pub use client::{ApiClient, TokenSource};
pub use error::{ApiError, Result};
