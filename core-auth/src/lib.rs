//! # Authentication Module
//!
//! Session domain for the FileShelf client core.
//!
//! ## Overview
//!
//! This module handles everything between the credential form and the stored
//! session token: synchronous field validation, the login/register form state
//! machines, single-token persistence through the platform secure store, and
//! the session manager driving the backend auth endpoints.
//!
//! ## Features
//!
//! - Field validation re-evaluated on every change, not only on submit
//! - Explicit form state machines (Editing → Submitting → Succeeded/Failed)
//! - Session token storage via platform-specific secure stores
//! - Auth state event emission

pub mod error;
pub mod form;
pub mod session;
pub mod token_store;
pub mod types;
pub mod validation;

pub use error::{AuthError, Result};
pub use form::{FormPhase, LoginForm, RegisterForm};
pub use session::SessionManager;
pub use token_store::TokenStore;
pub use types::{Credentials, Registration, SessionToken};
pub use validation::{Field, ValidationErrors};
