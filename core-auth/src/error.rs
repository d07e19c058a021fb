use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Local field validation failed; submission is blocked.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Login failed")]
    AuthenticationFailed,

    #[error("Registration failed")]
    RegistrationFailed,

    #[error("Secure storage unavailable: {0}")]
    SecureStorageUnavailable(String),

    #[error("Stored session token is corrupted: {0}")]
    TokenCorrupted(String),

    #[error(transparent)]
    Api(#[from] core_api::ApiError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
