//! Error types for the upload workspace

use thiserror::Error;

/// Upload workspace errors
#[derive(Error, Debug)]
pub enum FileError {
    /// The backend answered with `success: false`
    #[error("Backend rejected the operation: {message}")]
    Rejected { message: String },

    /// The backend answered with a non-success HTTP status
    #[error("File API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed
    #[error("Failed to parse file API response: {0}")]
    Parse(String),

    /// Transport-level failure, passed through from the API client
    #[error(transparent)]
    Client(#[from] core_api::ApiError),
}

/// Result type for upload workspace operations
pub type Result<T> = std::result::Result<T, FileError>;
