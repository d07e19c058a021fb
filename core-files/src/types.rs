//! Upload workspace data types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A server-owned uploaded file.
///
/// The client holds these only as a read-only cached list, replaced
/// wholesale after every successful server read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name as known to the backend
    pub filename: String,

    /// Direct URL for downloading or linking the file
    pub url: String,
}

/// Backend response for `GET /file`.
#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<UploadedFile>,
}

/// Backend response for upload and delete mutations.
#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// A locally selected file to transmit.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Name the backend should store the file under
    pub file_name: String,

    /// MIME type, when the host knows it
    pub content_type: Option<String>,

    /// File contents
    pub data: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Result of handing a host file selection to the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The (first) selected file was uploaded.
    Uploaded { filename: String },

    /// The selection was empty; nothing was sent.
    Skipped,
}
