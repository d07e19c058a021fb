//! The upload workspace: cached file list plus its mutation operations.

use crate::error::{FileError, Result};
use crate::types::{FileListResponse, FileUpload, MutationResponse, UploadOutcome, UploadedFile};
use bridge_traits::http::{HttpResponse, MultipartForm};
use core_api::ApiClient;
use core_runtime::events::{CoreEvent, EventBus, FileEvent};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Listing endpoint path.
pub const FILES_ROUTE: &str = "/file";

/// Upload endpoint path.
pub const UPLOAD_ROUTE: &str = "/file/upload";

/// Multipart field name the backend expects for uploads.
const UPLOAD_FIELD: &str = "file";

/// Cached view of the server's file set with upload and delete operations.
///
/// Consistency policy: the cached list is only ever replaced wholesale by
/// [`refresh`](FileWorkspace::refresh). Mutations never touch the cache
/// directly; on success they re-run `refresh`, on failure the list is left
/// unchanged. The displayed state therefore always equals the last
/// successful server read.
pub struct FileWorkspace {
    api: ApiClient,
    event_bus: EventBus,
    files: RwLock<Vec<UploadedFile>>,
}

impl FileWorkspace {
    /// Create a new workspace with an empty cached list.
    pub fn new(api: ApiClient, event_bus: EventBus) -> Self {
        Self {
            api,
            event_bus,
            files: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the cached file list.
    pub async fn files(&self) -> Vec<UploadedFile> {
        self.files.read().await.clone()
    }

    /// Fetch the current file set and replace the cached list wholesale.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<UploadedFile>> {
        let response = self.api.get(FILES_ROUTE).await?;

        if !response.is_success() {
            let message = body_message(&response);
            warn!(status = response.status, message = %message, "File listing failed");
            return Err(FileError::Api {
                status: response.status,
                message,
            });
        }

        let listing: FileListResponse = response
            .json()
            .map_err(|e| FileError::Parse(e.to_string()))?;

        let count = listing.files.len();
        {
            let mut files = self.files.write().await;
            *files = listing.files.clone();
        }

        debug!(count, "File list refreshed");
        self.event_bus
            .emit(CoreEvent::Files(FileEvent::ListRefreshed { count }))
            .ok();

        Ok(listing.files)
    }

    /// Upload a single file as a multipart payload.
    ///
    /// On success the file list is re-fetched; on failure the cached list is
    /// left unchanged and the error is surfaced.
    #[instrument(skip(self, upload), fields(filename = %upload.file_name))]
    pub async fn upload(&self, upload: FileUpload) -> Result<()> {
        let FileUpload {
            file_name,
            content_type,
            data,
        } = upload;

        info!(size = data.len(), "Uploading file");

        let form = MultipartForm::new().file(UPLOAD_FIELD, file_name.clone(), content_type, data);
        let response = self.api.post_multipart(UPLOAD_ROUTE, form).await?;

        let outcome = parse_mutation(&response)?;
        if !outcome.success {
            let message = outcome
                .message
                .unwrap_or_else(|| "Upload failed.".to_string());
            warn!(message = %message, "Upload rejected by backend");
            self.emit_failure(&message);
            return Err(FileError::Rejected { message });
        }

        info!("Upload accepted");
        self.event_bus
            .emit(CoreEvent::Files(FileEvent::Uploaded {
                filename: file_name,
            }))
            .ok();

        self.refresh().await?;
        Ok(())
    }

    /// Upload a host file selection.
    ///
    /// An empty selection is a no-op with a diagnostic; when multiple files
    /// are selected only the first is used.
    pub async fn upload_selection(&self, mut selection: Vec<FileUpload>) -> Result<UploadOutcome> {
        if selection.is_empty() {
            warn!("No file selected; nothing to upload");
            return Ok(UploadOutcome::Skipped);
        }

        if selection.len() > 1 {
            debug!(
                discarded = selection.len() - 1,
                "Multiple files selected; uploading the first only"
            );
        }

        let first = selection.swap_remove(0);
        let filename = first.file_name.clone();
        self.upload(first).await?;

        Ok(UploadOutcome::Uploaded { filename })
    }

    /// Delete a file by name.
    ///
    /// On success the file list is re-fetched; on failure the error is
    /// logged and the cached list is left unchanged.
    #[instrument(skip(self))]
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let path = format!("{}/{}", FILES_ROUTE, urlencoding::encode(filename));
        let response = self.api.delete(&path).await?;

        let outcome = parse_mutation(&response)?;
        if !outcome.success {
            let message = outcome
                .message
                .unwrap_or_else(|| "Delete failed.".to_string());
            warn!(filename = %filename, message = %message, "Delete rejected by backend");
            self.emit_failure(&message);
            return Err(FileError::Rejected { message });
        }

        info!(filename = %filename, "File deleted");
        self.event_bus
            .emit(CoreEvent::Files(FileEvent::Deleted {
                filename: filename.to_string(),
            }))
            .ok();

        self.refresh().await?;
        Ok(())
    }

    fn emit_failure(&self, message: &str) {
        self.event_bus
            .emit(CoreEvent::Files(FileEvent::OperationFailed {
                message: message.to_string(),
            }))
            .ok();
    }
}

/// Interpret a mutation response: non-success statuses become `Api` errors,
/// 2xx bodies must parse as `{success, message?}`.
fn parse_mutation(response: &HttpResponse) -> Result<MutationResponse> {
    if !response.is_success() {
        return Err(FileError::Api {
            status: response.status,
            message: body_message(response),
        });
    }

    response
        .json()
        .map_err(|e| FileError::Parse(e.to_string()))
}

/// Best-effort extraction of a human-readable message from a response body.
fn body_message(response: &HttpResponse) -> String {
    response
        .json::<MutationResponse>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}
