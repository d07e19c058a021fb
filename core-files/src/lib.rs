//! # Upload Workspace
//!
//! File listing, upload, and deletion against the FileShelf backend.
//!
//! ## Overview
//!
//! The [`FileWorkspace`](workspace::FileWorkspace) keeps a read-only cached
//! copy of the server's file list. The client never updates that list
//! optimistically: every successful mutation (upload or delete) is followed
//! by a full re-fetch, so the displayed state always reflects the last
//! successful server read.

pub mod error;
pub mod types;
pub mod workspace;

pub use error::{FileError, Result};
pub use types::{FileUpload, UploadOutcome, UploadedFile};
pub use workspace::FileWorkspace;
