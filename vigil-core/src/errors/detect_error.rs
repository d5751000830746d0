//! Detection errors.

use crate::errors::{ClassifyError, ReceiptError};

/// Errors that can occur during a detector run or an audit.
///
/// Per-file I/O failures are not represented here: an unreadable file is
/// skipped and the scan continues.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("scan root not found: {path}")]
    RootNotFound { path: String },

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
