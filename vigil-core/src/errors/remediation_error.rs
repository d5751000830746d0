//! Remediation errors.

/// Errors from the remediation layer.
///
/// File moves and deletes never surface here; a failed relocation becomes
/// a skipped action with a reason. Only the record store itself can error,
/// and a partial remediation (file moved, append failed) is surfaced to
/// the caller rather than rolled back.
#[derive(Debug, thiserror::Error)]
pub enum RemediationError {
    #[error("failed to open record store {path}: {source}")]
    StoreOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to record store {path}: {source}")]
    StoreAppend {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
