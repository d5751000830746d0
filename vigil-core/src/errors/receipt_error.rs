//! Receipt construction errors.

use crate::errors::ClassifyError;
use crate::violation::ViolationKind;

/// Errors that can occur while constructing a receipt.
///
/// Verification never errors; a failed verification is a plain `false`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReceiptError {
    #[error("channel {channel} outside [0, 7]")]
    ChannelOutOfRange { channel: u8 },

    #[error("violation kind {kind} belongs to channel {expected}, got {got}")]
    ChannelMismatch {
        kind: ViolationKind,
        expected: u8,
        got: u8,
    },

    #[error("score {score} is in the accepted band; no violation exists to report")]
    ScoreNotViolation { score: f64 },

    #[error("canonical serialization failed: {0}")]
    Canonicalize(String),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
