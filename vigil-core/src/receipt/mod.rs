//! Tamper-evident violation receipts.
//!
//! A receipt is the persisted record of one detected violation: the
//! violation content plus a SHA-256 hash of its canonical form. Receipts
//! are created once, at detection time, and never updated in place;
//! tamper detection depends on that.

pub mod canonical;

pub use canonical::{content_hash, sha256_hex, verify_value, HASH_PREFIX};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::{classify_score, ScoreTier};
use crate::errors::ReceiptError;
use crate::violation::{Severity, ViolationKind, CHANNEL_MAX};

/// Persisted record of one detected violation.
///
/// Serialized one-per-line as JSON; field names match the wire format
/// (`violationType`, `channel`, `timestamp`, `file`, `detail`,
/// `severity`, `hash`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationReceipt {
    pub violation_type: ViolationKind,
    pub channel: u8,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    /// Path relative to the scanned root, forward slashes.
    pub file: String,
    pub severity: Severity,
    /// Free-form evidence: matched rule, line numbers, match count.
    pub detail: Map<String, Value>,
    /// `sha256:` + 64 hex chars over the canonical form of the fields above.
    pub hash: String,
}

impl ViolationReceipt {
    /// Create a receipt for a violation detected now.
    ///
    /// Fails fast on a channel outside `[0, 7]` and on a kind/channel
    /// pairing mismatch, so mis-tagged evidence is never persisted.
    pub fn create(
        kind: ViolationKind,
        channel: u8,
        file: impl Into<String>,
        detail: Map<String, Value>,
    ) -> Result<Self, ReceiptError> {
        Self::create_at(kind, channel, file, detail, chrono::Utc::now().timestamp_millis())
    }

    /// Create a receipt with an explicit timestamp (tests, replay).
    pub fn create_at(
        kind: ViolationKind,
        channel: u8,
        file: impl Into<String>,
        detail: Map<String, Value>,
        timestamp: i64,
    ) -> Result<Self, ReceiptError> {
        if channel > CHANNEL_MAX {
            return Err(ReceiptError::ChannelOutOfRange { channel });
        }
        let expected = kind.channel();
        if channel != expected {
            return Err(ReceiptError::ChannelMismatch {
                kind,
                expected,
                got: channel,
            });
        }

        let mut receipt = Self {
            violation_type: kind,
            channel,
            timestamp,
            file: file.into(),
            severity: kind.severity(),
            detail,
            hash: String::new(),
        };
        receipt.hash = content_hash(&receipt)?;
        Ok(receipt)
    }

    /// Re-serialize everything except the hash, recompute, compare.
    /// Never errors; any mismatch is `false`.
    pub fn verify(&self) -> bool {
        match serde_json::to_value(self) {
            Ok(value) => verify_value(&value),
            Err(_) => false,
        }
    }
}

/// Build a violation receipt from a quality score.
///
/// A failing score yields `MUTATION_FAILURE`, a theater score yields
/// `SUCCESS_THEATER`. A Goldilocks score is not a violation, so receipt
/// construction fails with an explicit error instead of fabricating
/// evidence.
pub fn score_receipt(score: f64, file: &str) -> Result<ViolationReceipt, ReceiptError> {
    let tier = classify_score(score)?;
    let kind = match tier {
        ScoreTier::Failure => ViolationKind::MutationFailure,
        ScoreTier::Theater => ViolationKind::SuccessTheater,
        ScoreTier::Goldilocks => return Err(ReceiptError::ScoreNotViolation { score }),
    };

    let mut detail = Map::new();
    detail.insert("score".into(), Value::from(score));
    detail.insert("tier".into(), Value::from(tier.as_str()));
    ViolationReceipt::create(kind, kind.channel(), file, detail)
}
