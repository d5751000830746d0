//! Write/promotion policy engine.
//!
//! Maps a path classification to an allow/deny decision with a reason.
//! A pure composition of the path classifier and the root whitelist —
//! no additional state.

use serde::{Deserialize, Serialize};

use crate::classify::{classify_path, is_whitelisted, Medallion, Temperature};
use crate::errors::{ClassifyError, ReceiptError};
use crate::receipt::{content_hash, verify_value};
use crate::violation::ViolationKind;

/// Channel reserved for policy receipts.
pub const POLICY_CHANNEL: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyDecision {
    Allowed,
    Denied,
}

impl std::fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allowed => f.write_str("ALLOWED"),
            Self::Denied => f.write_str("DENIED"),
        }
    }
}

/// Outcome of evaluating the write policy for one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub medallion: Medallion,
    pub temperature: Option<Temperature>,
    pub decision: PolicyDecision,
    pub reason: String,
}

/// Evaluate the write policy for a path.
///
/// BRONZE is always allowed; SILVER and GOLD are denied pending an
/// explicit external approval signal; ROOT is allowed only for
/// whitelisted names.
pub fn evaluate_policy(path: &str) -> Result<PolicyResult, ClassifyError> {
    let class = classify_path(path)?;
    let (decision, reason) = match class.medallion {
        Medallion::Bronze => (
            PolicyDecision::Allowed,
            "bronze tier accepts all writes".to_string(),
        ),
        Medallion::Silver => (
            PolicyDecision::Denied,
            "silver tier requires external validation approval".to_string(),
        ),
        Medallion::Gold => (
            PolicyDecision::Denied,
            "gold tier requires external release approval".to_string(),
        ),
        Medallion::Root => {
            if is_whitelisted(path) {
                (PolicyDecision::Allowed, "root path is whitelisted".to_string())
            } else {
                (
                    PolicyDecision::Denied,
                    "root path is not on the whitelist".to_string(),
                )
            }
        }
    };

    Ok(PolicyResult {
        medallion: class.medallion,
        temperature: class.temperature,
        decision,
        reason,
    })
}

/// Tamper-evident record of one policy decision.
///
/// Wire format: `{kind: "POLICY", channel: 5, timestamp, path,
/// medallion, temperature|null, decision, reason, hash}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyReceipt {
    pub kind: ViolationKind,
    pub channel: u8,
    pub timestamp: i64,
    pub path: String,
    pub medallion: Medallion,
    pub temperature: Option<Temperature>,
    pub decision: PolicyDecision,
    pub reason: String,
    pub hash: String,
}

impl PolicyReceipt {
    /// Evaluate the policy for `path` and seal the outcome in a receipt.
    pub fn create(path: &str) -> Result<Self, ReceiptError> {
        Self::create_at(path, chrono::Utc::now().timestamp_millis())
    }

    /// Create with an explicit timestamp (tests, replay).
    pub fn create_at(path: &str, timestamp: i64) -> Result<Self, ReceiptError> {
        let result = evaluate_policy(path)?;
        let mut receipt = Self {
            kind: ViolationKind::Policy,
            channel: POLICY_CHANNEL,
            timestamp,
            path: path.to_string(),
            medallion: result.medallion,
            temperature: result.temperature,
            decision: result.decision,
            reason: result.reason,
            hash: String::new(),
        };
        receipt.hash = content_hash(&receipt)?;
        Ok(receipt)
    }

    /// Never errors; any mismatch is `false`.
    pub fn verify(&self) -> bool {
        match serde_json::to_value(self) {
            Ok(value) => verify_value(&value),
            Err(_) => false,
        }
    }
}
