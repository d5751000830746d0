//! Audit aggregator.
//!
//! Runs the full fixed set of detectors against a root path, merges
//! their outputs, and seals the combined summary in one independently
//! verifiable audit receipt. Detectors run in parallel; the merge is
//! order-independent (summing, not positional).

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use vigil_core::receipt::{content_hash, sha256_hex, verify_value, HASH_PREFIX};
use vigil_core::{Deadline, DetectError, ReceiptError, VigilConfig, ViolationReceipt};

use crate::detectors::{registry, Detector, DetectorKind, DetectorResult, DETECTOR_COUNT};

/// Kind tag carried by audit receipts.
pub const AUDIT_KIND: &str = "AUDIT";

/// Per-detector slice of the sealed audit summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorSummary {
    pub detector: DetectorKind,
    pub channel: u8,
    pub files_scanned: usize,
    pub violation_count: usize,
    pub duration_ms: u64,
}

impl From<&DetectorResult> for DetectorSummary {
    fn from(result: &DetectorResult) -> Self {
        Self {
            detector: result.detector,
            channel: result.channel,
            files_scanned: result.files_scanned,
            violation_count: result.violation_count,
            duration_ms: result.duration_ms,
        }
    }
}

/// Tamper-evident summary of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReceipt {
    pub kind: String,
    pub timestamp: i64,
    pub root: String,
    pub detectors: Vec<DetectorSummary>,
    pub files_scanned: usize,
    pub total_violations: usize,
    pub violations_by_kind: BTreeMap<String, usize>,
    /// Order-independent hash over the merged receipt hashes.
    pub receipts_hash: String,
    pub hash: String,
}

impl AuditReceipt {
    fn create_at(
        root: &str,
        results: &[DetectorResult],
        receipts: &[ViolationReceipt],
        timestamp: i64,
    ) -> Result<Self, ReceiptError> {
        let mut violations_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for receipt in receipts {
            *violations_by_kind
                .entry(receipt.violation_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        let mut audit = Self {
            kind: AUDIT_KIND.to_string(),
            timestamp,
            root: root.to_string(),
            detectors: results.iter().map(DetectorSummary::from).collect(),
            files_scanned: results.iter().map(|r| r.files_scanned).sum(),
            total_violations: results.iter().map(|r| r.violation_count).sum(),
            violations_by_kind,
            receipts_hash: receipts_hash(receipts),
            hash: String::new(),
        };
        audit.hash = content_hash(&audit)?;
        Ok(audit)
    }

    /// Re-serialize everything except the hash, recompute, compare.
    /// Verification depends only on value equality, never identity.
    pub fn verify(&self) -> bool {
        match serde_json::to_value(self) {
            Ok(value) => verify_value(&value),
            Err(_) => false,
        }
    }
}

/// Verify an audit receipt. Never errors; any mismatch is `false`.
pub fn verify_audit_receipt(receipt: &AuditReceipt) -> bool {
    receipt.verify()
}

/// Order-independent hash over the merged receipts: individual hashes
/// are sorted before hashing, so detector completion order is
/// irrelevant.
pub fn receipts_hash(receipts: &[ViolationReceipt]) -> String {
    let mut hashes: Vec<&str> = receipts.iter().map(|r| r.hash.as_str()).collect();
    hashes.sort_unstable();
    format!("{HASH_PREFIX}{}", sha256_hex(hashes.join("\n").as_bytes()))
}

/// Full output of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub root: String,
    pub results: Vec<DetectorResult>,
    pub receipts: Vec<ViolationReceipt>,
    pub receipt: AuditReceipt,
}

impl AuditReport {
    /// Verify the whole report: the sealed summary, the merged receipt
    /// set behind it, the sum invariant, and every individual receipt.
    pub fn verify(&self) -> bool {
        let summed: usize = self.results.iter().map(|r| r.violation_count).sum();
        let summary_sum: usize = self.receipt.detectors.iter().map(|d| d.violation_count).sum();
        self.receipt.verify()
            && self.receipt.receipts_hash == receipts_hash(&self.receipts)
            && self.receipt.total_violations == summed
            && self.receipt.total_violations == summary_sum
            && self.receipt.total_violations == self.receipts.len()
            && self.receipts.iter().all(|r| r.verify())
    }
}

/// Invokes the fixed detector set and merges their outputs.
pub struct Aggregator {
    detectors: Vec<Box<dyn Detector>>,
}

impl Aggregator {
    pub fn new() -> Self {
        let detectors = registry();
        debug_assert_eq!(detectors.len(), DETECTOR_COUNT);
        Self { detectors }
    }

    /// Run every detector against `root` and seal the merged result.
    pub fn perform_audit(
        &self,
        root: &Path,
        config: &VigilConfig,
    ) -> Result<AuditReport, DetectError> {
        if !root.exists() {
            return Err(DetectError::RootNotFound {
                path: root.display().to_string(),
            });
        }

        let deadline = Deadline::after_ms(config.audit.deadline_ms);
        info!(root = %root.display(), detectors = self.detectors.len(), "audit started");

        let results: Vec<DetectorResult> = self
            .detectors
            .par_iter()
            .map(|detector| detector.detect_until(root, &config.detector, &deadline))
            .collect::<Result<_, _>>()?;

        let receipts: Vec<ViolationReceipt> = results
            .iter()
            .flat_map(|r| r.receipts.iter().cloned())
            .collect();

        let root_str = root.display().to_string();
        let receipt = AuditReceipt::create_at(
            &root_str,
            &results,
            &receipts,
            chrono::Utc::now().timestamp_millis(),
        )?;

        info!(
            total_violations = receipt.total_violations,
            files_scanned = receipt.files_scanned,
            "audit finished"
        );

        Ok(AuditReport {
            root: root_str,
            results,
            receipts,
            receipt,
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point for the orchestration layer.
pub fn perform_audit(root: &Path, config: &VigilConfig) -> Result<AuditReport, DetectError> {
    Aggregator::new().perform_audit(root, config)
}
