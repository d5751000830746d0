//! vigil-analysis: scanner, detectors, aggregator, and remediation
//!
//! This crate provides the side-effecting half of Vigil:
//! - Scanner: lazy, restartable file walking with ignore patterns
//! - Detectors: the fixed set of 8 pattern-table violation detectors
//! - Aggregate: one audit run across all detectors, sealed in a receipt
//! - Remediation: the bounded "dance" loop and its archive actions

pub mod aggregate;
pub mod detectors;
pub mod remediation;
pub mod scanner;

// Re-exports for convenience
pub use aggregate::{
    perform_audit, receipts_hash, verify_audit_receipt, Aggregator, AuditReceipt, AuditReport,
    DetectorSummary,
};
pub use detectors::{registry, Detector, DetectorKind, DetectorResult, DETECTOR_COUNT};
pub use remediation::{
    dance_die, ActionKind, DanceActionRecord, DanceOutcome, DanceResult, DanceState,
    DanceStatus, DanceViolation, RecordStore, Remediator,
};
pub use scanner::FileWalk;
