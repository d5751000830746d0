//! vigil-core: types, classifiers, and tamper-evident receipts
//!
//! This crate provides the pure, side-effect-free layer of Vigil:
//! - Classify: score and path tier classification
//! - Policy: medallion write/promotion decisions
//! - Receipt: canonical serialization + SHA-256 receipt hashing
//! - Config: TOML + environment layered configuration
//! - Errors: one error enum per subsystem
//! - Deadline: cooperative deadline for long-running scans

pub mod classify;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod policy;
pub mod receipt;
pub mod telemetry;
pub mod violation;

// Re-exports for convenience
pub use classify::{classify_path, classify_score, is_whitelisted, Medallion, PathClass, ScoreTier, Temperature};
pub use config::{AuditConfig, DetectorConfig, RemediationConfig, VigilConfig};
pub use deadline::{Cancellable, Deadline};
pub use errors::{ClassifyError, ConfigError, DetectError, ReceiptError, RemediationError};
pub use policy::{evaluate_policy, PolicyDecision, PolicyReceipt, PolicyResult};
pub use receipt::{canonical, score_receipt, verify_value, ViolationReceipt};
pub use telemetry::init_tracing;
pub use violation::{Severity, ViolationKind, CHANNEL_MAX};
