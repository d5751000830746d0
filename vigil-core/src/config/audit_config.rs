//! Audit-run configuration.

use serde::{Deserialize, Serialize};

/// Options for a full audit run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Optional wall-clock deadline for one audit run, in milliseconds.
    /// Directory walks over large trees are unbounded without it; when
    /// the deadline passes, detectors stop walking and report the files
    /// they covered.
    pub deadline_ms: Option<u64>,
}
