//! Remediation ("dance") configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for the remediation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    /// Remediation attempts before an artifact is quarantined.
    pub max_iterations: u32,
    /// Directory demoted artifacts are relocated under, mirrored by
    /// storage root and medallion.
    pub archive_root: PathBuf,
    /// Append-only record store for remediation actions.
    pub log_path: PathBuf,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            archive_root: PathBuf::from(".vigil/archive"),
            log_path: PathBuf::from(".vigil/remediation.jsonl"),
        }
    }
}
