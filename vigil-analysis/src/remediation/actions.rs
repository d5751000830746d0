//! Side-effecting remediation actions: demote, purge, dance_die.
//!
//! Every action appends a structured record to the store and reports
//! its own outcome; a failed relocation is a skipped unit with a
//! reason, never a crash, and one failure never aborts a batch.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vigil_core::{
    classify_path, Medallion, RemediationConfig, RemediationError, ViolationKind,
    ViolationReceipt,
};

use super::log::RecordStore;
use super::{DanceOutcome, DanceState, DanceStatus};

/// Violation kinds severe enough to demote even from the bronze tier.
const BRONZE_DEMOTABLE: &[ViolationKind] = &[
    ViolationKind::HardcodedSecret,
    ViolationKind::SuccessTheater,
    ViolationKind::MutationFailure,
];

/// What was done to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Demote,
    Purge,
    Skipped,
}

/// Structured record of one remediation action, as appended to the
/// record store: `{file, action, reason, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanceActionRecord {
    pub file: String,
    pub action: ActionKind,
    pub reason: String,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
}

impl DanceActionRecord {
    fn now(file: &str, action: ActionKind, reason: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            action,
            reason: reason.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Outcome of one action: the record, plus whether the append to the
/// store succeeded. A moved file with a failed append is surfaced here
/// rather than rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct DanceResult {
    pub record: DanceActionRecord,
    pub logged: bool,
}

/// Applies remediation actions under a scan root.
pub struct Remediator {
    store: RecordStore,
    archive_root: PathBuf,
}

impl Remediator {
    pub fn new(config: &RemediationConfig) -> Result<Self, RemediationError> {
        Ok(Self {
            store: RecordStore::open(&config.log_path)?,
            archive_root: config.archive_root.clone(),
        })
    }

    /// Relocate an artifact (and its paired test file, if present) into
    /// the archive location matching its storage root and medallion.
    pub fn demote(&self, root: &Path, relative: &str, reason: &str) -> Vec<DanceResult> {
        let mut results = vec![self.demote_one(root, relative, reason)];
        if let Some(paired) = paired_test_file(root, relative) {
            results.push(self.demote_one(root, &paired, "paired test file"));
        }
        results
    }

    fn demote_one(&self, root: &Path, relative: &str, reason: &str) -> DanceResult {
        let class = match classify_path(relative) {
            Ok(class) => class,
            Err(e) => {
                return self.finish(DanceActionRecord::now(
                    relative,
                    ActionKind::Skipped,
                    format!("unclassifiable path: {e}"),
                ));
            }
        };
        let Some(temperature) = class.temperature else {
            return self.finish(DanceActionRecord::now(
                relative,
                ActionKind::Skipped,
                "outside storage roots; logged only",
            ));
        };

        let source = root.join(relative);
        let dest_dir = self
            .archive_root
            .join(temperature.as_str().to_ascii_lowercase())
            .join(class.medallion.as_str().to_ascii_lowercase());
        if let Err(e) = fs::create_dir_all(&dest_dir) {
            return self.finish(DanceActionRecord::now(
                relative,
                ActionKind::Skipped,
                format!("archive directory unavailable: {e}"),
            ));
        }

        let Some(file_name) = source.file_name() else {
            return self.finish(DanceActionRecord::now(
                relative,
                ActionKind::Skipped,
                "path has no file name",
            ));
        };
        let dest = dest_dir.join(file_name);

        match fs::rename(&source, &dest) {
            Ok(()) => {
                info!(file = relative, dest = %dest.display(), "artifact demoted");
                self.finish(DanceActionRecord::now(relative, ActionKind::Demote, reason))
            }
            Err(e) => self.finish(DanceActionRecord::now(
                relative,
                ActionKind::Skipped,
                format!("move failed: {e}"),
            )),
        }
    }

    /// Delete an artifact outright. Used only for severe, irreparable
    /// violations; a missing file is not an error.
    pub fn purge(&self, root: &Path, relative: &str, reason: &str) -> DanceResult {
        let source = root.join(relative);
        match fs::remove_file(&source) {
            Ok(()) => {
                info!(file = relative, "artifact purged");
                self.finish(DanceActionRecord::now(relative, ActionKind::Purge, reason))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.finish(
                DanceActionRecord::now(
                    relative,
                    ActionKind::Purge,
                    format!("{reason} (already absent)"),
                ),
            ),
            Err(e) => self.finish(DanceActionRecord::now(
                relative,
                ActionKind::Skipped,
                format!("delete failed: {e}"),
            )),
        }
    }

    /// Classify each violation and act on it: promoted tiers always
    /// demote; in bronze only the severe kind subset demotes; everything
    /// else is logged only. Each unit's outcome is independent.
    pub fn dance_die(&self, root: &Path, violations: &[ViolationReceipt]) -> Vec<DanceResult> {
        let mut results = Vec::new();
        for violation in violations {
            let kind = violation.violation_type;
            let class = match classify_path(&violation.file) {
                Ok(class) => class,
                Err(e) => {
                    results.push(self.finish(DanceActionRecord::now(
                        &violation.file,
                        ActionKind::Skipped,
                        format!("unclassifiable path: {e}"),
                    )));
                    continue;
                }
            };

            match class.medallion {
                Medallion::Silver | Medallion::Gold => {
                    results.extend(self.demote(
                        root,
                        &violation.file,
                        &format!("{kind} in {} tier", class.medallion),
                    ));
                }
                Medallion::Bronze if BRONZE_DEMOTABLE.contains(&kind) => {
                    results.extend(self.demote(
                        root,
                        &violation.file,
                        &format!("{kind} in bronze tier"),
                    ));
                }
                Medallion::Bronze | Medallion::Root => {
                    results.push(self.finish(DanceActionRecord::now(
                        &violation.file,
                        ActionKind::Skipped,
                        "logged only",
                    )));
                }
            }
        }
        results
    }

    /// Drive one artifact's dance to its terminal state.
    ///
    /// `attempt` is called once per iteration and names the violation
    /// indices it managed to resolve. Every transition is appended to
    /// the record store; a quarantined artifact is demoted out of its
    /// tier. Termination is bounded by the state machine itself.
    pub fn run_dance<F>(
        &self,
        root: &Path,
        state: &mut DanceState,
        mut attempt: F,
    ) -> (DanceOutcome, Vec<DanceResult>)
    where
        F: FnMut(&DanceState) -> Vec<usize>,
    {
        while !state.is_terminal() {
            let resolved = attempt(state);
            let status = state.advance(&resolved);
            let transition = DanceTransitionRecord {
                artifact_id: &state.artifact_id,
                iteration: state.iteration,
                status,
                unresolved: state.unresolved_count(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            };
            if let Err(e) = self.store.append(&transition) {
                warn!(artifact = %state.artifact_id, error = %e, "transition append failed");
            }
        }

        let outcome = state.outcome().unwrap_or(DanceOutcome::Quarantine);
        let results = match outcome {
            DanceOutcome::Rebirth => Vec::new(),
            DanceOutcome::Quarantine => self.demote(
                root,
                &state.artifact_id,
                &format!("quarantined after {} iterations", state.iteration),
            ),
        };
        (outcome, results)
    }

    fn finish(&self, record: DanceActionRecord) -> DanceResult {
        let logged = match self.store.append(&record) {
            Ok(()) => true,
            Err(e) => {
                warn!(file = %record.file, error = %e, "record store append failed");
                false
            }
        };
        DanceResult { record, logged }
    }
}

/// Record of one dance transition, appended alongside action records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DanceTransitionRecord<'a> {
    artifact_id: &'a str,
    iteration: u32,
    status: DanceStatus,
    unresolved: usize,
    timestamp: i64,
}

/// First existing conventional test-file sibling for an artifact.
fn paired_test_file(root: &Path, relative: &str) -> Option<String> {
    let (dir, file_name) = match relative.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, relative),
    };
    let (stem, ext) = file_name.rsplit_once('.')?;

    let candidates = [
        format!("{stem}.test.{ext}"),
        format!("{stem}.spec.{ext}"),
        format!("test_{stem}.{ext}"),
        format!("{stem}_test.{ext}"),
    ];
    for candidate in candidates {
        let candidate_rel = match dir {
            Some(dir) => format!("{dir}/{candidate}"),
            None => candidate,
        };
        if root.join(&candidate_rel).is_file() {
            return Some(candidate_rel);
        }
    }
    None
}

/// Convenience entry point for the orchestration layer: open the store
/// from config, act on every violation, return per-unit outcomes.
pub fn dance_die(
    root: &Path,
    violations: &[ViolationReceipt],
    config: &RemediationConfig,
) -> Result<Vec<DanceResult>, RemediationError> {
    let remediator = Remediator::new(config)?;
    Ok(remediator.dance_die(root, violations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_test_file_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("hot/bronze")).unwrap();
        fs::write(root.join("hot/bronze/calc.ts"), "x").unwrap();
        fs::write(root.join("hot/bronze/calc.test.ts"), "x").unwrap();

        assert_eq!(
            paired_test_file(root, "hot/bronze/calc.ts"),
            Some("hot/bronze/calc.test.ts".to_string())
        );
        assert_eq!(paired_test_file(root, "hot/bronze/other.ts"), None);
    }
}
