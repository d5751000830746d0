//! Remediation engine ("dance").
//!
//! A bounded per-artifact loop: each advance marks violations resolved
//! and spends one iteration; an artifact either resolves everything
//! (rebirth) or exhausts its iterations and is quarantined. The
//! side-effecting action layer relocates or deletes artifacts and logs
//! every transition to an append-only store.

mod actions;
mod log;

pub use actions::{dance_die, ActionKind, DanceActionRecord, DanceResult, Remediator};
pub use log::RecordStore;

use serde::{Deserialize, Serialize};

use vigil_core::ViolationKind;

/// Lifecycle of one artifact under remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DanceStatus {
    Dancing,
    Completed,
    Quarantined,
}

/// Terminal outcome of a dance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DanceOutcome {
    Rebirth,
    Quarantine,
}

/// One violation being worked off during a dance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanceViolation {
    pub kind: ViolationKind,
    pub message: String,
    pub resolved: bool,
}

impl DanceViolation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resolved: false,
        }
    }
}

/// Per-artifact remediation state machine.
///
/// Created dancing at iteration 0 with every violation unresolved, and
/// mutated only by [`DanceState::advance`]. For any `max_iterations >= 1`
/// the machine reaches a terminal state in at most `max_iterations`
/// transitions, progress or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanceState {
    pub artifact_id: String,
    pub iteration: u32,
    pub max_iterations: u32,
    pub status: DanceStatus,
    pub violations: Vec<DanceViolation>,
}

impl DanceState {
    pub fn new(
        artifact_id: impl Into<String>,
        violations: Vec<DanceViolation>,
        max_iterations: u32,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            iteration: 0,
            max_iterations,
            status: DanceStatus::Dancing,
            violations,
        }
    }

    /// Mark the named violation indices resolved and spend one
    /// iteration, then evaluate the terminal condition.
    ///
    /// Out-of-range indices are ignored; the iteration still counts, so
    /// the termination bound is unaffected. Advancing a terminal state
    /// is a no-op.
    pub fn advance(&mut self, resolved: &[usize]) -> DanceStatus {
        if self.status != DanceStatus::Dancing {
            return self.status;
        }

        for &index in resolved {
            if let Some(violation) = self.violations.get_mut(index) {
                violation.resolved = true;
            }
        }
        self.iteration += 1;

        if self.violations.iter().all(|v| v.resolved) {
            self.status = DanceStatus::Completed;
        } else if self.iteration >= self.max_iterations {
            self.status = DanceStatus::Quarantined;
        }
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status != DanceStatus::Dancing
    }

    /// Terminal outcome, `None` while still dancing.
    pub fn outcome(&self) -> Option<DanceOutcome> {
        match self.status {
            DanceStatus::Dancing => None,
            DanceStatus::Completed => Some(DanceOutcome::Rebirth),
            DanceStatus::Quarantined => Some(DanceOutcome::Quarantine),
        }
    }

    pub fn unresolved_count(&self) -> usize {
        self.violations.iter().filter(|v| !v.resolved).count()
    }
}
