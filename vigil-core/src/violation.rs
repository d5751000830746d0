//! Violation kinds, severities, and the kind → channel pairing table.
//!
//! Every detected issue carries one of these kinds. The channel is a tag
//! in `[0, 7]` identifying the detector family that is allowed to emit
//! the kind; the pairing is checked at receipt-creation time so
//! mis-tagged evidence can never be persisted.

use serde::{Deserialize, Serialize};

/// Highest valid channel index.
pub const CHANNEL_MAX: u8 = 7;

/// The closed set of violation kinds Vigil can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// Stubbed or faked implementation presented as real work.
    MockTheater,
    /// Credential or key material committed to the tree.
    HardcodedSecret,
    /// Test assertion that can never fail.
    FakeAssertion,
    /// Leftover debug output in non-test source.
    DebugResidue,
    /// Disabled or focused test hiding coverage gaps.
    SkippedTest,
    /// Artifact present in a tier its policy decision denies.
    Policy,
    /// Quality score below the acceptance floor.
    MutationFailure,
    /// Quality score implausibly high; suspected metric gaming.
    SuccessTheater,
    /// Deferred work marker surviving past promotion.
    TodoDeferral,
}

impl ViolationKind {
    /// The detector channel this kind is paired with.
    pub fn channel(&self) -> u8 {
        match self {
            Self::MockTheater => 0,
            Self::HardcodedSecret => 1,
            Self::FakeAssertion => 2,
            Self::DebugResidue => 3,
            Self::SkippedTest => 4,
            Self::Policy => 5,
            Self::MutationFailure | Self::SuccessTheater => 6,
            Self::TodoDeferral => 7,
        }
    }

    /// Static severity lookup. Kept declarative so the rule set is
    /// testable independently of any detector.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MockTheater => Severity::Error,
            Self::HardcodedSecret => Severity::Critical,
            Self::FakeAssertion => Severity::Warning,
            Self::DebugResidue => Severity::Warning,
            Self::SkippedTest => Severity::Warning,
            Self::Policy => Severity::Error,
            Self::MutationFailure => Severity::Error,
            Self::SuccessTheater => Severity::Critical,
            Self::TodoDeferral => Severity::Warning,
        }
    }

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MockTheater => "MOCK_THEATER",
            Self::HardcodedSecret => "HARDCODED_SECRET",
            Self::FakeAssertion => "FAKE_ASSERTION",
            Self::DebugResidue => "DEBUG_RESIDUE",
            Self::SkippedTest => "SKIPPED_TEST",
            Self::Policy => "POLICY",
            Self::MutationFailure => "MUTATION_FAILURE",
            Self::SuccessTheater => "SUCCESS_THEATER",
            Self::TodoDeferral => "TODO_DEFERRAL",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a violation. Ordered so a configurable floor can filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Warning
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Critical => f.write_str("critical"),
        }
    }
}
