//! Detector system — a closed set of 8 variants, one per channel.
//!
//! Each detector implements the `Detector` trait and is registered in
//! `registry()`. Seven variants apply a fixed rule table to file content;
//! the promotion-policy variant classifies paths instead. The aggregator
//! iterates the registry, never a convention.

mod pattern;
mod policy_detector;
mod tables;

pub use pattern::{DetectionRule, PatternDetector, RuleScope};
pub use policy_detector::PolicyDetector;

use std::path::Path;

use serde::{Deserialize, Serialize};

use vigil_core::{Deadline, DetectError, DetectorConfig, ViolationReceipt};

/// Number of detector variants in the fixed registry.
pub const DETECTOR_COUNT: usize = 8;

/// The closed set of detector variants. The discriminant order matches
/// the channel assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectorKind {
    MockTheater,
    SecretLeakage,
    FakeAssertion,
    DebugResidue,
    SkippedTest,
    PromotionPolicy,
    ScoreTheater,
    Deferral,
}

impl DetectorKind {
    /// The channel tag this detector stamps on its receipts.
    pub fn channel(&self) -> u8 {
        match self {
            Self::MockTheater => 0,
            Self::SecretLeakage => 1,
            Self::FakeAssertion => 2,
            Self::DebugResidue => 3,
            Self::SkippedTest => 4,
            Self::PromotionPolicy => 5,
            Self::ScoreTheater => 6,
            Self::Deferral => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MockTheater => "mock-theater",
            Self::SecretLeakage => "secret-leakage",
            Self::FakeAssertion => "fake-assertion",
            Self::DebugResidue => "debug-residue",
            Self::SkippedTest => "skipped-test",
            Self::PromotionPolicy => "promotion-policy",
            Self::ScoreTheater => "score-theater",
            Self::Deferral => "deferral",
        }
    }
}

impl std::fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one detector invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorResult {
    pub detector: DetectorKind,
    pub channel: u8,
    pub receipts: Vec<ViolationReceipt>,
    pub files_scanned: usize,
    pub violation_count: usize,
    pub duration_ms: u64,
}

impl DetectorResult {
    /// Result for a disabled detector or an empty tree.
    pub fn empty(detector: DetectorKind) -> Self {
        Self {
            detector,
            channel: detector.channel(),
            receipts: Vec::new(),
            files_scanned: 0,
            violation_count: 0,
            duration_ms: 0,
        }
    }
}

/// Common contract for all detector variants.
pub trait Detector: Send + Sync {
    fn kind(&self) -> DetectorKind;

    fn channel(&self) -> u8 {
        self.kind().channel()
    }

    /// Scan `target` (a file or directory) and report violations.
    fn detect(
        &self,
        target: &Path,
        config: &DetectorConfig,
    ) -> Result<DetectorResult, DetectError> {
        self.detect_until(target, config, &Deadline::unbounded())
    }

    /// Scan with a cooperative deadline, checked between files.
    fn detect_until(
        &self,
        target: &Path,
        config: &DetectorConfig,
        deadline: &Deadline,
    ) -> Result<DetectorResult, DetectError>;
}

/// The fixed set of 8 detectors, one per channel. Every audit runs all
/// of them; there is no conditional skipping.
pub fn registry() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(PatternDetector::new(DetectorKind::MockTheater, &tables::MOCK_THEATER_RULES)),
        Box::new(PatternDetector::new(DetectorKind::SecretLeakage, &tables::SECRET_RULES)),
        Box::new(PatternDetector::new(DetectorKind::FakeAssertion, &tables::FAKE_ASSERTION_RULES)),
        Box::new(PatternDetector::new(DetectorKind::DebugResidue, &tables::DEBUG_RESIDUE_RULES)),
        Box::new(PatternDetector::new(DetectorKind::SkippedTest, &tables::SKIPPED_TEST_RULES)),
        Box::new(PolicyDetector),
        Box::new(PatternDetector::new(DetectorKind::ScoreTheater, &tables::SCORE_THEATER_RULES)),
        Box::new(PatternDetector::new(DetectorKind::Deferral, &tables::DEFERRAL_RULES)),
    ]
}
