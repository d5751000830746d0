//! Generic rule-table detector.
//!
//! Seven of the eight variants differ only in their rule table and
//! channel; this type carries the shared scan loop. Rule application is
//! independent per file — no cross-file state.

use std::fs;
use std::path::Path;
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use vigil_core::{
    classify_path, classify_score, Cancellable, Deadline, DetectError, DetectorConfig, Medallion,
    ReceiptError, ScoreTier, Severity, ViolationKind, ViolationReceipt,
};

use crate::scanner::{relative_str, FileWalk};

use super::{Detector, DetectorKind, DetectorResult};

/// Where a rule applies within the scanned tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Every eligible file.
    Everywhere,
    /// Only files under the validated/released (silver/gold) tiers.
    PromotedTiers,
    /// Every eligible file except test files.
    SkipTests,
    /// Test files only.
    TestsOnly,
}

impl RuleScope {
    fn applies(&self, relative: &str) -> bool {
        match self {
            Self::Everywhere => true,
            Self::PromotedTiers => classify_path(relative)
                .map(|c| matches!(c.medallion, Medallion::Silver | Medallion::Gold))
                .unwrap_or(false),
            Self::SkipTests => !is_test_file(relative),
            Self::TestsOnly => is_test_file(relative),
        }
    }
}

/// One entry in a detector's rule table.
pub struct DetectionRule {
    pub name: &'static str,
    pub kind: ViolationKind,
    pub pattern: Regex,
    pub scope: RuleScope,
    pub severity: Severity,
    /// When set, capture group 1 is parsed as a quality score and the
    /// violation kind is decided by the score classifier per match.
    pub captures_score: bool,
}

impl DetectionRule {
    pub fn new(name: &'static str, kind: ViolationKind, pattern: &str, scope: RuleScope) -> Self {
        Self {
            name,
            kind,
            pattern: Regex::new(pattern).expect("static detection rule pattern"),
            scope,
            severity: kind.severity(),
            captures_score: false,
        }
    }

    /// A rule whose matches carry a numeric score in capture group 1.
    pub fn score(name: &'static str, pattern: &str, scope: RuleScope) -> Self {
        let mut rule = Self::new(name, ViolationKind::SuccessTheater, pattern, scope);
        rule.captures_score = true;
        rule
    }
}

/// Heuristic test-file check on the relative path.
fn is_test_file(relative: &str) -> bool {
    let lower = relative.to_ascii_lowercase();
    let file_name = lower.rsplit('/').next().unwrap_or(&lower);

    lower.split('/').any(|seg| {
        seg == "tests" || seg == "test" || seg == "__tests__" || seg == "spec"
    }) || file_name.contains(".test.")
        || file_name.contains(".spec.")
        || file_name.starts_with("test_")
        || file_name
            .rsplit_once('.')
            .is_some_and(|(stem, _)| stem.ends_with("_test"))
}

/// Rule-table detector over file content.
pub struct PatternDetector {
    kind: DetectorKind,
    rules: &'static Lazy<Vec<DetectionRule>>,
}

impl PatternDetector {
    /// Construct a variant from its static rule table.
    ///
    /// Construction fails fast if any rule's violation kind is paired
    /// with a different channel than the detector's own; mis-tagged
    /// evidence must never be producible.
    pub fn new(kind: DetectorKind, rules: &'static Lazy<Vec<DetectionRule>>) -> Self {
        for rule in rules.iter() {
            assert_eq!(
                rule.kind.channel(),
                kind.channel(),
                "rule {} is paired with channel {}, detector {} owns channel {}",
                rule.name,
                rule.kind.channel(),
                kind,
                kind.channel(),
            );
        }
        Self { kind, rules }
    }

    fn scan_file(
        &self,
        relative: &str,
        content: &str,
        config: &DetectorConfig,
        receipts: &mut Vec<ViolationReceipt>,
    ) -> Result<(), ReceiptError> {
        for rule in self.rules.iter() {
            if rule.severity < config.severity_floor {
                continue;
            }
            if !rule.scope.applies(relative) {
                continue;
            }

            if rule.captures_score {
                self.apply_score_rule(rule, relative, content, receipts)?;
            } else {
                let lines = matched_lines(&rule.pattern, content);
                if !lines.is_empty() {
                    receipts.push(emit(rule.kind, relative, rule.name, &lines)?);
                }
            }
        }
        Ok(())
    }

    /// Score-capturing rules classify each matched value: failing scores
    /// and theater scores become separate receipts, accepted scores are
    /// not violations.
    fn apply_score_rule(
        &self,
        rule: &DetectionRule,
        relative: &str,
        content: &str,
        receipts: &mut Vec<ViolationReceipt>,
    ) -> Result<(), ReceiptError> {
        let mut failing = Vec::new();
        let mut theater = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = rule.pattern.captures(line) else {
                continue;
            };
            let Some(score) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
                continue;
            };
            match classify_score(score) {
                Ok(ScoreTier::Failure) => failing.push(idx as u32 + 1),
                Ok(ScoreTier::Theater) => theater.push(idx as u32 + 1),
                Ok(ScoreTier::Goldilocks) => {}
                // Out-of-domain values are claims, not scores.
                Err(_) => {}
            }
        }

        if !failing.is_empty() {
            receipts.push(emit(ViolationKind::MutationFailure, relative, rule.name, &failing)?);
        }
        if !theater.is_empty() {
            receipts.push(emit(ViolationKind::SuccessTheater, relative, rule.name, &theater)?);
        }
        Ok(())
    }
}

fn matched_lines(pattern: &Regex, content: &str) -> Vec<u32> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(idx, _)| idx as u32 + 1)
        .collect()
}

fn emit(
    kind: ViolationKind,
    relative: &str,
    rule_name: &str,
    lines: &[u32],
) -> Result<ViolationReceipt, ReceiptError> {
    let mut detail = Map::new();
    detail.insert("rule".into(), Value::from(rule_name));
    detail.insert("lines".into(), json!(lines));
    detail.insert("matchCount".into(), Value::from(lines.len()));
    ViolationReceipt::create(kind, kind.channel(), relative, detail)
}

impl Detector for PatternDetector {
    fn kind(&self) -> DetectorKind {
        self.kind
    }

    fn detect_until(
        &self,
        target: &Path,
        config: &DetectorConfig,
        deadline: &Deadline,
    ) -> Result<DetectorResult, DetectError> {
        if !config.enabled {
            return Ok(DetectorResult::empty(self.kind));
        }
        if !target.exists() {
            return Err(DetectError::RootNotFound {
                path: target.display().to_string(),
            });
        }

        let start = Instant::now();
        let mut receipts = Vec::new();
        let mut files_scanned = 0usize;

        for path in FileWalk::new(target, config) {
            if deadline.is_expired() {
                warn!(detector = %self.kind, "deadline expired, stopping walk");
                break;
            }
            // Unreadable (or non-UTF-8) files are skipped; the scan continues.
            let Ok(content) = fs::read_to_string(&path) else {
                debug!(file = %path.display(), "unreadable file, skipped");
                continue;
            };
            files_scanned += 1;

            let relative = relative_str(target, &path);
            self.scan_file(&relative, &content, config, &mut receipts)?;
        }

        Ok(DetectorResult {
            detector: self.kind,
            channel: self.kind.channel(),
            violation_count: receipts.len(),
            receipts,
            files_scanned,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_heuristics() {
        assert!(is_test_file("hot/bronze/x.test.ts"));
        assert!(is_test_file("hot/bronze/x.spec.js"));
        assert!(is_test_file("tests/integration.rs"));
        assert!(is_test_file("hot/silver/__tests__/y.ts"));
        assert!(is_test_file("pkg/test_util.py"));
        assert!(is_test_file("pkg/walker_test.go"));
        assert!(!is_test_file("hot/bronze/contest.ts"));
        assert!(!is_test_file("hot/bronze/x.ts"));
    }

    #[test]
    fn promoted_tier_scope() {
        assert!(RuleScope::PromotedTiers.applies("hot/silver/x.ts"));
        assert!(RuleScope::PromotedTiers.applies("cold/gold/x.ts"));
        assert!(!RuleScope::PromotedTiers.applies("hot/bronze/x.ts"));
        assert!(!RuleScope::PromotedTiers.applies("README.md"));
    }

    #[test]
    fn matched_lines_are_one_based() {
        let pattern = Regex::new(r"needle").unwrap();
        let lines = matched_lines(&pattern, "hay\nneedle\nhay\nneedle");
        assert_eq!(lines, vec![2, 4]);
    }
}
