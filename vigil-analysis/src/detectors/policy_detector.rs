//! Promotion-policy detector (channel 5).
//!
//! The one variant that classifies paths instead of content: every
//! eligible file whose path the write policy denies becomes a POLICY
//! violation, so artifacts sitting in a tier they were never approved
//! for show up in the audit alongside content violations.

use std::path::Path;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::warn;

use vigil_core::{
    evaluate_policy, Cancellable, Deadline, DetectError, DetectorConfig, PolicyDecision,
    ViolationKind, ViolationReceipt,
};

use crate::scanner::{relative_str, FileWalk};

use super::{Detector, DetectorKind, DetectorResult};

pub struct PolicyDetector;

impl Detector for PolicyDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::PromotionPolicy
    }

    fn detect_until(
        &self,
        target: &Path,
        config: &DetectorConfig,
        deadline: &Deadline,
    ) -> Result<DetectorResult, DetectError> {
        if !config.enabled {
            return Ok(DetectorResult::empty(self.kind()));
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
                warn!(detector = %self.kind(), "deadline expired, stopping walk");
                break;
            }
            files_scanned += 1;

            let relative = relative_str(target, &path);
            // Walked paths are never empty, so the policy cannot reject
            // its input here.
            let result = evaluate_policy(&relative)?;
            if result.decision == PolicyDecision::Denied {
                let mut detail = Map::new();
                detail.insert("medallion".into(), Value::from(result.medallion.as_str()));
                detail.insert(
                    "temperature".into(),
                    result
                        .temperature
                        .map(|t| Value::from(t.as_str()))
                        .unwrap_or(Value::Null),
                );
                detail.insert("decision".into(), Value::from("DENIED"));
                detail.insert("reason".into(), Value::from(result.reason));
                receipts.push(ViolationReceipt::create(
                    ViolationKind::Policy,
                    self.channel(),
                    relative,
                    detail,
                )?);
            }
        }

        Ok(DetectorResult {
            detector: self.kind(),
            channel: self.channel(),
            violation_count: receipts.len(),
            receipts,
            files_scanned,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
