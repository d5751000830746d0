//! End-to-end remediation flow: dance_die classification, archive
//! relocation with paired test files, purge semantics, and the
//! append-only action log.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use vigil_analysis::{
    dance_die, ActionKind, DanceOutcome, DanceState, DanceViolation, Remediator,
};
use vigil_core::{RemediationConfig, ViolationKind, ViolationReceipt};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn receipt(kind: ViolationKind, file: &str) -> ViolationReceipt {
    ViolationReceipt::create(kind, kind.channel(), file, Map::new()).unwrap()
}

fn config_for(root: &Path) -> RemediationConfig {
    RemediationConfig {
        max_iterations: 3,
        archive_root: root.join(".vigil/archive"),
        log_path: root.join(".vigil/remediation.jsonl"),
    }
}

#[test]
fn promoted_tier_violations_are_always_demoted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/gold/release.ts", "code");
    write(root, "hot/gold/release.test.ts", "tests");
    let config = config_for(root);

    let results = dance_die(
        root,
        &[receipt(ViolationKind::TodoDeferral, "hot/gold/release.ts")],
        &config,
    )
    .unwrap();

    // Artifact plus its paired test file.
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.record.action == ActionKind::Demote));
    assert!(results.iter().all(|r| r.logged));

    assert!(!root.join("hot/gold/release.ts").exists());
    assert!(!root.join("hot/gold/release.test.ts").exists());
    assert!(config.archive_root.join("hot/gold/release.ts").is_file());
    assert!(config.archive_root.join("hot/gold/release.test.ts").is_file());
}

#[test]
fn bronze_demotes_only_the_severe_kind_subset() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/bronze/leaky.ts", "const password = \"hunter2hunter2\";");
    write(root, "hot/bronze/messy.ts", "console.log('x');");
    let config = config_for(root);

    let results = dance_die(
        root,
        &[
            receipt(ViolationKind::HardcodedSecret, "hot/bronze/leaky.ts"),
            receipt(ViolationKind::DebugResidue, "hot/bronze/messy.ts"),
        ],
        &config,
    )
    .unwrap();

    assert_eq!(results.len(), 2);

    let leaky = &results[0];
    assert_eq!(leaky.record.action, ActionKind::Demote);
    assert!(config.archive_root.join("hot/bronze/leaky.ts").is_file());

    let messy = &results[1];
    assert_eq!(messy.record.action, ActionKind::Skipped);
    assert_eq!(messy.record.reason, "logged only");
    assert!(root.join("hot/bronze/messy.ts").exists());
}

#[test]
fn root_tier_violations_are_logged_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "stray.ts", "code");
    let config = config_for(root);

    let results = dance_die(
        root,
        &[receipt(ViolationKind::HardcodedSecret, "stray.ts")],
        &config,
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.action, ActionKind::Skipped);
    assert!(root.join("stray.ts").exists());
}

#[test]
fn failed_relocation_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = config_for(root);
    let remediator = Remediator::new(&config).unwrap();

    // The artifact does not exist, so the move fails; the batch carries on.
    let results = remediator.demote(root, "hot/silver/ghost.ts", "test");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.action, ActionKind::Skipped);
    assert!(results[0].record.reason.contains("move failed"));
    assert!(results[0].logged);
}

#[test]
fn purge_tolerates_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/bronze/bad.ts", "code");
    let config = config_for(root);
    let remediator = Remediator::new(&config).unwrap();

    let first = remediator.purge(root, "hot/bronze/bad.ts", "irreparable secret");
    assert_eq!(first.record.action, ActionKind::Purge);
    assert!(!root.join("hot/bronze/bad.ts").exists());

    let second = remediator.purge(root, "hot/bronze/bad.ts", "irreparable secret");
    assert_eq!(second.record.action, ActionKind::Purge);
    assert!(second.record.reason.contains("already absent"));
}

#[test]
fn run_dance_with_no_progress_quarantines_and_demotes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/silver/flaky.ts", "code");
    let config = config_for(root);
    let remediator = Remediator::new(&config).unwrap();

    let mut state = DanceState::new(
        "hot/silver/flaky.ts",
        vec![
            DanceViolation::new(ViolationKind::DebugResidue, "console residue"),
            DanceViolation::new(ViolationKind::TodoDeferral, "open TODO"),
        ],
        3,
    );

    let (outcome, results) = remediator.run_dance(root, &mut state, |_| Vec::new());

    assert_eq!(outcome, DanceOutcome::Quarantine);
    assert_eq!(state.iteration, 3);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.action, ActionKind::Demote);
    assert!(config.archive_root.join("hot/silver/flaky.ts").is_file());
    assert!(!root.join("hot/silver/flaky.ts").exists());

    // Three transitions plus one demote record in the log.
    let content = fs::read_to_string(&config.log_path).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn run_dance_resolving_everything_is_a_rebirth() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/silver/fixed.ts", "code");
    let config = config_for(root);
    let remediator = Remediator::new(&config).unwrap();

    let mut state = DanceState::new(
        "hot/silver/fixed.ts",
        vec![DanceViolation::new(ViolationKind::DebugResidue, "console residue")],
        3,
    );

    let (outcome, results) = remediator.run_dance(root, &mut state, |s| {
        (0..s.violations.len()).collect()
    });

    assert_eq!(outcome, DanceOutcome::Rebirth);
    assert!(results.is_empty());
    assert_eq!(state.iteration, 1);
    // The artifact stays in place.
    assert!(root.join("hot/silver/fixed.ts").exists());
}

#[test]
fn every_action_lands_in_the_append_only_log() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "hot/gold/a.ts", "code");
    write(root, "stray.ts", "code");
    let config = config_for(root);

    let results = dance_die(
        root,
        &[
            receipt(ViolationKind::DebugResidue, "hot/gold/a.ts"),
            receipt(ViolationKind::DebugResidue, "stray.ts"),
        ],
        &config,
    )
    .unwrap();

    let content = fs::read_to_string(&config.log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), results.len());

    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        for field in ["file", "action", "reason", "timestamp"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }
}
