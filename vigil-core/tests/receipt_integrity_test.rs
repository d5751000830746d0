//! Receipt integrity: round-trip verification, tamper evidence, the
//! persisted line format, and the score-receipt contract.

use serde_json::{json, Map, Value};

use vigil_core::receipt::verify_value;
use vigil_core::{
    score_receipt, PolicyReceipt, ReceiptError, Severity, ViolationKind, ViolationReceipt,
};

fn sample_detail() -> Map<String, Value> {
    let mut detail = Map::new();
    detail.insert("rule".into(), json!("Console Debug"));
    detail.insert("lines".into(), json!([12, 40]));
    detail.insert("matchCount".into(), json!(2));
    detail
}

#[test]
fn created_receipts_always_verify() {
    let receipt = ViolationReceipt::create(
        ViolationKind::DebugResidue,
        3,
        "hot/bronze/app.ts",
        sample_detail(),
    )
    .unwrap();
    assert!(receipt.verify());
}

#[test]
fn hash_format_is_portable() {
    let receipt =
        ViolationReceipt::create(ViolationKind::SkippedTest, 4, "tests/x.test.ts", Map::new())
            .unwrap();
    let hex = receipt.hash.strip_prefix("sha256:").unwrap();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn persisted_line_verifies_as_a_value() {
    let receipt = ViolationReceipt::create(
        ViolationKind::HardcodedSecret,
        1,
        "hot/bronze/db.ts",
        sample_detail(),
    )
    .unwrap();

    // One JSON object per line, verified without the typed wrapper.
    let line = serde_json::to_string(&receipt).unwrap();
    let value: Value = serde_json::from_str(&line).unwrap();
    assert!(verify_value(&value));

    let mut corrupted = value.clone();
    corrupted["file"] = json!("hot/bronze/elsewhere.ts");
    assert!(!verify_value(&corrupted));

    let mut missing = value;
    missing.as_object_mut().unwrap().remove("severity");
    assert!(!verify_value(&missing));
}

#[test]
fn mutating_each_field_breaks_the_hash() {
    let receipt = ViolationReceipt::create(
        ViolationKind::MockTheater,
        0,
        "hot/silver/svc.ts",
        sample_detail(),
    )
    .unwrap();

    let mut by_file = receipt.clone();
    by_file.file.push('x');
    assert!(!by_file.verify());

    let mut by_time = receipt.clone();
    by_time.timestamp -= 1;
    assert!(!by_time.verify());

    let mut by_severity = receipt.clone();
    by_severity.severity = Severity::Warning;
    assert!(!by_severity.verify());

    let mut by_detail = receipt.clone();
    by_detail.detail.insert("lines".into(), json!([1]));
    assert!(!by_detail.verify());

    let mut by_kind = receipt.clone();
    by_kind.violation_type = ViolationKind::DebugResidue;
    assert!(!by_kind.verify());
}

#[test]
fn failing_score_produces_mutation_failure() {
    let receipt = score_receipt(75.0, "hot/bronze/calc.ts").unwrap();
    assert_eq!(receipt.violation_type, ViolationKind::MutationFailure);
    assert!(receipt.verify());
}

#[test]
fn goldilocks_score_refuses_a_receipt() {
    let err = score_receipt(90.0, "hot/bronze/calc.ts").unwrap_err();
    assert!(matches!(err, ReceiptError::ScoreNotViolation { score } if score == 90.0));
}

#[test]
fn invalid_score_propagates_the_domain_error() {
    assert!(matches!(
        score_receipt(f64::NAN, "x.ts"),
        Err(ReceiptError::Classify(_))
    ));
}

#[test]
fn policy_receipt_matches_wire_format() {
    let receipt = PolicyReceipt::create_at("hot/silver/pending.ts", 1_700_000_000_000).unwrap();
    let value = serde_json::to_value(&receipt).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj["kind"], json!("POLICY"));
    assert_eq!(obj["channel"], json!(5));
    assert_eq!(obj["decision"], json!("DENIED"));
    assert_eq!(obj["medallion"], json!("SILVER"));
    assert_eq!(obj["temperature"], json!("HOT"));
    assert!(verify_value(&value));
}

#[test]
fn root_policy_receipt_has_null_temperature() {
    let receipt = PolicyReceipt::create_at("README.md", 1_700_000_000_000).unwrap();
    let value = serde_json::to_value(&receipt).unwrap();
    assert_eq!(value["temperature"], Value::Null);
    assert_eq!(value["decision"], json!("ALLOWED"));
}
