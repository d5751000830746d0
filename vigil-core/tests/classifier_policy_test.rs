//! Classifier and policy properties: determinism, boundary exactness,
//! tier-by-tier policy correctness.

use vigil_core::{
    classify_path, classify_score, evaluate_policy, ClassifyError, Medallion, PolicyDecision,
    ScoreTier, Temperature,
};

#[test]
fn score_boundaries_are_exact() {
    assert_eq!(classify_score(79.99).unwrap(), ScoreTier::Failure);
    assert_eq!(classify_score(80.0).unwrap(), ScoreTier::Goldilocks);
    assert_eq!(classify_score(98.99).unwrap(), ScoreTier::Goldilocks);
    assert_eq!(classify_score(99.0).unwrap(), ScoreTier::Theater);
    assert_eq!(classify_score(100.0).unwrap(), ScoreTier::Theater);
}

#[test]
fn classification_is_repeatable() {
    for score in [0.0, 42.5, 79.99, 80.0, 95.0, 99.0, 100.0] {
        assert_eq!(classify_score(score).unwrap(), classify_score(score).unwrap());
    }
    for path in ["hot/bronze/x.ts", "cold/gold/y.md", "README.md", "src/lib.rs"] {
        assert_eq!(classify_path(path).unwrap(), classify_path(path).unwrap());
    }
}

#[test]
fn invalid_scores_fail_fast() {
    for score in [f64::NAN, -1.0, 100.5, f64::NEG_INFINITY] {
        assert!(matches!(
            classify_score(score),
            Err(ClassifyError::ScoreOutOfRange { .. })
        ));
    }
}

#[test]
fn spec_scenario_hot_bronze() {
    let class = classify_path("hot/bronze/x.ts").unwrap();
    assert_eq!(class.medallion, Medallion::Bronze);
    assert_eq!(class.temperature, Some(Temperature::Hot));

    let policy = evaluate_policy("hot/bronze/x.ts").unwrap();
    assert_eq!(policy.decision, PolicyDecision::Allowed);
}

#[test]
fn spec_scenario_hot_gold() {
    let class = classify_path("hot/gold/x.md").unwrap();
    assert_eq!(class.medallion, Medallion::Gold);

    let policy = evaluate_policy("hot/gold/x.md").unwrap();
    assert_eq!(policy.decision, PolicyDecision::Denied);
}

#[test]
fn bronze_is_always_allowed() {
    for path in [
        "hot/bronze/a.ts",
        "cold/bronze/deep/nested/b.py",
        "hot/bronze/2024-01-01-scratch.md",
    ] {
        let policy = evaluate_policy(path).unwrap();
        assert_eq!(policy.decision, PolicyDecision::Allowed, "{path}");
    }
}

#[test]
fn promoted_tiers_are_always_denied() {
    for path in [
        "hot/silver/a.ts",
        "cold/silver/b.py",
        "hot/gold/c.rs",
        "cold/gold/nested/d.md",
    ] {
        let policy = evaluate_policy(path).unwrap();
        assert_eq!(policy.decision, PolicyDecision::Denied, "{path}");
        assert!(!policy.reason.is_empty());
    }
}

#[test]
fn root_is_gated_on_the_whitelist() {
    assert_eq!(
        evaluate_policy("README.md").unwrap().decision,
        PolicyDecision::Allowed
    );
    assert_eq!(
        evaluate_policy("docs/design.md").unwrap().decision,
        PolicyDecision::Allowed
    );
    assert_eq!(
        evaluate_policy("2024-03-15-standup.md").unwrap().decision,
        PolicyDecision::Allowed
    );
    assert_eq!(
        evaluate_policy("rogue-artifact.ts").unwrap().decision,
        PolicyDecision::Denied
    );
    assert_eq!(
        evaluate_policy("src/main.ts").unwrap().decision,
        PolicyDecision::Denied
    );
}
