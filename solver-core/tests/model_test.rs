use std::collections::BTreeSet;

use solver_core::model::{
    AnalysisResult, ApproachClass, ComplexityClass, Difficulty, ExtractedConstraint, NodeId,
    NodeKind, NodeRef, PathEvidence, ProblemNode, RetrievalQuery, TestCategory, TestSuiteResult,
};

// ── Identity & ordering ───────────────────────────────────────────────────

#[test]
fn node_id_ordering_is_lexicographic() {
    let a = NodeId::new("p-001");
    let b = NodeId::new("p-002");
    assert!(a < b, "node id ordering backs the final ranking tie-break");
}

#[test]
fn problem_equality_is_identity() {
    let p1 = ProblemNode {
        id: NodeId::new("p1"),
        statement: "find the pair".into(),
        difficulty: Difficulty::Easy,
        tags: BTreeSet::from(["Array".to_string()]),
    };
    let mut p2 = p1.clone();
    p2.statement = "something else entirely".into();
    assert_eq!(p1, p2, "same id means same node regardless of content");
}

// ── Path evidence ─────────────────────────────────────────────────────────

#[test]
fn evidence_scores_default_to_zero_for_missing_path() {
    let g = PathEvidence::GraphOnly { graph: 0.5 };
    assert!((g.graph_score() - 0.5).abs() < f64::EPSILON);
    assert_eq!(g.vector_score(), 0.0);

    let v = PathEvidence::VectorOnly { vector: 0.9 };
    assert_eq!(v.graph_score(), 0.0);

    let b = PathEvidence::Both {
        graph: 0.5,
        vector: 0.9,
    };
    assert!((b.graph_score() - 0.5).abs() < f64::EPSILON);
    assert!((b.vector_score() - 0.9).abs() < f64::EPSILON);
}

// ── Approach class ────────────────────────────────────────────────────────

#[test]
fn approach_upgrade_chain_terminates_at_optimal() {
    assert_eq!(
        ApproachClass::BruteForce.upgraded(),
        Some(ApproachClass::Intermediate)
    );
    assert_eq!(
        ApproachClass::Intermediate.upgraded(),
        Some(ApproachClass::Optimal)
    );
    assert_eq!(ApproachClass::Optimal.upgraded(), None);
}

// ── Query assembly ────────────────────────────────────────────────────────

#[test]
fn embed_text_includes_constraint_summary() {
    let q = RetrievalQuery {
        text: "sum of pairs".into(),
        tags: BTreeSet::new(),
        constraint_summary: "n <= 100000".into(),
    };
    assert_eq!(q.embed_text(), "sum of pairs n <= 100000");

    let bare = RetrievalQuery {
        text: "sum of pairs".into(),
        ..Default::default()
    };
    assert_eq!(bare.embed_text(), "sum of pairs");
}

#[test]
fn constraint_summary_joins_all_constraints() {
    let analysis = AnalysisResult {
        statement: "s".into(),
        constraints: vec![
            ExtractedConstraint {
                text: "n <= 10^5".into(),
                variable: Some("n".into()),
                numeric_bound: Some(100_000),
            },
            ExtractedConstraint {
                text: "q <= 100".into(),
                variable: Some("q".into()),
                numeric_bound: Some(100),
            },
        ],
        tags: BTreeSet::new(),
        observations: vec![],
    };
    assert_eq!(analysis.constraint_summary(), "n <= 10^5; q <= 100");
}

// ── Test suite helpers ────────────────────────────────────────────────────

#[test]
fn suite_counts_by_category() {
    use solver_core::model::TestCase;
    let suite = TestSuiteResult {
        cases: vec![
            TestCase {
                category: TestCategory::Normal,
                name: "basic".into(),
                input: "3\n1 2 3".into(),
                rationale: "typical input".into(),
            },
            TestCase {
                category: TestCategory::Boundary,
                name: "max_n".into(),
                input: "100000".into(),
                rationale: "upper bound".into(),
            },
        ],
        boundary_derivation_degraded: false,
    };
    assert_eq!(suite.count_in(TestCategory::Normal), 1);
    assert_eq!(suite.count_in(TestCategory::Boundary), 1);
    assert_eq!(suite.count_in(TestCategory::Adversarial), 0);
}

// ── Serde round-trips ─────────────────────────────────────────────────────

#[test]
fn node_ref_serde_round_trip() {
    let r = NodeRef::new("s-42", NodeKind::Strategy);
    let json = serde_json::to_string(&r).unwrap();
    let back: NodeRef = serde_json::from_str(&json).unwrap();
    assert_eq!(r, back);
}

#[test]
fn complexity_serde_uses_snake_case() {
    let json = serde_json::to_string(&ComplexityClass::Linearithmic).unwrap();
    assert_eq!(json, "\"linearithmic\"");
}
