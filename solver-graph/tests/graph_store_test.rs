use std::collections::BTreeSet;

use solver_core::errors::GraphError;
use solver_core::model::{
    ApproachClass, ComplexityClass, ConstraintNode, Difficulty, NodeId, NodeKind, PatternNode,
    ProblemNode, RelationType, StrategyNode,
};
use solver_core::traits::IGraphStore;
use solver_graph::MemoryGraphStore;

fn problem(id: &str, tags: &[&str]) -> ProblemNode {
    ProblemNode {
        id: NodeId::new(id),
        statement: format!("statement for {id}"),
        difficulty: Difficulty::Medium,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn strategy(id: &str, approach: ApproachClass) -> StrategyNode {
    StrategyNode {
        id: NodeId::new(id),
        approach,
        pseudocode_summary: format!("pseudocode for {id}"),
        time_complexity: ComplexityClass::Linear,
        space_complexity: ComplexityClass::Linear,
    }
}

// ── neighbors ─────────────────────────────────────────────────────────────

#[test]
fn neighbors_returns_relation_creation_order() {
    let mut store = MemoryGraphStore::new();
    let p = store.insert_problem(problem("p1", &["Array"]));
    let s1 = store.insert_strategy(strategy("s1", ApproachClass::BruteForce));
    let s2 = store.insert_strategy(strategy("s2", ApproachClass::Optimal));
    let s3 = store.insert_strategy(strategy("s3", ApproachClass::Intermediate));

    // Relate out of id order on purpose.
    store.relate(&p, &s2, RelationType::SolvedBy).unwrap();
    store.relate(&p, &s1, RelationType::SolvedBy).unwrap();
    store.relate(&p, &s3, RelationType::SolvedBy).unwrap();

    let refs = store.neighbors(&p, RelationType::SolvedBy).unwrap();
    let ids: Vec<&str> = refs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1", "s3"], "relation-creation order");
    assert!(refs.iter().all(|r| r.kind == NodeKind::Strategy));
}

#[test]
fn neighbors_filters_by_relation_type() {
    let mut store = MemoryGraphStore::new();
    let p = store.insert_problem(problem("p1", &["Array"]));
    let s = store.insert_strategy(strategy("s1", ApproachClass::Optimal));
    let pat = store.insert_pattern(PatternNode {
        id: NodeId::new("pat1"),
        name: "two-pointer".into(),
        description: "walk from both ends".into(),
    });

    store.relate(&p, &s, RelationType::SolvedBy).unwrap();
    store.relate(&p, &pat, RelationType::UsesPattern).unwrap();

    let solved = store.neighbors(&p, RelationType::SolvedBy).unwrap();
    assert_eq!(solved.len(), 1);
    assert_eq!(solved[0].id.as_str(), "s1");

    let patterns = store.neighbors(&p, RelationType::UsesPattern).unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].id.as_str(), "pat1");
}

#[test]
fn neighbors_of_missing_node_is_not_found() {
    let store = MemoryGraphStore::new();
    let err = store
        .neighbors(&NodeId::new("ghost"), RelationType::SolvedBy)
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));
}

#[test]
fn relate_rejects_missing_endpoints() {
    let mut store = MemoryGraphStore::new();
    let p = store.insert_problem(problem("p1", &[]));
    let err = store
        .relate(&p, &NodeId::new("ghost"), RelationType::SolvedBy)
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));
}

// ── by_tag ────────────────────────────────────────────────────────────────

#[test]
fn by_tag_uses_intersection_semantics() {
    let mut store = MemoryGraphStore::new();
    store.insert_problem(problem("p1", &["Array", "Two Pointer"]));
    store.insert_problem(problem("p2", &["Array"]));
    store.insert_problem(problem("p3", &["Strings"]));

    let tags: BTreeSet<String> = ["Array".to_string(), "Two Pointer".to_string()]
        .into_iter()
        .collect();
    let hits = store.by_tag(&tags).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_str(), "p1");
}

#[test]
fn by_tag_returns_insertion_order() {
    let mut store = MemoryGraphStore::new();
    store.insert_problem(problem("p-z", &["Array"]));
    store.insert_problem(problem("p-a", &["Array"]));

    let tags: BTreeSet<String> = ["Array".to_string()].into_iter().collect();
    let hits = store.by_tag(&tags).unwrap();
    let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-z", "p-a"], "insertion order, not id order");
}

#[test]
fn by_tag_with_empty_set_is_empty() {
    let mut store = MemoryGraphStore::new();
    store.insert_problem(problem("p1", &["Array"]));
    assert!(store.by_tag(&BTreeSet::new()).unwrap().is_empty());
}

// ── hydration & parents ───────────────────────────────────────────────────

#[test]
fn hydration_is_kind_checked() {
    let mut store = MemoryGraphStore::new();
    let p = store.insert_problem(problem("p1", &[]));
    let s = store.insert_strategy(strategy("s1", ApproachClass::Optimal));

    assert!(store.problem(&p).unwrap().is_some());
    assert!(store.strategy(&p).unwrap().is_none(), "p1 is not a strategy");
    assert!(store.strategy(&s).unwrap().is_some());
    assert!(store.problem(&NodeId::new("ghost")).unwrap().is_none());
}

#[test]
fn strategy_parent_follows_solved_by_backwards() {
    let mut store = MemoryGraphStore::new();
    let p = store.insert_problem(problem("p1", &[]));
    let s = store.insert_strategy(strategy("s1", ApproachClass::Optimal));
    let c = store.insert_constraint(ConstraintNode {
        id: NodeId::new("c1"),
        text: "n <= 100000".into(),
        numeric_bound: Some(100_000),
    });

    store.relate(&p, &s, RelationType::SolvedBy).unwrap();
    store.relate(&p, &c, RelationType::HasConstraint).unwrap();

    assert_eq!(store.strategy_parent(&s).unwrap(), Some(p));
    assert_eq!(store.strategy_parent(&c).unwrap(), None);
}

#[test]
fn implementers_is_the_reverse_of_implements() {
    let mut store = MemoryGraphStore::new();
    let pat = store.insert_pattern(PatternNode {
        id: NodeId::new("pat1"),
        name: "binary search".into(),
        description: "halve the search space".into(),
    });
    let s1 = store.insert_strategy(strategy("s1", ApproachClass::Optimal));
    let s2 = store.insert_strategy(strategy("s2", ApproachClass::Intermediate));

    store.relate(&s2, &pat, RelationType::Implements).unwrap();
    store.relate(&s1, &pat, RelationType::Implements).unwrap();

    let refs = store.implementers(&pat).unwrap();
    let ids: Vec<&str> = refs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1"], "relation-creation order");
}
