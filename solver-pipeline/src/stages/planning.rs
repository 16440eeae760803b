//! Planning stage: analysis + retrieval candidates → candidate plans.
//!
//! Never fails. The highest-fused candidate's approach class is the
//! prior, but a near-tied candidate with a better class wins; empty
//! retrieval degrades to a brute-force sketch with the flag set.

use tracing::{debug, info};

use solver_core::model::{
    AnalysisResult, ApproachClass, NodeKind, PlanCandidate, PlanResult, RetrievalOutcome,
    StrategyNode,
};
use solver_core::traits::IGraphStore;

/// How many retrieved strategies are turned into candidate plans.
const MAX_CANDIDATE_PLANS: usize = 3;

/// Fused-score ratio under which a lower-ranked candidate still counts
/// as tied with the leader for approach-class selection.
const NEAR_TIE_RATIO: f64 = 0.95;

pub fn plan(
    analysis: &AnalysisResult,
    retrieval: &RetrievalOutcome,
    store: &dyn IGraphStore,
) -> PlanResult {
    let mut candidates = Vec::new();

    for c in &retrieval.candidates {
        if candidates.len() >= MAX_CANDIDATE_PLANS {
            break;
        }
        if c.node.kind != NodeKind::Strategy {
            continue;
        }
        // Hydration misses are soft: the candidate is skipped.
        if let Ok(Some(strategy)) = store.strategy(&c.node.id) {
            candidates.push((c.fused_score, plan_from_strategy(analysis, &strategy)));
        }
    }

    if candidates.is_empty() {
        info!(
            no_analogs = retrieval.no_analogs,
            "no usable analog, degrading to brute-force plan"
        );
        return PlanResult {
            candidates: vec![brute_force_fallback(analysis)],
            chosen: 0,
            degraded: true,
        };
    }

    // Prior: the top candidate. A near-tied candidate with a strictly
    // better approach class overrides the prior; earlier (higher fused)
    // candidates win equal-class ties, keeping selection deterministic.
    let top_score = candidates[0].0;
    let mut chosen = 0;
    for (i, (score, candidate)) in candidates.iter().enumerate() {
        if *score >= top_score * NEAR_TIE_RATIO
            && candidate.approach > candidates[chosen].1.approach
        {
            chosen = i;
        }
    }

    debug!(
        candidates = candidates.len(),
        chosen,
        approach = ?candidates[chosen].1.approach,
        "plan selected"
    );
    PlanResult {
        candidates: candidates.into_iter().map(|(_, p)| p).collect(),
        chosen,
        degraded: false,
    }
}

fn plan_from_strategy(analysis: &AnalysisResult, strategy: &StrategyNode) -> PlanCandidate {
    let pseudocode = format!(
        "problem: {}\n\
         1. parse the input\n\
         2. {}\n\
         3. emit the answer\n\
         target complexity: {} time, {} space",
        truncate(&analysis.statement, 120),
        strategy.pseudocode_summary,
        strategy.time_complexity,
        strategy.space_complexity,
    );
    PlanCandidate {
        approach: strategy.approach,
        pseudocode,
        derived_from: Some(strategy.id.clone()),
    }
}

fn brute_force_fallback(analysis: &AnalysisResult) -> PlanCandidate {
    let pseudocode = format!(
        "1. parse the input\n\
         2. enumerate every candidate combination for: {}\n\
         3. keep the best answer seen\n\
         4. emit the answer",
        truncate(&analysis.statement, 120),
    );
    PlanCandidate {
        approach: ApproachClass::BruteForce,
        pseudocode,
        derived_from: None,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use solver_core::model::{
        ComplexityClass, NodeId, NodeRef, PathEvidence, ProblemNode, RetrievalCandidate,
    };

    /// Minimal graph store stub: strategies by id, nothing else.
    #[derive(Default)]
    struct StubStore {
        strategies: Vec<StrategyNode>,
    }

    impl IGraphStore for StubStore {
        fn neighbors(
            &self,
            id: &NodeId,
            _rel: solver_core::model::RelationType,
        ) -> solver_core::errors::GraphResult<Vec<NodeRef>> {
            Err(solver_core::errors::GraphError::NotFound { id: id.clone() })
        }

        fn by_tag(
            &self,
            _tags: &BTreeSet<String>,
        ) -> solver_core::errors::GraphResult<Vec<ProblemNode>> {
            Ok(Vec::new())
        }

        fn problem(
            &self,
            _id: &NodeId,
        ) -> solver_core::errors::GraphResult<Option<ProblemNode>> {
            Ok(None)
        }

        fn strategy(
            &self,
            id: &NodeId,
        ) -> solver_core::errors::GraphResult<Option<StrategyNode>> {
            Ok(self.strategies.iter().find(|s| &s.id == id).cloned())
        }

        fn pattern(
            &self,
            _id: &NodeId,
        ) -> solver_core::errors::GraphResult<Option<solver_core::model::PatternNode>> {
            Ok(None)
        }

        fn constraint(
            &self,
            _id: &NodeId,
        ) -> solver_core::errors::GraphResult<Option<solver_core::model::ConstraintNode>> {
            Ok(None)
        }

        fn strategy_parent(
            &self,
            _id: &NodeId,
        ) -> solver_core::errors::GraphResult<Option<NodeId>> {
            Ok(None)
        }

        fn implementers(
            &self,
            _pattern: &NodeId,
        ) -> solver_core::errors::GraphResult<Vec<NodeRef>> {
            Ok(Vec::new())
        }
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            statement: "find the pair".into(),
            constraints: vec![],
            tags: BTreeSet::new(),
            observations: vec![],
        }
    }

    fn strategy(id: &str, approach: ApproachClass) -> StrategyNode {
        StrategyNode {
            id: NodeId::new(id),
            approach,
            pseudocode_summary: format!("apply {id}"),
            time_complexity: ComplexityClass::Linear,
            space_complexity: ComplexityClass::Constant,
        }
    }

    fn candidate(id: &str, fused: f64) -> RetrievalCandidate {
        RetrievalCandidate {
            node: NodeRef::strategy(id),
            evidence: PathEvidence::VectorOnly { vector: fused },
            fused_score: fused,
        }
    }

    #[test]
    fn empty_retrieval_degrades_to_brute_force() {
        let store = StubStore::default();
        let outcome = RetrievalOutcome {
            candidates: vec![],
            no_analogs: true,
            notes: vec![],
        };
        let plan = plan(&analysis(), &outcome, &store);
        assert!(plan.degraded);
        assert_eq!(plan.candidates.len(), 1);
        assert_eq!(plan.chosen_plan().approach, ApproachClass::BruteForce);
    }

    #[test]
    fn top_candidate_approach_is_the_prior() {
        let store = StubStore {
            strategies: vec![
                strategy("s-opt", ApproachClass::Optimal),
                strategy("s-bf", ApproachClass::BruteForce),
            ],
        };
        let outcome = RetrievalOutcome {
            candidates: vec![candidate("s-opt", 0.9), candidate("s-bf", 0.3)],
            no_analogs: false,
            notes: vec![],
        };
        let plan = plan(&analysis(), &outcome, &store);
        assert!(!plan.degraded);
        assert_eq!(plan.chosen_plan().approach, ApproachClass::Optimal);
        assert_eq!(
            plan.chosen_plan().derived_from.as_ref().unwrap().as_str(),
            "s-opt"
        );
    }

    #[test]
    fn near_tie_with_better_class_overrides_the_prior() {
        let store = StubStore {
            strategies: vec![
                strategy("s-bf", ApproachClass::BruteForce),
                strategy("s-opt", ApproachClass::Optimal),
            ],
        };
        let outcome = RetrievalOutcome {
            candidates: vec![candidate("s-bf", 0.90), candidate("s-opt", 0.89)],
            no_analogs: false,
            notes: vec![],
        };
        let plan = plan(&analysis(), &outcome, &store);
        assert_eq!(
            plan.chosen_plan().approach,
            ApproachClass::Optimal,
            "the prior guides but does not bind"
        );
    }

    #[test]
    fn unhydratable_candidates_are_skipped_softly() {
        let store = StubStore {
            strategies: vec![strategy("s-known", ApproachClass::Intermediate)],
        };
        let outcome = RetrievalOutcome {
            candidates: vec![candidate("s-ghost", 0.99), candidate("s-known", 0.5)],
            no_analogs: false,
            notes: vec![],
        };
        let plan = plan(&analysis(), &outcome, &store);
        assert_eq!(plan.candidates.len(), 1);
        assert_eq!(plan.chosen_plan().approach, ApproachClass::Intermediate);
    }
}
