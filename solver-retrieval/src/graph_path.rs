//! Graph path: multi-source BFS from tag-matched problems to analog
//! strategies.
//!
//! Each reached strategy scores 1 / (1 + hop distance), hop distance
//! being the minimum over all seeds (BFS first-visit). `NotFound` from
//! the store is a soft miss: the node is skipped and the miss noted,
//! never aborting retrieval.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::debug;

use solver_core::config::RetrievalConfig;
use solver_core::constants::MAX_HOP_LIMIT;
use solver_core::errors::GraphError;
use solver_core::model::{NodeId, NodeKind, NodeRef, ProblemNode, RelationType};
use solver_core::traits::IGraphStore;

/// Result of the graph path: strategy scores plus absorbed soft misses.
#[derive(Debug, Default)]
pub struct GraphPathResult {
    /// Strategy node → graph score in (0, 1].
    pub scores: HashMap<NodeId, f64>,
    pub notes: Vec<String>,
}

/// Whether a problem passes the tag/difficulty eligibility filter.
pub fn problem_eligible(
    problem: &ProblemNode,
    tags: &BTreeSet<String>,
    config: &RetrievalConfig,
) -> bool {
    if let Some(ceiling) = config.difficulty_ceiling {
        if problem.difficulty > ceiling {
            return false;
        }
    }
    tags.is_empty() || tags.iter().all(|t| problem.tags.contains(t))
}

/// Run the graph path. Call only with a non-empty tag set; an empty set
/// skips this path entirely (the engine enforces that).
pub fn traverse(
    store: &dyn IGraphStore,
    tags: &BTreeSet<String>,
    config: &RetrievalConfig,
) -> GraphPathResult {
    let mut result = GraphPathResult::default();
    let hop_limit = config.hop_limit.min(MAX_HOP_LIMIT);

    let seeds = match store.by_tag(tags) {
        Ok(problems) => problems,
        Err(e) => {
            result.notes.push(format!("graph path: tag query failed: {e}"));
            return result;
        }
    };

    // Multi-source BFS; first visit wins, giving minimal hop distance.
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeRef, usize)> = VecDeque::new();
    let mut seed_count = 0usize;

    for problem in &seeds {
        if !problem_eligible(problem, tags, config) {
            continue;
        }
        seed_count += 1;
        visited.insert(problem.id.clone());
        queue.push_back((NodeRef::problem(problem.id.clone()), 0));
    }

    while let Some((node, hops)) = queue.pop_front() {
        if node.kind == NodeKind::Strategy && parent_within_ceiling(store, &node.id, config) {
            let score = 1.0 / (1.0 + hops as f64);
            result.scores.entry(node.id.clone()).or_insert(score);
        }
        if hops >= hop_limit {
            continue;
        }

        for next in expand(store, &node, &mut result.notes) {
            if visited.insert(next.id.clone()) {
                queue.push_back((next, hops + 1));
            }
        }
    }

    debug!(
        seeds = seed_count,
        strategies = result.scores.len(),
        hop_limit,
        "graph path complete"
    );
    result
}

/// Whether a strategy's parent problem sits within the difficulty
/// ceiling. Topical relevance is already established structurally (the
/// strategy is reachable from a tag-matched seed), so only the ceiling
/// applies here; the vector path enforces the full filter.
fn parent_within_ceiling(
    store: &dyn IGraphStore,
    strategy: &NodeId,
    config: &RetrievalConfig,
) -> bool {
    let Some(ceiling) = config.difficulty_ceiling else {
        return true;
    };
    match store.strategy_parent(strategy) {
        Ok(Some(parent)) => match store.problem(&parent) {
            Ok(Some(p)) => p.difficulty <= ceiling,
            _ => false,
        },
        _ => false,
    }
}

/// Outgoing frontier of one node, by kind. Soft-misses are noted and
/// yield an empty frontier.
fn expand(store: &dyn IGraphStore, node: &NodeRef, notes: &mut Vec<String>) -> Vec<NodeRef> {
    let mut frontier = Vec::new();
    let mut note_miss = |rel: &str, err: &GraphError| {
        notes.push(format!("graph path: {rel} from {} missed: {err}", node.id));
    };

    match node.kind {
        NodeKind::Problem => {
            match store.neighbors(&node.id, RelationType::SolvedBy) {
                Ok(refs) => frontier.extend(refs),
                Err(e) => note_miss("solved_by", &e),
            }
            match store.neighbors(&node.id, RelationType::UsesPattern) {
                Ok(refs) => frontier.extend(refs),
                Err(e) => note_miss("uses_pattern", &e),
            }
        }
        NodeKind::Pattern => match store.implementers(&node.id) {
            Ok(refs) => frontier.extend(refs),
            Err(e) => note_miss("implementers", &e),
        },
        NodeKind::Strategy => match store.neighbors(&node.id, RelationType::Implements) {
            Ok(refs) => frontier.extend(refs),
            Err(e) => note_miss("implements", &e),
        },
        NodeKind::Constraint => {}
    }
    frontier
}
