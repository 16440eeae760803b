//! Vector path: embed the query and collect nearest problem/strategy
//! embeddings, enforcing the eligibility invariant.
//!
//! A strategy never leaves this path unless its parent problem passes
//! the same tag/difficulty filter the graph path seeds from; high
//! similarity alone must not leak topically irrelevant strategies.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use solver_core::config::RetrievalConfig;
use solver_core::model::{NodeId, NodeKind};
use solver_core::traits::{IEmbeddingProvider, IGraphStore, IVectorIndex};

use crate::graph_path::problem_eligible;

/// Result of the vector path: similarity scores plus absorbed misses.
#[derive(Debug, Default)]
pub struct VectorPathResult {
    /// Node → similarity in [0, 1].
    pub scores: HashMap<NodeId, f64>,
    /// Node → kind, for rebuilding refs after fusion.
    pub kinds: HashMap<NodeId, NodeKind>,
    pub notes: Vec<String>,
}

pub fn search(
    store: &dyn IGraphStore,
    index: &dyn IVectorIndex,
    embedder: &dyn IEmbeddingProvider,
    query_text: &str,
    tags: &BTreeSet<String>,
    config: &RetrievalConfig,
) -> VectorPathResult {
    let mut result = VectorPathResult::default();

    let embedding = match embedder.embed(query_text) {
        Ok(v) => v,
        Err(e) => {
            result.notes.push(format!("vector path: embedding failed: {e}"));
            return result;
        }
    };

    let hits = match index.nearest(&embedding, config.k) {
        Ok(hits) => hits,
        Err(e) => {
            result.notes.push(format!("vector path: nearest failed: {e}"));
            return result;
        }
    };

    for (node, similarity) in hits {
        let eligible = match node.kind {
            NodeKind::Strategy => strategy_eligible(store, &node.id, tags, config),
            NodeKind::Problem => match store.problem(&node.id) {
                Ok(Some(p)) => problem_eligible(&p, tags, config),
                _ => false,
            },
            // Only problems and strategies carry embeddings.
            _ => false,
        };
        if eligible {
            result.kinds.insert(node.id.clone(), node.kind);
            result.scores.insert(node.id, f64::from(similarity));
        }
    }

    debug!(hits = result.scores.len(), k = config.k, "vector path complete");
    result
}

/// The eligibility invariant: a strategy is eligible iff its parent
/// problem exists and passes the tag/difficulty filter.
fn strategy_eligible(
    store: &dyn IGraphStore,
    strategy: &NodeId,
    tags: &BTreeSet<String>,
    config: &RetrievalConfig,
) -> bool {
    let parent = match store.strategy_parent(strategy) {
        Ok(Some(parent)) => parent,
        _ => return false,
    };
    match store.problem(&parent) {
        Ok(Some(p)) => problem_eligible(&p, tags, config),
        _ => false,
    }
}
