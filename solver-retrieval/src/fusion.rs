//! Score fusion: combine the two path score maps into one ranked list.
//!
//! A pure function over the path results: candidates seen by both
//! paths get the weighted combination, single-path candidates get their
//! weighted score scaled by the corroboration penalty. The output order
//! is total and deterministic: fused score descending, then graph score
//! descending, then node id ascending.

use std::collections::HashMap;

use solver_core::config::RetrievalConfig;
use solver_core::model::{NodeId, NodeKind, NodeRef, PathEvidence, RetrievalCandidate};

/// Fuse the per-path score maps. `kinds` resolves each node id back to
/// its kind for the candidate's `NodeRef`.
pub fn fuse(
    graph_scores: &HashMap<NodeId, f64>,
    vector_scores: &HashMap<NodeId, f64>,
    kinds: &HashMap<NodeId, NodeKind>,
    config: &RetrievalConfig,
) -> Vec<RetrievalCandidate> {
    let w = config.fusion_weights;
    let penalty = config.single_path_penalty;

    let mut candidates: Vec<RetrievalCandidate> = Vec::new();

    for (id, &graph) in graph_scores {
        let evidence = match vector_scores.get(id) {
            Some(&vector) => PathEvidence::Both { graph, vector },
            None => PathEvidence::GraphOnly { graph },
        };
        candidates.push(candidate(id, evidence, kinds, w.graph, w.vector, penalty));
    }
    for (id, &vector) in vector_scores {
        if graph_scores.contains_key(id) {
            continue; // already fused above
        }
        let evidence = PathEvidence::VectorOnly { vector };
        candidates.push(candidate(id, evidence, kinds, w.graph, w.vector, penalty));
    }

    sort_candidates(&mut candidates);
    candidates
}

fn candidate(
    id: &NodeId,
    evidence: PathEvidence,
    kinds: &HashMap<NodeId, NodeKind>,
    w_g: f64,
    w_v: f64,
    penalty: f64,
) -> RetrievalCandidate {
    // Single-path candidates take their weighted score scaled by the
    // corroboration penalty, so a Both candidate always outranks what
    // either of its paths would have earned alone.
    let fused_score = match evidence {
        PathEvidence::Both { graph, vector } => w_g * graph + w_v * vector,
        PathEvidence::GraphOnly { graph } => w_g * graph * penalty,
        PathEvidence::VectorOnly { vector } => w_v * vector * penalty,
    };
    let kind = kinds.get(id).copied().unwrap_or(NodeKind::Strategy);
    RetrievalCandidate {
        node: NodeRef::new(id.clone(), kind),
        evidence,
        fused_score,
    }
}

/// Total, deterministic candidate order.
pub fn sort_candidates(candidates: &mut [RetrievalCandidate]) {
    candidates.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.evidence
                    .graph_score()
                    .partial_cmp(&a.evidence.graph_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.node.id.cmp(&b.node.id))
    });
}
