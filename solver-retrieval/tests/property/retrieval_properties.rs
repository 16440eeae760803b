use std::collections::HashMap;

use proptest::prelude::*;

use solver_core::config::RetrievalConfig;
use solver_core::model::{NodeId, NodeKind, PathEvidence};
use solver_retrieval::fusion;

fn score_maps(
    max_nodes: usize,
) -> impl Strategy<Value = (HashMap<NodeId, f64>, HashMap<NodeId, f64>)> {
    let node_ids = prop::collection::vec("[a-z]{1,6}", 0..max_nodes);
    (node_ids, any::<u64>()).prop_map(|(ids, seed)| {
        let mut graph = HashMap::new();
        let mut vector = HashMap::new();
        for (i, id) in ids.iter().enumerate() {
            // Deterministic pseudo-scores derived from the seed.
            let g = ((seed.wrapping_mul(i as u64 + 1) % 1000) as f64) / 1000.0;
            let v = ((seed.wrapping_mul(i as u64 + 7) % 1000) as f64) / 1000.0;
            if i % 3 != 0 {
                graph.insert(NodeId::new(id.clone()), g.max(0.001));
            }
            if i % 3 != 1 {
                vector.insert(NodeId::new(id.clone()), v.max(0.001));
            }
        }
        (graph, vector)
    })
}

fn kinds_for(
    graph: &HashMap<NodeId, f64>,
    vector: &HashMap<NodeId, f64>,
) -> HashMap<NodeId, NodeKind> {
    graph
        .keys()
        .chain(vector.keys())
        .map(|id| (id.clone(), NodeKind::Strategy))
        .collect()
}

proptest! {
    #[test]
    fn fusion_is_deterministic((graph, vector) in score_maps(24)) {
        let config = RetrievalConfig::default();
        let kinds = kinds_for(&graph, &vector);

        let a = fusion::fuse(&graph, &vector, &kinds, &config);
        let b = fusion::fuse(&graph, &vector, &kinds, &config);

        let project = |cs: &[solver_core::model::RetrievalCandidate]| {
            cs.iter()
                .map(|c| (c.node.id.clone(), c.fused_score))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(project(&a), project(&b));
    }

    #[test]
    fn fused_scores_are_non_increasing((graph, vector) in score_maps(24)) {
        let config = RetrievalConfig::default();
        let kinds = kinds_for(&graph, &vector);
        let fused = fusion::fuse(&graph, &vector, &kinds, &config);

        for pair in fused.windows(2) {
            prop_assert!(pair[0].fused_score >= pair[1].fused_score);
        }
    }

    #[test]
    fn every_input_node_appears_exactly_once((graph, vector) in score_maps(24)) {
        let config = RetrievalConfig::default();
        let kinds = kinds_for(&graph, &vector);
        let fused = fusion::fuse(&graph, &vector, &kinds, &config);

        let mut expected: Vec<&NodeId> = kinds.keys().collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(fused.len(), expected.len());

        let mut seen: Vec<&NodeId> = fused.iter().map(|c| &c.node.id).collect();
        seen.sort();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn corroboration_always_beats_single_path((graph, vector) in score_maps(24)) {
        let config = RetrievalConfig::default();
        let kinds = kinds_for(&graph, &vector);
        let fused = fusion::fuse(&graph, &vector, &kinds, &config);

        for c in &fused {
            if let PathEvidence::Both { graph: g, vector: v } = c.evidence {
                // With positive weights, the fused score strictly exceeds
                // either single-path scaled score.
                let g_alone = config.fusion_weights.graph * g * config.single_path_penalty;
                let v_alone = config.fusion_weights.vector * v * config.single_path_penalty;
                prop_assert!(c.fused_score > g_alone);
                prop_assert!(c.fused_score > v_alone);
            }
        }
    }
}
