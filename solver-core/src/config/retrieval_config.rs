use serde::{Deserialize, Serialize};

use super::defaults;
use crate::model::Difficulty;

/// Weights for fusing the two retrieval paths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub graph: f64,
    pub vector: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            graph: defaults::DEFAULT_GRAPH_WEIGHT,
            vector: defaults::DEFAULT_VECTOR_WEIGHT,
        }
    }
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Graph traversal depth.
    pub hop_limit: usize,
    /// Vector neighbor count.
    pub k: usize,
    pub fusion_weights: FusionWeights,
    /// Scale for single-path candidates, to favor corroborated evidence.
    pub single_path_penalty: f64,
    /// Optional eligibility ceiling: problems harder than this are
    /// filtered out of the graph path and strategy hydration.
    pub difficulty_ceiling: Option<Difficulty>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            hop_limit: defaults::DEFAULT_HOP_LIMIT,
            k: defaults::DEFAULT_K,
            fusion_weights: FusionWeights::default(),
            single_path_penalty: defaults::DEFAULT_SINGLE_PATH_PENALTY,
            difficulty_ceiling: None,
        }
    }
}
