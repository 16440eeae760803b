//! Retrieval query and candidate types.
//!
//! Candidates are ephemeral: produced per query, never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::NodeRef;

/// A structured retrieval query, produced by the Analysis stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RetrievalQuery {
    /// Free-text problem statement.
    pub text: String,
    /// Inferred tags. Empty set skips the graph path entirely.
    pub tags: BTreeSet<String>,
    /// Short summary of extracted constraints; participates in the
    /// embedded query text.
    pub constraint_summary: String,
}

impl RetrievalQuery {
    /// The text handed to the embedding provider: statement plus
    /// constraint summary when present.
    pub fn embed_text(&self) -> String {
        if self.constraint_summary.is_empty() {
            self.text.clone()
        } else {
            format!("{} {}", self.text, self.constraint_summary)
        }
    }
}

/// Which retrieval path(s) produced a candidate, with the per-path scores.
///
/// Tagged variants make the fusion a pure function over the result shape
/// instead of a dynamic dispatch on which lists a node appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum PathEvidence {
    /// Reached only through graph traversal; score = 1 / (1 + hops).
    GraphOnly { graph: f64 },
    /// Returned only by the vector index; score = similarity in [0, 1].
    VectorOnly { vector: f64 },
    /// Corroborated by both paths.
    Both { graph: f64, vector: f64 },
}

impl PathEvidence {
    /// The graph-path score, zero when the graph path did not see this
    /// candidate. Used as the second-level ranking tie-break.
    pub fn graph_score(&self) -> f64 {
        match self {
            Self::GraphOnly { graph } | Self::Both { graph, .. } => *graph,
            Self::VectorOnly { .. } => 0.0,
        }
    }

    pub fn vector_score(&self) -> f64 {
        match self {
            Self::VectorOnly { vector } | Self::Both { vector, .. } => *vector,
            Self::GraphOnly { .. } => 0.0,
        }
    }
}

/// A fused retrieval candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalCandidate {
    pub node: NodeRef,
    pub evidence: PathEvidence,
    /// Weighted combination of the path scores (single-path candidates
    /// are penalized to favor corroborated evidence).
    pub fused_score: f64,
}

/// The full outcome of one hybrid retrieval run.
///
/// An empty candidate list is a valid outcome ("no analogs"), signalled
/// by the flag rather than an error so Planning can degrade explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RetrievalOutcome {
    /// Candidates in descending fused-score order (total, deterministic).
    pub candidates: Vec<RetrievalCandidate>,
    /// True when both paths came back empty.
    pub no_analogs: bool,
    /// Soft conditions absorbed during retrieval (misses, timeouts).
    pub notes: Vec<String>,
}

impl RetrievalOutcome {
    pub fn empty_with_note(note: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            no_analogs: true,
            notes: vec![note.into()],
        }
    }
}
