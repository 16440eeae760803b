//! Brute-force cosine similarity index with stable tie-breaks.

use tracing::debug;

use solver_core::errors::{VectorError, VectorResult};
use solver_core::model::NodeRef;
use solver_core::traits::IVectorIndex;

/// In-memory [`IVectorIndex`].
///
/// Entries keep their insertion sequence; equal similarities are ordered
/// by it, so `nearest` is reproducible across runs. Query methods take
/// `&self`; after ingestion the index is shared read-only via `Arc`.
#[derive(Debug)]
pub struct MemoryVectorIndex {
    dimensions: usize,
    entries: Vec<(NodeRef, Vec<f32>)>,
}

impl MemoryVectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    /// Ingestion write surface: bind an embedding to a node, 1:1.
    /// Re-inserting the same node replaces its embedding in place,
    /// preserving the original insertion position.
    pub fn insert(&mut self, node: NodeRef, embedding: Vec<f32>) -> VectorResult<()> {
        if embedding.len() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == node) {
            slot.1 = embedding;
        } else {
            self.entries.push((node, embedding));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IVectorIndex for MemoryVectorIndex {
    fn nearest(&self, embedding: &[f32], k: usize) -> VectorResult<Vec<(NodeRef, f32)>> {
        if embedding.len() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        // Zero-norm query matches nothing.
        let query_norm_sq: f64 = embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
        if query_norm_sq == 0.0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &NodeRef, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(seq, (node, stored))| {
                let sim = cosine_similarity(embedding, stored).max(0.0) as f32;
                (seq, node, sim)
            })
            .filter(|(_, _, sim)| *sim > 0.0)
            .collect();

        // Similarity descending, insertion order on ties.
        scored.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        debug!(hits = scored.len(), k, "vector nearest query");
        Ok(scored
            .into_iter()
            .map(|(_, node, sim)| (node.clone(), sim))
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let norm_b: f64 = b
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
