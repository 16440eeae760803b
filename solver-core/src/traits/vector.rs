use crate::errors::VectorResult;
use crate::model::NodeRef;

/// Read-only query contract over the dense-embedding index.
pub trait IVectorIndex: Send + Sync {
    /// Top-k nearest nodes by similarity in [0, 1], descending, ties
    /// broken by node insertion order. Returning fewer than `k` results
    /// is not an error.
    fn nearest(&self, embedding: &[f32], k: usize) -> VectorResult<Vec<(NodeRef, f32)>>;

    /// Dimensionality the index was built with.
    fn dimensions(&self) -> usize;
}

/// Embedding generation provider.
///
/// Treated as a pure, deterministic-enough function; no retry semantics
/// beyond the index call itself.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a fixed-length vector.
    fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
