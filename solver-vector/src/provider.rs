//! Deterministic offline embedding provider.
//!
//! Hashes lowercased alphanumeric terms into a fixed-width vector and
//! L2-normalizes. No model weights, no network: the same text always
//! maps to the same vector, which is what reproducible retrieval tests
//! need. Production deployments inject a model-backed provider instead.

use solver_core::errors::VectorResult;
use solver_core::traits::IEmbeddingProvider;

/// Hashed bag-of-words provider.
#[derive(Debug, Clone)]
pub struct HashedBowProvider {
    dimensions: usize,
}

impl HashedBowProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashedBowProvider {
    fn default() -> Self {
        Self::new(256)
    }
}

impl IEmbeddingProvider for HashedBowProvider {
    fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];

        for term in terms(text) {
            let slot = term_slot(&term, self.dimensions);
            vector[slot] += 1.0;
        }

        // L2-normalize so cosine similarity behaves.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-bow"
    }
}

/// Lowercased alphanumeric terms of the input.
fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Stable FNV-1a hash of the term, reduced to a vector slot.
fn term_slot(term: &str, dimensions: usize) -> usize {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for byte in term.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % dimensions as u64) as usize
}
