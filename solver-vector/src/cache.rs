//! Process-wide embedding cache.
//!
//! Read-mostly, shared across sessions, keyed by blake3 hash of the
//! input text. Ingestion events must call `invalidate_all`; the cache
//! is owned by the engine and passed explicitly, never ambient global
//! state.

use moka::sync::Cache;
use std::sync::Arc;
use tracing::debug;

use solver_core::errors::VectorResult;
use solver_core::traits::IEmbeddingProvider;

/// Caching wrapper around an [`IEmbeddingProvider`].
pub struct EmbeddingCache {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Invalidate every cached embedding. Called on ingestion events so
    /// stale vectors never outlive a store update.
    pub fn invalidate_all(&self) {
        debug!("embedding cache invalidated");
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl IEmbeddingProvider for EmbeddingCache {
    fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let vector = self.inner.embed(text)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
