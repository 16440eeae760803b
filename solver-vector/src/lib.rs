//! # solver-vector
//!
//! Dense-embedding side of hybrid retrieval: the similarity index the
//! core queries, a deterministic offline embedding provider, and the
//! process-wide embedding cache.

mod cache;
mod index;
mod provider;

pub use cache::EmbeddingCache;
pub use index::MemoryVectorIndex;
pub use provider::HashedBowProvider;
