//! HybridRetriever: orchestrates graph path → vector path → fusion.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use solver_core::config::RetrievalConfig;
use solver_core::model::{NodeKind, RetrievalOutcome, RetrievalQuery};
use solver_core::traits::{IEmbeddingProvider, IGraphStore, IRetriever, IVectorIndex};

use crate::fusion;
use crate::graph_path;
use crate::vector_path;

/// The hybrid retrieval engine.
///
/// Holds read-only shares of both stores plus the injected embedding
/// provider; safe to call from any number of concurrent sessions.
pub struct HybridRetriever {
    store: Arc<dyn IGraphStore>,
    index: Arc<dyn IVectorIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(
        store: Arc<dyn IGraphStore>,
        index: Arc<dyn IVectorIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }
}

impl IRetriever for HybridRetriever {
    fn retrieve(&self, query: &RetrievalQuery) -> RetrievalOutcome {
        let mut notes = Vec::new();

        // Step A: graph path. An empty tag set skips it entirely.
        let graph = if query.tags.is_empty() {
            debug!("empty tag set, graph path skipped");
            graph_path::GraphPathResult::default()
        } else {
            graph_path::traverse(self.store.as_ref(), &query.tags, &self.config)
        };
        notes.extend(graph.notes);

        // Step B: vector path.
        let vector = vector_path::search(
            self.store.as_ref(),
            self.index.as_ref(),
            self.embedder.as_ref(),
            &query.embed_text(),
            &query.tags,
            &self.config,
        );
        notes.extend(vector.notes);

        // Step C: fusion. Graph-path candidates are always strategies;
        // the vector path carries its own kinds.
        let mut kinds: HashMap<_, _> = graph
            .scores
            .keys()
            .map(|id| (id.clone(), NodeKind::Strategy))
            .collect();
        kinds.extend(vector.kinds);

        let candidates = fusion::fuse(&graph.scores, &vector.scores, &kinds, &self.config);
        let no_analogs = candidates.is_empty();

        info!(
            candidates = candidates.len(),
            no_analogs,
            notes = notes.len(),
            "hybrid retrieval complete"
        );
        RetrievalOutcome {
            candidates,
            no_analogs,
            notes,
        }
    }
}
