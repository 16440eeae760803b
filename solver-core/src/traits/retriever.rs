use crate::model::{RetrievalOutcome, RetrievalQuery};

/// The hybrid retriever the pipeline consumes.
///
/// Retrieval never hard-fails: store errors and partial results are
/// absorbed into the outcome's notes, and an empty candidate list is a
/// valid outcome carrying the `no_analogs` flag.
pub trait IRetriever: Send + Sync {
    fn retrieve(&self, query: &RetrievalQuery) -> RetrievalOutcome;
}
