/// Retrieval subsystem errors.
///
/// An empty result set is not an error; it surfaces as
/// `RetrievalOutcome::no_analogs`. These variants cover calls that
/// actually failed; the pipeline absorbs them as soft misses.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    #[error("retrieval call timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
