/// Pipeline stage errors.
///
/// `UnparseableInput` is the only fatal-at-Analysis condition; timeouts
/// count against the retry budget and only surface the session as failed
/// past the configured cap. Retry-budget exhaustion is NOT an error;
/// those sessions complete with `best_effort = true`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("unparseable input: {reason}")]
    UnparseableInput { reason: String },

    #[error("stage {stage} timed out after {millis}ms")]
    StageTimeout { stage: &'static str, millis: u64 },

    #[error("session cancelled")]
    Cancelled,

    #[error("store failure in stage {stage}: {reason}")]
    StoreFailure { stage: &'static str, reason: String },
}
