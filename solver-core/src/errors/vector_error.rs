/// Vector index and embedding provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VectorError {
    #[error("embedding dimension mismatch: index has {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },
}
