//! Error taxonomy: one enum per subsystem, folded into [`SolverError`].
//!
//! Soft conditions (empty retrieval, partial results) are NOT errors;
//! they travel as flags and notes on the artifact. Only conditions that
//! can fail a session or a store call live here.

mod graph_error;
mod pipeline_error;
mod retrieval_error;
mod vector_error;

pub use graph_error::GraphError;
pub use pipeline_error::PipelineError;
pub use retrieval_error::RetrievalError;
pub use vector_error::VectorError;

/// Top-level error for the solver system.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type SolverResult<T> = Result<T, SolverError>;

/// Per-subsystem aliases.
pub type GraphResult<T> = Result<T, GraphError>;
pub type VectorResult<T> = Result<T, VectorError>;
pub type RetrievalResult<T> = Result<T, RetrievalError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
