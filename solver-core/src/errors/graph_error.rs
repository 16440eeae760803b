use crate::model::NodeId;

/// Graph store errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphError {
    /// The queried node does not exist. Soft at retrieval time (skip,
    /// do not abort), hard when the pipeline requires the node.
    #[error("node not found: {id}")]
    NotFound { id: NodeId },

    #[error("relation query failed: {reason}")]
    QueryFailed { reason: String },
}
