use std::collections::BTreeSet;

use crate::errors::GraphResult;
use crate::model::{ConstraintNode, NodeId, NodeRef, PatternNode, ProblemNode, RelationType, StrategyNode};

/// Read-only query contract over the problem knowledge graph.
///
/// The core never creates graph entries; ingestion happens behind this
/// boundary. Implementations must tolerate concurrent read-only queries
/// without locking.
pub trait IGraphStore: Send + Sync {
    /// Outgoing neighbors of `id` along `rel`, in relation-creation order.
    /// Fails with [`crate::errors::GraphError::NotFound`] when `id` does
    /// not exist; retrieval treats that as a soft miss.
    fn neighbors(&self, id: &NodeId, rel: RelationType) -> GraphResult<Vec<NodeRef>>;

    /// Problems carrying every tag in `tags` (intersection semantics),
    /// in node insertion order.
    fn by_tag(&self, tags: &BTreeSet<String>) -> GraphResult<Vec<ProblemNode>>;

    // --- Node hydration ---
    fn problem(&self, id: &NodeId) -> GraphResult<Option<ProblemNode>>;
    fn strategy(&self, id: &NodeId) -> GraphResult<Option<StrategyNode>>;
    fn pattern(&self, id: &NodeId) -> GraphResult<Option<PatternNode>>;
    fn constraint(&self, id: &NodeId) -> GraphResult<Option<ConstraintNode>>;

    /// The parent problem of a strategy (the `SolvedBy` source), when one
    /// exists. Needed for the eligibility invariant.
    fn strategy_parent(&self, id: &NodeId) -> GraphResult<Option<NodeId>>;

    /// Strategies whose `Implements` edge points at `pattern`, in
    /// relation-creation order. The reverse hop of `Implements`, used by
    /// the graph path to reach strategies through shared patterns.
    fn implementers(&self, pattern: &NodeId) -> GraphResult<Vec<NodeRef>>;
}
