//! In-memory graph store with deterministic query ordering.
//!
//! Nodes and relations carry insertion sequence numbers; `neighbors`
//! returns relation-creation order and `by_tag` returns node-insertion
//! order, so retrieval output is reproducible across runs.

use std::collections::{BTreeSet, HashMap};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use tracing::debug;

use solver_core::errors::{GraphError, GraphResult};
use solver_core::model::{
    ConstraintNode, NodeId, NodeKind, NodeRef, PatternNode, ProblemNode, RelationType,
    StrategyNode,
};
use solver_core::traits::IGraphStore;

/// Typed node payload.
#[derive(Debug, Clone)]
enum GraphNode {
    Problem(ProblemNode),
    Constraint(ConstraintNode),
    Pattern(PatternNode),
    Strategy(StrategyNode),
}

impl GraphNode {
    fn id(&self) -> &NodeId {
        match self {
            Self::Problem(n) => &n.id,
            Self::Constraint(n) => &n.id,
            Self::Pattern(n) => &n.id,
            Self::Strategy(n) => &n.id,
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Self::Problem(_) => NodeKind::Problem,
            Self::Constraint(_) => NodeKind::Constraint,
            Self::Pattern(_) => NodeKind::Pattern,
            Self::Strategy(_) => NodeKind::Strategy,
        }
    }
}

/// Edge payload: relation type plus creation sequence for ordering.
#[derive(Debug, Clone, Copy)]
struct EdgeWeight {
    rel: RelationType,
    seq: u64,
}

/// In-memory [`IGraphStore`] over a petgraph `StableGraph`.
///
/// All query methods take `&self`; after ingestion the store is shared
/// read-only via `Arc`, so concurrent sessions query without locking.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    graph: StableGraph<GraphNode, EdgeWeight, Directed>,
    by_id: HashMap<NodeId, NodeIndex>,
    /// Node ids in insertion order, for `by_tag` determinism.
    insertion_order: Vec<NodeId>,
    next_edge_seq: u64,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Ingestion write surface (external boundary + test seeding) ---

    pub fn insert_problem(&mut self, node: ProblemNode) -> NodeId {
        self.insert(GraphNode::Problem(node))
    }

    pub fn insert_constraint(&mut self, node: ConstraintNode) -> NodeId {
        self.insert(GraphNode::Constraint(node))
    }

    pub fn insert_pattern(&mut self, node: PatternNode) -> NodeId {
        self.insert(GraphNode::Pattern(node))
    }

    pub fn insert_strategy(&mut self, node: StrategyNode) -> NodeId {
        self.insert(GraphNode::Strategy(node))
    }

    /// Create a typed relation. Fails with `NotFound` when either end is
    /// missing.
    pub fn relate(&mut self, from: &NodeId, to: &NodeId, rel: RelationType) -> GraphResult<()> {
        let src = self.index_of(from)?;
        let dst = self.index_of(to)?;
        let seq = self.next_edge_seq;
        self.next_edge_seq += 1;
        self.graph.add_edge(src, dst, EdgeWeight { rel, seq });
        debug!(%from, %to, ?rel, "relation created");
        Ok(())
    }

    fn insert(&mut self, node: GraphNode) -> NodeId {
        let id = node.id().clone();
        let idx = self.graph.add_node(node);
        self.by_id.insert(id.clone(), idx);
        self.insertion_order.push(id.clone());
        id
    }

    fn index_of(&self, id: &NodeId) -> GraphResult<NodeIndex> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NotFound { id: id.clone() })
    }

    fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    /// Number of nodes in the store.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl IGraphStore for MemoryGraphStore {
    fn neighbors(&self, id: &NodeId, rel: RelationType) -> GraphResult<Vec<NodeRef>> {
        let idx = self.index_of(id)?;

        let mut hits: Vec<(u64, NodeRef)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .filter(|e| e.weight().rel == rel)
            .map(|e| {
                let target = self.node(e.target());
                (
                    e.weight().seq,
                    NodeRef::new(target.id().clone(), target.kind()),
                )
            })
            .collect();

        // petgraph iterates edges in reverse insertion order; restore
        // relation-creation order via the sequence number.
        hits.sort_by_key(|(seq, _)| *seq);
        Ok(hits.into_iter().map(|(_, r)| r).collect())
    }

    fn by_tag(&self, tags: &BTreeSet<String>) -> GraphResult<Vec<ProblemNode>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for id in &self.insertion_order {
            let idx = self.by_id[id];
            if let GraphNode::Problem(p) = self.node(idx) {
                if tags.iter().all(|t| p.tags.contains(t)) {
                    out.push(p.clone());
                }
            }
        }
        Ok(out)
    }

    fn problem(&self, id: &NodeId) -> GraphResult<Option<ProblemNode>> {
        Ok(self.by_id.get(id).and_then(|&idx| match self.node(idx) {
            GraphNode::Problem(p) => Some(p.clone()),
            _ => None,
        }))
    }

    fn strategy(&self, id: &NodeId) -> GraphResult<Option<StrategyNode>> {
        Ok(self.by_id.get(id).and_then(|&idx| match self.node(idx) {
            GraphNode::Strategy(s) => Some(s.clone()),
            _ => None,
        }))
    }

    fn pattern(&self, id: &NodeId) -> GraphResult<Option<PatternNode>> {
        Ok(self.by_id.get(id).and_then(|&idx| match self.node(idx) {
            GraphNode::Pattern(p) => Some(p.clone()),
            _ => None,
        }))
    }

    fn constraint(&self, id: &NodeId) -> GraphResult<Option<ConstraintNode>> {
        Ok(self.by_id.get(id).and_then(|&idx| match self.node(idx) {
            GraphNode::Constraint(c) => Some(c.clone()),
            _ => None,
        }))
    }

    fn strategy_parent(&self, id: &NodeId) -> GraphResult<Option<NodeId>> {
        let idx = self.index_of(id)?;
        let mut parents: Vec<(u64, NodeId)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .filter(|e| e.weight().rel == RelationType::SolvedBy)
            .map(|e| {
                let source = self.node(e.source());
                (e.weight().seq, source.id().clone())
            })
            .collect();
        parents.sort_by_key(|(seq, _)| *seq);
        Ok(parents.into_iter().map(|(_, id)| id).next())
    }

    fn implementers(&self, pattern: &NodeId) -> GraphResult<Vec<NodeRef>> {
        let idx = self.index_of(pattern)?;
        let mut hits: Vec<(u64, NodeRef)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .filter(|e| e.weight().rel == RelationType::Implements)
            .map(|e| {
                let source = self.node(e.source());
                (
                    e.weight().seq,
                    NodeRef::new(source.id().clone(), source.kind()),
                )
            })
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        Ok(hits.into_iter().map(|(_, r)| r).collect())
    }
}
