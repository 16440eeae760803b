//! Identifier newtypes for graph nodes and solving sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the knowledge graph. Assigned at ingestion
/// time (uuid v4 by convention); opaque and totally ordered here so the
/// retriever can use it as the final ranking tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The kind of node a [`NodeRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Problem,
    Constraint,
    Pattern,
    Strategy,
}

/// A lightweight reference to a graph node: id plus kind.
///
/// Store queries and retrieval candidates trade in refs; the pipeline
/// hydrates full nodes only when it needs their content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: NodeId,
    pub kind: NodeKind,
}

impl NodeRef {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn problem(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Problem)
    }

    pub fn strategy(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Strategy)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of one solving session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
