//! Knowledge-graph node types.
//!
//! Nodes are created by the external ingestion boundary and are read-only
//! to the core. Identity equality follows the id, not the content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::complexity::ComplexityClass;
use super::ids::NodeId;

/// Difficulty tier of a problem, as assigned at ingestion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Efficiency tier of a solution strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ApproachClass {
    #[default]
    BruteForce,
    Intermediate,
    Optimal,
}

impl ApproachClass {
    /// The next tier up, if any. Used when a critique asks for a faster
    /// revision.
    pub fn upgraded(self) -> Option<Self> {
        match self {
            Self::BruteForce => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Optimal),
            Self::Optimal => None,
        }
    }
}

/// Typed relations between graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Problem → Constraint.
    HasConstraint,
    /// Problem → Pattern.
    UsesPattern,
    /// Problem → Strategy.
    SolvedBy,
    /// Strategy → Pattern.
    Implements,
}

/// A competitive-programming problem statement with its ingestion-time
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemNode {
    pub id: NodeId,
    pub statement: String,
    pub difficulty: Difficulty,
    pub tags: BTreeSet<String>,
}

impl PartialEq for ProblemNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A textual constraint on a problem, with its numeric bound where one
/// could be parsed at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintNode {
    pub id: NodeId,
    pub text: String,
    pub numeric_bound: Option<i64>,
}

/// A named algorithmic pattern ("two-pointer", "segment tree", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternNode {
    pub id: NodeId,
    pub name: String,
    pub description: String,
}

/// A solution strategy for a problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyNode {
    pub id: NodeId,
    pub approach: ApproachClass,
    pub pseudocode_summary: String,
    pub time_complexity: ComplexityClass,
    pub space_complexity: ComplexityClass,
}

impl PartialEq for StrategyNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
