//! Per-session artifact types: stage outputs and the final bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::complexity::ComplexityClass;
use super::nodes::ApproachClass;

/// A numeric constraint pulled out of the problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedConstraint {
    /// The raw text the bound was extracted from.
    pub text: String,
    /// The variable the bound applies to, when named ("n", "q", ...).
    pub variable: Option<String>,
    /// Parsed upper bound, when parseable. Extraction is heuristic and
    /// never blocking; unparseable bounds stay `None`.
    pub numeric_bound: Option<i64>,
}

/// Output of the Analysis stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Normalized statement text.
    pub statement: String,
    pub constraints: Vec<ExtractedConstraint>,
    /// Inferred tags from the fixed taxonomy.
    pub tags: BTreeSet<String>,
    /// Free-form observations accumulated during analysis.
    pub observations: Vec<String>,
}

impl AnalysisResult {
    /// One-line constraint summary used by the retrieval query.
    pub fn constraint_summary(&self) -> String {
        self.constraints
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One candidate plan synthesized by the Planning stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCandidate {
    pub approach: ApproachClass,
    pub pseudocode: String,
    /// The retrieval candidate this plan was derived from, if any.
    pub derived_from: Option<super::ids::NodeId>,
}

/// Output of the Planning stage. Always holds at least one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub candidates: Vec<PlanCandidate>,
    /// Index of the selected candidate in `candidates`.
    pub chosen: usize,
    /// Whether retrieval came back empty and the plan degraded to a
    /// brute-force sketch.
    pub degraded: bool,
}

impl PlanResult {
    pub fn chosen_plan(&self) -> &PlanCandidate {
        &self.candidates[self.chosen]
    }
}

/// One code revision. History is append-only, oldest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeRevision {
    /// 1-based revision number.
    pub revision: usize,
    pub language: String,
    pub code: String,
    /// The critique this revision responded to, if it came through the
    /// feedback edge.
    pub critique_addressed: Option<OptimizationCritique>,
    pub created_at: DateTime<Utc>,
}

/// Category of a generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    Normal,
    Boundary,
    Adversarial,
}

/// One generated test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub category: TestCategory,
    pub name: String,
    pub input: String,
    /// What the case is probing, for the human reading the suite.
    pub rationale: String,
}

/// Output of the Testing stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TestSuiteResult {
    pub cases: Vec<TestCase>,
    /// Set when no numeric bound was available to derive boundary cases
    /// from; logged, never fatal.
    pub boundary_derivation_degraded: bool,
}

impl TestSuiteResult {
    pub fn count_in(&self, category: TestCategory) -> usize {
        self.cases.iter().filter(|c| c.category == category).count()
    }
}

/// Structured critique emitted when the optimizer rejects a revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationCritique {
    pub estimated: ComplexityClass,
    pub target: ComplexityClass,
    pub message: String,
}

/// Output of the Optimizing stage for the final accepted (or last) revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub estimated_time: ComplexityClass,
    pub estimated_space: ComplexityClass,
    /// Best complexity class among retrieved strategies, if any were
    /// retrieved.
    pub best_known: Option<ComplexityClass>,
    /// Whether the acceptance rule was satisfied (as opposed to the
    /// budget running out).
    pub accepted: bool,
    /// Every critique emitted across the feedback loop, oldest-first.
    pub critiques: Vec<OptimizationCritique>,
}

/// The final artifact bundle for one solving session.
///
/// Owned exclusively by its session and destroyed with it; never shared
/// across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionArtifact {
    pub analysis: AnalysisResult,
    pub plan: PlanResult,
    /// Full revision history, oldest-first. The last entry is the
    /// delivered solution.
    pub code_revisions: Vec<CodeRevision>,
    pub tests: TestSuiteResult,
    pub optimization: OptimizationReport,
    /// Soft conditions absorbed during the run (retrieval misses,
    /// boundary-derivation gaps, timeouts that were retried).
    pub notes: Vec<String>,
    /// True when the session completed by exhausting its revision budget
    /// rather than satisfying the optimization acceptance rule.
    pub best_effort: bool,
}

impl SessionArtifact {
    pub fn latest_revision(&self) -> Option<&CodeRevision> {
        self.code_revisions.last()
    }

    pub fn revision_count(&self) -> usize {
        self.code_revisions.len()
    }
}

/// What `get_artifact` reports for a session.
#[derive(Debug, Clone)]
pub enum SessionStatus {
    /// The pipeline is still running.
    Pending,
    /// Terminal: the artifact bundle is ready.
    Done(Arc<SessionArtifact>),
    /// Terminal: the session failed, with the originating reason.
    Failed { reason: String },
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}
