//! Transient keyed storage for intermediate stage outputs.
//!
//! One store per session, owned by the session task and dropped with
//! it. Stage preconditions surface as `StoreFailure` instead of panics
//! so a corrupted run fails the session cleanly.

use solver_core::errors::{PipelineError, PipelineResult};
use solver_core::model::{
    AnalysisResult, CodeRevision, ComplexityClass, OptimizationCritique, OptimizationReport,
    PlanResult, RetrievalOutcome, SessionArtifact, TestSuiteResult,
};

/// Session-scoped artifact slots.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    analysis: Option<AnalysisResult>,
    retrieval: Option<RetrievalOutcome>,
    plan: Option<PlanResult>,
    /// Oldest-first revision history; append-only.
    revisions: Vec<CodeRevision>,
    tests: Option<TestSuiteResult>,
    critiques: Vec<OptimizationCritique>,
    notes: Vec<String>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    pub fn analysis(&self) -> PipelineResult<&AnalysisResult> {
        self.analysis.as_ref().ok_or_else(|| missing("analysis"))
    }

    pub fn set_retrieval(&mut self, outcome: RetrievalOutcome) {
        self.notes.extend(outcome.notes.iter().cloned());
        self.retrieval = Some(outcome);
    }

    pub fn retrieval(&self) -> PipelineResult<&RetrievalOutcome> {
        self.retrieval.as_ref().ok_or_else(|| missing("retrieval"))
    }

    pub fn set_plan(&mut self, plan: PlanResult) {
        self.plan = Some(plan);
    }

    pub fn plan(&self) -> PipelineResult<&PlanResult> {
        self.plan.as_ref().ok_or_else(|| missing("plan"))
    }

    /// Append a revision. History is never rewritten.
    pub fn push_revision(&mut self, revision: CodeRevision) {
        self.revisions.push(revision);
    }

    pub fn latest_revision(&self) -> PipelineResult<&CodeRevision> {
        self.revisions.last().ok_or_else(|| missing("code revision"))
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    /// Replace the test suite; the suite for the latest revision wins.
    pub fn set_tests(&mut self, tests: TestSuiteResult) {
        self.tests = Some(tests);
    }

    pub fn push_critique(&mut self, critique: OptimizationCritique) {
        self.critiques.push(critique);
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Assemble the final bundle, consuming the store. Every slot a
    /// completed session must have filled is checked here.
    pub fn finish(
        self,
        estimated_time: ComplexityClass,
        estimated_space: ComplexityClass,
        best_known: Option<ComplexityClass>,
        accepted: bool,
    ) -> PipelineResult<SessionArtifact> {
        let analysis = self.analysis.ok_or_else(|| missing("analysis"))?;
        let plan = self.plan.ok_or_else(|| missing("plan"))?;
        let tests = self.tests.ok_or_else(|| missing("tests"))?;
        if self.revisions.is_empty() {
            return Err(missing("code revision"));
        }

        Ok(SessionArtifact {
            analysis,
            plan,
            code_revisions: self.revisions,
            tests,
            optimization: OptimizationReport {
                estimated_time,
                estimated_space,
                best_known,
                accepted,
                critiques: self.critiques,
            },
            notes: self.notes,
            best_effort: !accepted,
        })
    }
}

fn missing(what: &'static str) -> PipelineError {
    PipelineError::StoreFailure {
        stage: "artifact",
        reason: format!("{what} not yet produced"),
    }
}
