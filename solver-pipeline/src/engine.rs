//! SolverEngine — the upward session API and the per-session pipeline
//! runner.
//!
//! `start_session` spawns one tokio task per problem; sessions share
//! nothing mutable, only read-only store handles. Every external call
//! inside the runner is bounded by the stage timeout, the feedback loop
//! is bounded by the retry budget, and cancellation is checked between
//! stages, so `get_artifact` always reaches a terminal state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use solver_core::config::SolverConfig;
use solver_core::errors::{PipelineError, PipelineResult};
use solver_core::model::{
    ComplexityClass, NodeKind, OptimizationCritique, RetrievalOutcome, RetrievalQuery,
    SessionArtifact, SessionId, SessionStatus,
};
use solver_core::traits::{CodeRequest, ICodeWriter, IGraphStore, IRetriever};

use crate::artifact::ArtifactStore;
use crate::session::SessionManager;
use crate::stages::optimizing::Verdict;
use crate::stages::{analysis, coding, optimizing, planning, testing};
use crate::state::{PipelineState, StageState};

struct EngineInner {
    graph: Arc<dyn IGraphStore>,
    retriever: Arc<dyn IRetriever>,
    writer: Arc<dyn ICodeWriter>,
    config: SolverConfig,
    sessions: SessionManager,
}

/// The solving engine. Cheap to clone and share.
#[derive(Clone)]
pub struct SolverEngine {
    inner: Arc<EngineInner>,
}

impl SolverEngine {
    pub fn new(
        graph: Arc<dyn IGraphStore>,
        retriever: Arc<dyn IRetriever>,
        writer: Arc<dyn ICodeWriter>,
        config: SolverConfig,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                graph,
                retriever,
                writer,
                config,
                sessions: SessionManager::new(),
            }),
        }
    }

    /// Start solving `problem_text`. Must be called within a tokio
    /// runtime; the session runs as an independent task.
    pub fn start_session(&self, problem_text: &str) -> SessionId {
        let id = SessionId::generate();
        let (tx, cancel) = self.inner.sessions.register(id.clone());
        let inner = Arc::clone(&self.inner);
        let raw = problem_text.to_string();
        let session_id = id.clone();
        tokio::spawn(async move {
            run_session(inner, session_id, raw, tx, cancel).await;
        });
        id
    }

    /// Snapshot of a session's status: `Pending`, `Done`, or `Failed`.
    /// `None` for ids this engine never issued (or already ended).
    pub fn get_artifact(&self, id: &SessionId) -> Option<SessionStatus> {
        self.inner.sessions.status(id)
    }

    /// Await the terminal status of a session.
    pub async fn wait_for_artifact(&self, id: &SessionId) -> Option<SessionStatus> {
        self.inner.sessions.wait_terminal(id).await
    }

    /// Cooperatively cancel a running session. The token is observed
    /// between stages, never mid-stage.
    pub fn abort_session(&self, id: &SessionId) -> bool {
        self.inner.sessions.cancel(id)
    }

    /// Destroy a session and its artifact.
    pub fn end_session(&self, id: &SessionId) -> bool {
        self.inner.sessions.remove(id)
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.session_count()
    }
}

async fn run_session(
    inner: Arc<EngineInner>,
    id: SessionId,
    raw: String,
    tx: watch::Sender<SessionStatus>,
    cancel: CancellationToken,
) {
    info!(session = %id, "session started");
    let status = match drive_pipeline(&inner, &raw, &cancel).await {
        Ok(artifact) => {
            info!(
                session = %id,
                revisions = artifact.revision_count(),
                best_effort = artifact.best_effort,
                "session done"
            );
            SessionStatus::Done(Arc::new(artifact))
        }
        Err(e) => {
            warn!(session = %id, error = %e, "session failed");
            SessionStatus::Failed {
                reason: e.to_string(),
            }
        }
    };
    let _ = tx.send(status);
}

/// Drive one session through the state machine.
async fn drive_pipeline(
    inner: &EngineInner,
    raw: &str,
    cancel: &CancellationToken,
) -> PipelineResult<SessionArtifact> {
    let cfg = &inner.config.pipeline;
    let mut artifacts = ArtifactStore::new();
    let mut state = PipelineState::new();

    // --- Analysis ---
    ensure_live(cancel)?;
    let analysis_result = analysis::analyze(raw)?;
    artifacts.set_analysis(analysis_result);

    // --- Retrieval feeds Planning (bounded, soft-miss on timeout) ---
    ensure_live(cancel)?;
    state.advance(StageState::Planning);
    let query = {
        let a = artifacts.analysis()?;
        RetrievalQuery {
            text: a.statement.clone(),
            tags: a.tags.clone(),
            constraint_summary: a.constraint_summary(),
        }
    };
    let outcome = bounded_retrieve(inner, query, cfg.stage_timeout()).await;
    artifacts.set_retrieval(outcome);

    let best_known = best_known_complexity(inner.graph.as_ref(), artifacts.retrieval()?);

    // --- Planning (never fails) ---
    let plan = planning::plan(
        artifacts.analysis()?,
        artifacts.retrieval()?,
        inner.graph.as_ref(),
    );
    let statement = artifacts.analysis()?.statement.clone();
    let pseudocode = plan.chosen_plan().pseudocode.clone();
    let mut approach = plan.chosen_plan().approach;
    artifacts.set_plan(plan);

    // --- Coding → Testing ∥ Optimizing, with the bounded feedback loop ---
    let mut critique: Option<OptimizationCritique> = None;
    let mut accepted = false;
    let mut final_time = ComplexityClass::default();
    let mut final_space = ComplexityClass::default();

    loop {
        ensure_live(cancel)?;
        state.advance(StageState::Coding);
        let request = CodeRequest {
            statement: statement.clone(),
            pseudocode: pseudocode.clone(),
            approach,
            critique: critique.clone(),
            revision: artifacts.revision_count() + 1,
        };

        match coding::run(Arc::clone(&inner.writer), request, cfg.stage_timeout()).await {
            Ok(revision) => {
                state.consecutive_timeouts = 0;
                artifacts.push_revision(revision);
            }
            Err(e @ PipelineError::StageTimeout { .. }) => {
                state.consecutive_timeouts += 1;
                artifacts.note(format!(
                    "coding timeout ({} consecutive)",
                    state.consecutive_timeouts
                ));
                if state.consecutive_timeouts >= cfg.timeout_cap {
                    return Err(e);
                }
                if state.coding_retries >= cfg.max_coding_retries {
                    if artifacts.revision_count() == 0 {
                        return Err(e);
                    }
                    // Budget gone; deliver the last (already evaluated)
                    // revision best-effort.
                    state.advance(StageState::Optimizing);
                    accepted = false;
                    break;
                }
                state.coding_retries += 1;
                continue;
            }
            Err(e) => return Err(e),
        }

        ensure_live(cancel)?;
        state.advance(StageState::Testing);

        // Both stages only read the fresh revision; run them together
        // and join before the accept/retry decision.
        let code = artifacts.latest_revision()?.code.clone();
        let analysis_ref = artifacts.analysis()?;
        let (suite, verdict) = tokio::join!(
            async { testing::generate(analysis_ref, &code) },
            async { optimizing::evaluate(&code, best_known) },
        );
        state.advance(StageState::Optimizing);
        artifacts.set_tests(suite);

        match verdict {
            Verdict::Accept { time, space } => {
                accepted = true;
                final_time = time;
                final_space = space;
                break;
            }
            Verdict::Reject {
                critique: crit,
                time,
                space,
            } => {
                final_time = time;
                final_space = space;
                artifacts.push_critique(crit.clone());
                if state.coding_retries >= cfg.max_coding_retries {
                    artifacts.note(
                        "revision budget exhausted; delivering best-effort solution",
                    );
                    accepted = false;
                    break;
                }
                debug!(
                    retry = state.coding_retries + 1,
                    estimated = %crit.estimated,
                    target = %crit.target,
                    "optimizer rejected revision, feeding back to coding"
                );
                state.coding_retries += 1;
                critique = Some(crit);
                approach = approach.upgraded().unwrap_or(approach);
            }
        }
    }

    state.advance(StageState::Done);
    artifacts.finish(final_time, final_space, best_known, accepted)
}

fn ensure_live(cancel: &CancellationToken) -> PipelineResult<()> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}

/// Run retrieval on the blocking pool under the stage timeout. A
/// timeout or a panicked task degrades to an empty outcome with a note
/// (retrieval is never allowed to fail a session).
async fn bounded_retrieve(
    inner: &EngineInner,
    query: RetrievalQuery,
    stage_timeout: Duration,
) -> RetrievalOutcome {
    let retriever = Arc::clone(&inner.retriever);
    let call = tokio::task::spawn_blocking(move || retriever.retrieve(&query));

    match tokio::time::timeout(stage_timeout, call).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_err)) => {
            warn!(error = %join_err, "retrieval task failed, treating as soft miss");
            RetrievalOutcome::empty_with_note(format!("retrieval task failed: {join_err}"))
        }
        Err(_elapsed) => {
            warn!(millis = stage_timeout.as_millis() as u64, "retrieval timed out");
            RetrievalOutcome::empty_with_note(format!(
                "retrieval timed out after {}ms",
                stage_timeout.as_millis()
            ))
        }
    }
}

/// The best (lowest) time complexity among retrieved strategies, if any
/// hydrate. Hydration misses are soft.
fn best_known_complexity(
    graph: &dyn IGraphStore,
    outcome: &RetrievalOutcome,
) -> Option<ComplexityClass> {
    outcome
        .candidates
        .iter()
        .filter(|c| c.node.kind == NodeKind::Strategy)
        .filter_map(|c| graph.strategy(&c.node.id).ok().flatten())
        .map(|s| s.time_complexity)
        .min()
}
