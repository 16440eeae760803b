//! Coding stage: pseudocode → executable code, bounded by the stage
//! timeout.
//!
//! The writer call runs on the blocking pool so a slow generation
//! backend cannot stall the session task, and `tokio::time::timeout`
//! enforces the per-call bound. A timeout surfaces as `StageTimeout`
//! and counts against the retry budget at the call site.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use solver_core::errors::{PipelineError, PipelineResult};
use solver_core::model::CodeRevision;
use solver_core::traits::{CodeRequest, ICodeWriter};

pub async fn run(
    writer: Arc<dyn ICodeWriter>,
    request: CodeRequest,
    stage_timeout: Duration,
) -> PipelineResult<CodeRevision> {
    let language = writer.language().to_string();
    let revision = request.revision;
    let critique = request.critique.clone();

    let call = tokio::task::spawn_blocking(move || writer.write_code(&request));

    match tokio::time::timeout(stage_timeout, call).await {
        Err(_elapsed) => {
            warn!(revision, "coding call timed out");
            Err(PipelineError::StageTimeout {
                stage: "coding",
                millis: stage_timeout.as_millis() as u64,
            })
        }
        Ok(Err(join_err)) => Err(PipelineError::StoreFailure {
            stage: "coding",
            reason: format!("writer task failed: {join_err}"),
        }),
        Ok(Ok(result)) => {
            let code = result?;
            Ok(CodeRevision {
                revision,
                language,
                code,
                critique_addressed: critique,
                created_at: Utc::now(),
            })
        }
    }
}
