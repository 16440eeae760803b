use std::sync::Arc;

use solver_core::model::{SessionArtifact, SessionId, SessionStatus};
use solver_pipeline::SessionManager;

fn dummy_artifact() -> SessionArtifact {
    use std::collections::BTreeSet;

    use solver_core::model::{
        AnalysisResult, ApproachClass, CodeRevision, ComplexityClass, OptimizationReport,
        PlanCandidate, PlanResult, TestSuiteResult,
    };

    SessionArtifact {
        analysis: AnalysisResult {
            statement: "s".into(),
            constraints: vec![],
            tags: BTreeSet::new(),
            observations: vec![],
        },
        plan: PlanResult {
            candidates: vec![PlanCandidate {
                approach: ApproachClass::Optimal,
                pseudocode: "p".into(),
                derived_from: None,
            }],
            chosen: 0,
            degraded: false,
        },
        code_revisions: vec![CodeRevision {
            revision: 1,
            language: "python".into(),
            code: "pass".into(),
            critique_addressed: None,
            created_at: chrono::Utc::now(),
        }],
        tests: TestSuiteResult::default(),
        optimization: OptimizationReport {
            estimated_time: ComplexityClass::Linear,
            estimated_space: ComplexityClass::Constant,
            best_known: None,
            accepted: true,
            critiques: vec![],
        },
        notes: vec![],
        best_effort: false,
    }
}

// ── Registration & status ─────────────────────────────────────────────────

#[test]
fn new_sessions_start_pending() {
    let manager = SessionManager::new();
    let id = SessionId::generate();
    let (_tx, _cancel) = manager.register(id.clone());

    assert!(matches!(manager.status(&id), Some(SessionStatus::Pending)));
    assert_eq!(manager.session_count(), 1);
}

#[test]
fn unknown_session_has_no_status() {
    let manager = SessionManager::new();
    assert!(manager.status(&SessionId::generate()).is_none());
}

#[test]
fn published_status_is_visible_in_snapshots() {
    let manager = SessionManager::new();
    let id = SessionId::generate();
    let (tx, _cancel) = manager.register(id.clone());

    tx.send(SessionStatus::Done(Arc::new(dummy_artifact())))
        .unwrap();
    match manager.status(&id) {
        Some(SessionStatus::Done(artifact)) => {
            assert_eq!(artifact.revision_count(), 1);
        }
        other => panic!("expected Done, got {other:?}"),
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────

#[test]
fn cancel_trips_the_token() {
    let manager = SessionManager::new();
    let id = SessionId::generate();
    let (_tx, cancel) = manager.register(id.clone());

    assert!(!cancel.is_cancelled());
    assert!(manager.cancel(&id));
    assert!(cancel.is_cancelled());
}

#[test]
fn cancel_of_unknown_session_is_refused() {
    let manager = SessionManager::new();
    assert!(!manager.cancel(&SessionId::generate()));
}

// ── Waiting ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn wait_terminal_returns_after_publication() {
    let manager = Arc::new(SessionManager::new());
    let id = SessionId::generate();
    let (tx, _cancel) = manager.register(id.clone());

    let waiter = {
        let manager = Arc::clone(&manager);
        let id = id.clone();
        tokio::spawn(async move { manager.wait_terminal(&id).await })
    };

    tx.send(SessionStatus::Failed {
        reason: "boom".into(),
    })
    .unwrap();

    match waiter.await.unwrap() {
        Some(SessionStatus::Failed { reason }) => assert_eq!(reason, "boom"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn wait_terminal_sees_a_status_sent_before_the_sender_drops() {
    let manager = SessionManager::new();
    let id = SessionId::generate();
    let (tx, _cancel) = manager.register(id.clone());

    tx.send(SessionStatus::Done(Arc::new(dummy_artifact())))
        .unwrap();
    drop(tx);

    match manager.wait_terminal(&id).await {
        Some(status) => assert!(status.is_terminal()),
        None => panic!("session should still be tracked"),
    }
}

// ── Removal ───────────────────────────────────────────────────────────────

#[test]
fn remove_destroys_the_entry() {
    let manager = SessionManager::new();
    let id = SessionId::generate();
    let (_tx, _cancel) = manager.register(id.clone());

    assert!(manager.remove(&id));
    assert!(manager.status(&id).is_none());
    assert!(!manager.remove(&id));
    assert_eq!(manager.session_count(), 0);
}
