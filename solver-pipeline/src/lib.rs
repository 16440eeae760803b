//! # solver-pipeline
//!
//! The agent pipeline: a bounded state machine driving
//! Analysis → Planning → Coding → Testing ∥ Optimizing → Done,
//! with one feedback edge (Optimizing → Coding) capped by the retry
//! budget. Sessions are independent tokio tasks; the only shared state
//! is read-only store access.

pub mod artifact;
pub mod codegen;
pub mod engine;
pub mod observability;
pub mod session;
pub mod stages;
pub mod state;

pub use codegen::HeuristicCodeWriter;
pub use engine::SolverEngine;
pub use session::SessionManager;
pub use state::StageState;
