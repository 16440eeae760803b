//! # solver-core
//!
//! Foundation crate for the solver system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SolverConfig;
pub use errors::{SolverError, SolverResult};
pub use model::{
    ApproachClass, ComplexityClass, Difficulty, NodeId, NodeKind, NodeRef, RelationType, SessionId,
};
