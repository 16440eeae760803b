pub mod artifact;
pub mod candidate;
pub mod complexity;
pub mod ids;
pub mod nodes;

pub use artifact::{
    AnalysisResult, CodeRevision, ExtractedConstraint, OptimizationCritique, OptimizationReport,
    PlanCandidate, PlanResult, SessionArtifact, SessionStatus, TestCase, TestCategory,
    TestSuiteResult,
};
pub use candidate::{PathEvidence, RetrievalCandidate, RetrievalOutcome, RetrievalQuery};
pub use complexity::ComplexityClass;
pub use ids::{NodeId, NodeKind, NodeRef, SessionId};
pub use nodes::{
    ApproachClass, ConstraintNode, Difficulty, PatternNode, ProblemNode, RelationType,
    StrategyNode,
};
