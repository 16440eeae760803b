use crate::errors::PipelineResult;
use crate::model::{ApproachClass, OptimizationCritique};

/// Everything the code writer needs for one revision.
#[derive(Debug, Clone)]
pub struct CodeRequest {
    /// Normalized problem statement.
    pub statement: String,
    /// Selected pseudocode from Planning.
    pub pseudocode: String,
    pub approach: ApproachClass,
    /// Present when entering through the Optimizing → Coding feedback
    /// edge; the writer must respond with a new revision.
    pub critique: Option<OptimizationCritique>,
    /// 1-based revision number being produced.
    pub revision: usize,
}

/// The text-generation seam: translates pseudocode into executable code.
///
/// Injected into the pipeline so generation backends (template-based,
/// model-backed) are interchangeable. Calls are bounded by the stage
/// timeout at the call site, not here.
pub trait ICodeWriter: Send + Sync {
    fn write_code(&self, request: &CodeRequest) -> PipelineResult<String>;

    /// Language of the emitted code ("python", ...).
    fn language(&self) -> &str;
}
