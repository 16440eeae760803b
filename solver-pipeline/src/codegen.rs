//! Template-based code writer.
//!
//! The built-in generation backend: deterministic Python templates per
//! approach class. A critique moves the request up one approach tier at
//! the call site, so successive revisions actually change shape.

use tracing::debug;

use solver_core::constants::GENERATED_LANGUAGE;
use solver_core::errors::PipelineResult;
use solver_core::model::ApproachClass;
use solver_core::traits::{CodeRequest, ICodeWriter};

/// Deterministic template-based [`ICodeWriter`].
#[derive(Debug, Default)]
pub struct HeuristicCodeWriter;

impl HeuristicCodeWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ICodeWriter for HeuristicCodeWriter {
    fn write_code(&self, request: &CodeRequest) -> PipelineResult<String> {
        debug!(
            approach = ?request.approach,
            revision = request.revision,
            has_critique = request.critique.is_some(),
            "writing code revision"
        );

        let header = plan_header(&request.pseudocode);
        let body = match request.approach {
            ApproachClass::BruteForce => BRUTE_FORCE_BODY,
            ApproachClass::Intermediate => INTERMEDIATE_BODY,
            ApproachClass::Optimal => OPTIMAL_BODY,
        };
        Ok(format!("{header}\n{body}"))
    }

    fn language(&self) -> &str {
        GENERATED_LANGUAGE
    }
}

/// Carry the plan into the emitted file as a comment block.
fn plan_header(pseudocode: &str) -> String {
    let mut header = String::from("# plan:\n");
    for line in pseudocode.lines() {
        header.push_str("#   ");
        header.push_str(line);
        header.push('\n');
    }
    header
}

const BRUTE_FORCE_BODY: &str = "\
def solve(values, target):
    n = len(values)
    best = None
    for i in range(n):
        for j in range(i + 1, n):
            if values[i] + values[j] == target:
                best = (i, j)
    return best
";

const INTERMEDIATE_BODY: &str = "\
def solve(values, target):
    order = sorted(range(len(values)), key=lambda i: values[i])
    lo, hi = 0, len(order) - 1
    while lo < hi:
        total = values[order[lo]] + values[order[hi]]
        if total == target:
            return (order[lo], order[hi])
        if total < target:
            lo += 1
        else:
            hi -= 1
    return None
";

const OPTIMAL_BODY: &str = "\
def solve(values, target):
    seen = {}
    for i, v in enumerate(values):
        if target - v in seen:
            return (seen[target - v], i)
        seen[v] = i
    return None
";
