//! Optimizing stage: static complexity estimation and the accept/retry
//! decision.
//!
//! The estimator is a lexical heuristic over the generated code:
//! indentation-tracked loop nesting, halving-loop detection, sort
//! markers, and self-recursion counting. It is deliberately confined to
//! this module so a different estimator can replace it without touching
//! the state machine.

use tracing::debug;

use solver_core::model::{ComplexityClass, OptimizationCritique};

/// Outcome of evaluating one code revision.
#[derive(Debug, Clone)]
pub enum Verdict {
    Accept {
        time: ComplexityClass,
        space: ComplexityClass,
    },
    Reject {
        critique: OptimizationCritique,
        time: ComplexityClass,
        space: ComplexityClass,
    },
}

/// Compare the revision's estimated complexity against the best
/// retrieved strategy. No best-known class means nothing to beat:
/// accept.
pub fn evaluate(code: &str, best_known: Option<ComplexityClass>) -> Verdict {
    let (time, space) = estimate_complexity(code);
    debug!(%time, %space, ?best_known, "complexity estimated");

    match best_known {
        Some(target) if time > target => Verdict::Reject {
            critique: OptimizationCritique {
                estimated: time,
                target,
                message: format!(
                    "estimated {time} exceeds the best known {target}; \
                     rework the hot path toward {target}"
                ),
            },
            time,
            space,
        },
        _ => Verdict::Accept { time, space },
    }
}

/// One parsed loop header: indentation plus whether its body halves the
/// search space (binary-search shape).
struct Loop {
    indent: usize,
    is_log: bool,
}

/// Estimate (time, space) complexity of a Python-shaped code revision.
pub fn estimate_complexity(code: &str) -> (ComplexityClass, ComplexityClass) {
    let lines: Vec<&str> = code.lines().collect();
    let loops = parse_loops(&lines);

    // Maximum nesting depth counting only non-logarithmic loops.
    let mut full_depth = 0usize;
    let mut log_loop = false;
    let mut stack: Vec<&Loop> = Vec::new();
    let mut loop_iter = loops.iter().peekable();

    for (idx, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        let indent = line.len() - stripped.len();
        while stack.last().is_some_and(|l| indent <= l.indent) {
            stack.pop();
        }
        if let Some(l) = loop_iter.peek() {
            if l.0 == idx {
                let (_, parsed) = loop_iter.next().expect("peeked");
                if parsed.is_log {
                    log_loop = true;
                } else {
                    stack.push(parsed);
                    full_depth = full_depth.max(stack.len());
                }
            }
        }
    }

    let has_sort = code.contains("sorted(") || code.contains(".sort(");
    let recursion_calls = self_recursion_calls(&lines);

    let time = if recursion_calls >= 2 {
        ComplexityClass::Exponential
    } else {
        match full_depth {
            0 if has_sort => ComplexityClass::Linearithmic,
            0 if log_loop => ComplexityClass::Logarithmic,
            0 if recursion_calls == 1 => ComplexityClass::Linear,
            0 => ComplexityClass::Constant,
            1 if has_sort || log_loop => ComplexityClass::Linearithmic,
            1 => ComplexityClass::Linear,
            2 => ComplexityClass::Quadratic,
            _ => ComplexityClass::Cubic,
        }
    };

    let space = if has_sort
        || code.contains("{}")
        || code.contains("dict(")
        || code.contains("set(")
        || code.contains(".append(")
        || code.contains("list(")
    {
        ComplexityClass::Linear
    } else {
        ComplexityClass::Constant
    };

    (time, space)
}

/// Collect loop headers with their indentation, classifying while-loops
/// whose body halves an index as logarithmic.
fn parse_loops(lines: &[&str]) -> Vec<(usize, Loop)> {
    let mut loops = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        if !(stripped.starts_with("for ") || stripped.starts_with("while ")) {
            continue;
        }
        let indent = line.len() - stripped.len();
        let is_log = stripped.starts_with("while ") && body_halves(lines, idx, indent);
        loops.push((idx, Loop { indent, is_log }));
    }
    loops
}

/// Whether the loop body (deeper-indented lines below the header)
/// contains a halving operation.
fn body_halves(lines: &[&str], header: usize, header_indent: usize) -> bool {
    for line in lines.iter().skip(header + 1) {
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        let indent = line.len() - stripped.len();
        if indent <= header_indent {
            break;
        }
        if stripped.contains("// 2") || stripped.contains("//= 2") || stripped.contains(">> 1") {
            return true;
        }
    }
    false
}

/// Number of self-calls inside the first defined function's body.
fn self_recursion_calls(lines: &[&str]) -> usize {
    let mut name: Option<String> = None;
    let mut calls = 0;
    for line in lines {
        let stripped = line.trim_start();
        match &name {
            None => {
                if let Some(rest) = stripped.strip_prefix("def ") {
                    if let Some(paren) = rest.find('(') {
                        name = Some(rest[..paren].trim().to_string());
                    }
                }
            }
            Some(n) => {
                if stripped.starts_with("def ") {
                    break; // next function, stop scanning
                }
                calls += stripped.matches(&format!("{n}(")).count();
            }
        }
    }
    calls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_loops_are_quadratic() {
        let code = "\
def solve(values):
    for i in range(len(values)):
        for j in range(i + 1, len(values)):
            pass
";
        assert_eq!(estimate_complexity(code).0, ComplexityClass::Quadratic);
    }

    #[test]
    fn single_loop_is_linear() {
        let code = "\
def solve(values):
    total = 0
    for v in values:
        total += v
    return total
";
        let (time, space) = estimate_complexity(code);
        assert_eq!(time, ComplexityClass::Linear);
        assert_eq!(space, ComplexityClass::Constant);
    }

    #[test]
    fn sort_dominates_a_single_loop() {
        let code = "\
def solve(values):
    values = sorted(values)
    for v in values:
        pass
";
        assert_eq!(estimate_complexity(code).0, ComplexityClass::Linearithmic);
    }

    #[test]
    fn halving_while_is_logarithmic() {
        let code = "\
def search(values, target):
    lo, hi = 0, len(values)
    while lo < hi:
        mid = (lo + hi) // 2
        if values[mid] < target:
            lo = mid + 1
        else:
            hi = mid
    return lo
";
        assert_eq!(estimate_complexity(code).0, ComplexityClass::Logarithmic);
    }

    #[test]
    fn branching_recursion_is_exponential() {
        let code = "\
def fib(n):
    if n < 2:
        return n
    return fib(n - 1) + fib(n - 2)
";
        assert_eq!(estimate_complexity(code).0, ComplexityClass::Exponential);
    }

    #[test]
    fn dict_usage_costs_linear_space() {
        let code = "\
def solve(values):
    seen = {}
    for i, v in enumerate(values):
        seen[v] = i
    return seen
";
        assert_eq!(estimate_complexity(code).1, ComplexityClass::Linear);
    }

    #[test]
    fn accept_when_no_best_known() {
        let verdict = evaluate("def f():\n    return 1\n", None);
        assert!(matches!(verdict, Verdict::Accept { .. }));
    }

    #[test]
    fn reject_when_estimate_exceeds_best_known() {
        let code = "\
def solve(values):
    for i in range(len(values)):
        for j in range(len(values)):
            pass
";
        let verdict = evaluate(code, Some(ComplexityClass::Linear));
        match verdict {
            Verdict::Reject { critique, .. } => {
                assert_eq!(critique.estimated, ComplexityClass::Quadratic);
                assert_eq!(critique.target, ComplexityClass::Linear);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn accept_when_estimate_matches_best_known() {
        let code = "\
def solve(values):
    for v in values:
        pass
";
        let verdict = evaluate(code, Some(ComplexityClass::Linear));
        assert!(matches!(verdict, Verdict::Accept { .. }));
    }
}
