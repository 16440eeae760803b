//! Analysis stage: raw problem text → structured result.
//!
//! Normalization gets one retry (a stricter second pass); only input
//! that is still empty afterwards is unparseable. Constraint and tag
//! extraction are heuristic and never block the pipeline.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use solver_core::constants::TAG_TAXONOMY;
use solver_core::errors::{PipelineError, PipelineResult};
use solver_core::model::{AnalysisResult, ExtractedConstraint};

/// Parse raw problem text into a best-effort structured result.
pub fn analyze(raw: &str) -> PipelineResult<AnalysisResult> {
    let statement = match normalize(raw) {
        Some(s) => s,
        // One normalization retry with a stricter pass before giving up.
        None => renormalize(raw).ok_or_else(|| PipelineError::UnparseableInput {
            reason: "statement empty after normalization".to_string(),
        })?,
    };

    let constraints = extract_constraints(&statement);
    let tags = infer_tags(&statement);

    let mut observations = Vec::new();
    if constraints.iter().all(|c| c.numeric_bound.is_none()) {
        observations.push("no numeric bound extracted".to_string());
    }
    if tags.is_empty() {
        observations.push("no taxonomy tag matched".to_string());
    }

    debug!(
        constraints = constraints.len(),
        tags = tags.len(),
        "analysis complete"
    );
    Ok(AnalysisResult {
        statement,
        constraints,
        tags,
        observations,
    })
}

/// First normalization pass: collapse whitespace, drop control chars.
/// A statement must carry at least one ASCII alphanumeric character to
/// count as parseable.
fn normalize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty() && collapsed.chars().any(|c| c.is_ascii_alphanumeric()))
        .then_some(collapsed)
}

/// Retry pass: transliterate full-width forms (U+FF01..U+FF5E) to their
/// ASCII counterparts before normalizing again, salvaging statements
/// pasted from sources that use full-width text.
fn renormalize(raw: &str) -> Option<String> {
    let transliterated: String = raw
        .chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => {
                char::from_u32(c as u32 - 0xFF01 + 0x21).unwrap_or(c)
            }
            '\u{3000}' => ' ', // ideographic space
            other => other,
        })
        .collect();
    normalize(&transliterated)
}

fn bound_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "n <= 10^5", "q ≤ 2*10^5", "m <= 1e9", "k < 200000".
        // The bare 10^k alternative comes first so it wins over a
        // partial "10" match from the general-number alternative.
        Regex::new(r"(?i)\b([a-z][a-z0-9_]*)\s*(?:<=|≤|<)\s*(10\s*\^\s*[0-9]+|[0-9][0-9_,]*(?:\s*[*x]\s*10\s*\^\s*[0-9]+|[eE][0-9]+)?)")
            .expect("bound regex is valid")
    })
}

fn up_to_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "up to 200000 elements"
        Regex::new(r"(?i)\bup to\s+(10\s*\^\s*[0-9]+|[0-9][0-9_,]*(?:\s*[*x]\s*10\s*\^\s*[0-9]+|[eE][0-9]+)?)")
            .expect("up-to regex is valid")
    })
}

/// Pull numeric constraints out of the statement.
pub fn extract_constraints(statement: &str) -> Vec<ExtractedConstraint> {
    let mut constraints = Vec::new();

    for cap in bound_regex().captures_iter(statement) {
        let text = cap.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        let variable = cap.get(1).map(|m| m.as_str().to_string());
        let numeric_bound = cap.get(2).and_then(|m| parse_magnitude(m.as_str()));
        constraints.push(ExtractedConstraint {
            text,
            variable,
            numeric_bound,
        });
    }

    for cap in up_to_regex().captures_iter(statement) {
        let text = cap.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        let numeric_bound = cap.get(1).and_then(|m| parse_magnitude(m.as_str()));
        constraints.push(ExtractedConstraint {
            text,
            variable: None,
            numeric_bound,
        });
    }

    constraints
}

/// Parse "100000", "100_000", "100,000", "10^5", "2*10^5", "1e5".
fn parse_magnitude(token: &str) -> Option<i64> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect();

    if let Some(rest) = compact.strip_prefix("10^") {
        let exp: u32 = rest.parse().ok()?;
        return checked_pow10(1, exp);
    }
    if let Some((coeff, exp)) = compact.split_once("*10^").or_else(|| compact.split_once("x10^")) {
        let coeff: i64 = coeff.parse().ok()?;
        let exp: u32 = exp.parse().ok()?;
        return checked_pow10(coeff, exp);
    }
    if let Some((mantissa, exp)) = compact
        .split_once('e')
        .or_else(|| compact.split_once('E'))
    {
        let mantissa: i64 = mantissa.parse().ok()?;
        let exp: u32 = exp.parse().ok()?;
        return checked_pow10(mantissa, exp);
    }
    compact.parse().ok()
}

fn checked_pow10(coeff: i64, exp: u32) -> Option<i64> {
    if exp > 18 {
        return None;
    }
    10i64.checked_pow(exp).and_then(|p| coeff.checked_mul(p))
}

/// Match taxonomy tags against the statement by keyword.
pub fn infer_tags(statement: &str) -> BTreeSet<String> {
    let lower = statement.to_lowercase();
    let mut tags = BTreeSet::new();

    let keyword_map: &[(&str, &str)] = &[
        ("array", "Array"),
        ("subarray", "Array"),
        ("binary search", "Binary Search"),
        ("sorted", "Binary Search"),
        ("binary tree", "Binary Tree and Binary Search Tree"),
        ("bst", "Binary Tree and Binary Search Tree"),
        ("xor", "Bit Manipulation"),
        ("bitwise", "Bit Manipulation"),
        ("bitmask", "Bit Manipulation"),
        ("dynamic programming", "Dynamic Programming"),
        ("subsequence", "Dynamic Programming"),
        ("knapsack", "Dynamic Programming"),
        ("graph", "Graphs"),
        ("shortest path", "Graphs"),
        ("vertices", "Graphs"),
        ("greedy", "Greedy"),
        ("interval", "Greedy"),
        ("heap", "Heaps"),
        ("priority queue", "Heaps"),
        ("kth largest", "Heaps"),
        ("linked list", "Linked List"),
        ("recursion", "Recursion"),
        ("recursive", "Recursion"),
        ("string", "Strings"),
        ("substring", "Strings"),
        ("palindrome", "Strings"),
        ("prefix tree", "Tries"),
        ("trie", "Tries"),
        ("two pointer", "Two Pointer"),
        ("pair of", "Two Pointer"),
    ];

    for (keyword, tag) in keyword_map {
        if lower.contains(keyword) {
            debug_assert!(TAG_TAXONOMY.contains(tag), "tag {tag} must be in taxonomy");
            tags.insert((*tag).to_string());
        }
    }
    tags
}
