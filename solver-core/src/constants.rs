/// Solver system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The fixed tag taxonomy problems are classified under at ingestion.
/// Analysis infers query tags from the same list.
pub const TAG_TAXONOMY: &[&str] = &[
    "Array",
    "Binary Search",
    "Binary Tree and Binary Search Tree",
    "Bit Manipulation",
    "Dynamic Programming",
    "Graphs",
    "Greedy",
    "Heaps",
    "Linked List",
    "Recursion",
    "Strings",
    "Tries",
    "Two Pointer",
];

/// Hard cap on graph traversal depth regardless of configuration.
pub const MAX_HOP_LIMIT: usize = 8;

/// Language tag attached to generated code revisions.
pub const GENERATED_LANGUAGE: &str = "python";
