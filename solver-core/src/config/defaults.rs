//! Default values for every recognized configuration option.

/// Graph traversal depth for the retrieval graph path.
pub const DEFAULT_HOP_LIMIT: usize = 2;

/// Vector neighbor count (recall/latency trade-off).
pub const DEFAULT_K: usize = 10;

/// Fusion weight for the graph-path score.
pub const DEFAULT_GRAPH_WEIGHT: f64 = 0.5;

/// Fusion weight for the vector-path score.
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.5;

/// Scale applied to candidates seen by only one retrieval path.
pub const DEFAULT_SINGLE_PATH_PENALTY: f64 = 0.8;

/// Maximum Optimizing → Coding feedback transitions per session.
pub const DEFAULT_MAX_CODING_RETRIES: u32 = 3;

/// Per-call bound on external calls (generation, store queries), ms.
pub const DEFAULT_STAGE_TIMEOUT_MS: u64 = 30_000;

/// Consecutive stage timeouts after which the session fails.
pub const DEFAULT_TIMEOUT_CAP: u32 = 3;
