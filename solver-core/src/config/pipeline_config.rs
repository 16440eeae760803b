use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults;

/// Pipeline orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum Optimizing → Coding feedback transitions. Revision count
    /// is therefore bounded by `max_coding_retries + 1`.
    pub max_coding_retries: u32,
    /// Per-call bound on external calls, milliseconds.
    pub stage_timeout_ms: u64,
    /// Consecutive timeouts after which the session fails.
    pub timeout_cap: u32,
}

impl PipelineConfig {
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_millis(self.stage_timeout_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_coding_retries: defaults::DEFAULT_MAX_CODING_RETRIES,
            stage_timeout_ms: defaults::DEFAULT_STAGE_TIMEOUT_MS,
            timeout_cap: defaults::DEFAULT_TIMEOUT_CAP,
        }
    }
}
