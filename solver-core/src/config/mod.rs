//! Configuration structs. Every field has a default so partial TOML
//! files (or none at all) are valid.

pub mod defaults;
mod pipeline_config;
mod retrieval_config;

pub use pipeline_config::PipelineConfig;
pub use retrieval_config::{FusionWeights, RetrievalConfig};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the solver system.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SolverConfig {
    pub retrieval: RetrievalConfig,
    pub pipeline: PipelineConfig,
}

impl SolverConfig {
    /// Parse a TOML document. Unknown keys are ignored; missing keys
    /// take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
