//! Asymptotic complexity classes, ordered from cheapest to most expensive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The complexity tiers the optimizer reasons about. The derived `Ord`
/// follows declaration order, so `Constant < Logarithmic < ... < Exponential`
/// and "at or below" comparisons are plain `<=`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    Constant,
    Logarithmic,
    #[default]
    Linear,
    Linearithmic,
    Quadratic,
    Cubic,
    Exponential,
}

impl ComplexityClass {
    /// Parse common competitive-programming notation. Case and spacing
    /// are ignored; unknown notation yields `None`.
    pub fn parse(notation: &str) -> Option<Self> {
        let compact: String = notation
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '*')
            .collect();
        match compact.as_str() {
            "o(1)" | "constant" => Some(Self::Constant),
            "o(logn)" | "o(log(n))" => Some(Self::Logarithmic),
            "o(n)" | "linear" => Some(Self::Linear),
            "o(nlogn)" | "o(nlog(n))" => Some(Self::Linearithmic),
            "o(n^2)" | "o(n2)" | "o(nn)" => Some(Self::Quadratic),
            "o(n^3)" | "o(n3)" => Some(Self::Cubic),
            "o(2^n)" | "o(2n)" | "exponential" => Some(Self::Exponential),
            _ => None,
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n^2)",
            Self::Cubic => "O(n^3)",
            Self::Exponential => "O(2^n)",
        };
        f.write_str(s)
    }
}
