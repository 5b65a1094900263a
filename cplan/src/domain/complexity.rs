//! Complexity tiers for subtasks

use serde::{Deserialize, Serialize};

/// Complexity tier of a subtask
///
/// Drives both the complexity score and whether a subtask is eligible for
/// another round of decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
    VeryComplex,
}

impl Complexity {
    /// Fixed contribution of this tier to the complexity score
    pub fn base_score(&self) -> f64 {
        match self {
            Self::Simple => 0.2,
            Self::Moderate => 0.4,
            Self::Complex => 0.7,
            Self::VeryComplex => 1.0,
        }
    }

    /// Complex and very complex subtasks may be broken down further
    pub fn is_decomposable(&self) -> bool {
        matches!(self, Self::Complex | Self::VeryComplex)
    }

    /// Wire name of this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::VeryComplex => "very_complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            "very_complex" => Ok(Self::VeryComplex),
            _ => Err(format!("Unknown complexity: {}", s)),
        }
    }
}
