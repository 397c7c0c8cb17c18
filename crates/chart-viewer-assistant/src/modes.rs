//! Answer model modes offered by the assistant service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which model the service should answer with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelMode {
    #[default]
    Fast,
    Reasoning,
    Goldilocks,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown model mode: {0} (expected fast, reasoning or goldilocks)")]
pub struct UnknownModelMode(pub String);

impl ModelMode {
    pub const ALL: [ModelMode; 3] = [ModelMode::Fast, ModelMode::Reasoning, ModelMode::Goldilocks];

    /// Wire value sent as `model_mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelMode::Fast => "fast",
            ModelMode::Reasoning => "reasoning",
            ModelMode::Goldilocks => "goldilocks",
        }
    }

    /// Model the service runs for this mode.
    pub fn model_name(self) -> &'static str {
        match self {
            ModelMode::Fast => "llama3.2",
            ModelMode::Reasoning => "deepseek-r1:7b",
            ModelMode::Goldilocks => "phi4",
        }
    }

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            ModelMode::Fast => "Fast",
            ModelMode::Reasoning => "Reasoning",
            ModelMode::Goldilocks => "Goldilocks",
        }
    }
}

impl fmt::Display for ModelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelMode {
    type Err = UnknownModelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownModelMode(s.to_string()))
    }
}
