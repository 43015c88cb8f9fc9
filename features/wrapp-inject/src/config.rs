use std::{fmt::Display, str::FromStr};

use crate::errors::ParseModeError;

/// How a pool deals with dependencies it can't satisfy by plain construction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Builds the graph as one would by hand - any cycle fails the resolution
    Safe,
    /// Breaks cycles between reference-typed dependencies using placeholders
    #[default]
    Tolerant,
}

impl ResolveMode {
    pub fn from_safe(safe: bool) -> Self {
        if safe {
            ResolveMode::Safe
        } else {
            ResolveMode::Tolerant
        }
    }

    pub fn is_safe(self) -> bool {
        self == ResolveMode::Safe
    }
}

impl Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveMode::Safe => f.write_str("safe"),
            ResolveMode::Tolerant => f.write_str("tolerant"),
        }
    }
}

impl FromStr for ResolveMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(ResolveMode::Safe),
            "tolerant" => Ok(ResolveMode::Tolerant),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
