//! Binary disaster prediction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MonitorError;

/// Classifier output. Exactly two labels exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Disaster,
    NoDisaster,
}

impl Prediction {
    /// All labels, in class-index order
    pub const ALL: [Prediction; 2] = [Prediction::NoDisaster, Prediction::Disaster];

    pub fn is_disaster(&self) -> bool {
        matches!(self, Prediction::Disaster)
    }

    /// Dense class index used by the tree learner
    pub fn index(&self) -> usize {
        match self {
            Prediction::NoDisaster => 0,
            Prediction::Disaster => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Disaster => write!(f, "Disaster"),
            Prediction::NoDisaster => write!(f, "No disaster"),
        }
    }
}

impl FromStr for Prediction {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "disaster" => Ok(Prediction::Disaster),
            "no" | "no-disaster" | "no_disaster" => Ok(Prediction::NoDisaster),
            _ => Err(MonitorError::UnknownLabel(s.to_string())),
        }
    }
}
