//! Classification outcome.

use serde::{Deserialize, Serialize};

/// Result of a successful classification pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "region", rename_all = "snake_case")]
pub enum Classification {
    /// Name of the selected containing region
    Matched(String),
    /// No region contains the point
    NoMatch,
}

impl Classification {
    pub fn region_name(&self) -> Option<&str> {
        match self {
            Classification::Matched(name) => Some(name),
            Classification::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched(_))
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Matched(name) => write!(f, "{}", name),
            Classification::NoMatch => write!(f, "no match"),
        }
    }
}
