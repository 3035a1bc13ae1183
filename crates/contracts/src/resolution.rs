//! ResolutionKind - how a query found (or failed to find) its handler

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome class of a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// The handler sits on the node matched by the last query segment
    Exact,
    /// Closest-ancestor fallback supplied the handler
    Ancestor,
    /// No handler anywhere along the path
    Miss,
}

impl ResolutionKind {
    /// Stable lowercase label (metrics labels, JSON output)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Ancestor => "ancestor",
            Self::Miss => "miss",
        }
    }

    /// True unless this is a miss
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
