//! Ordering configuration.

use serde::{Deserialize, Serialize};

/// Default limit on the number of segments in a field path.
pub const DEFAULT_MAX_PATH_DEPTH: usize = 16;

/// Where absent keys sort relative to present ones in ascending order.
///
/// Descending order is the exact reverse, so `First` puts absent keys last
/// when descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// Absent keys sort before all present keys.
    #[default]
    First,
    /// Absent keys sort after all present keys.
    Last,
}

/// Configuration for path resolution and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Placement of absent keys.
    pub null_ordering: NullOrdering,
    /// Maximum number of segments accepted in a field path.
    pub max_path_depth: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            null_ordering: NullOrdering::First,
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

impl OrderingConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set null placement.
    pub fn with_null_ordering(mut self, null_ordering: NullOrdering) -> Self {
        self.null_ordering = null_ordering;
        self
    }

    /// Set the maximum path depth.
    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }
}
