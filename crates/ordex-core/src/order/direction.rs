//! Sort direction and order specifications.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse a direction keyword.
    ///
    /// `DESC` and `DESCENDING` (any case) mean descending; every other
    /// keyword, including the empty string, means ascending.
    pub fn from_keyword(keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.eq_ignore_ascii_case("desc") || keyword.eq_ignore_ascii_case("descending") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl From<&str> for SortDirection {
    fn from(keyword: &str) -> Self {
        Self::from_keyword(keyword)
    }
}

/// A field path paired with a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Dotted field path.
    pub path: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl OrderSpec {
    /// Create an ascending order spec.
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending order spec.
    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Desc,
        }
    }
}
