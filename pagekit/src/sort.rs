//! Sort-spec parsing
//!
//! Parses the `sorts` control parameter, a comma-separated list of field
//! names each optionally prefixed with `-` (descending) or `+` (ascending,
//! same as unprefixed). Order is significant and duplicates are preserved:
//! the driver receives the fields exactly as the client ordered them.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use pagekit::sort::{self, SortDirection, SortField};
//!
//! let sorts = sort::parse("-created_at,nickname", &HashMap::new());
//! assert_eq!(sorts[0], SortField::descending("created_at"));
//! assert_eq!(sorts[1], SortField::ascending("nickname"));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction for ordering results
///
/// # Example
///
/// ```rust
/// use pagekit::sort::SortDirection;
///
/// assert_eq!(format!("{}", SortDirection::Ascending), "asc");
/// assert_eq!(format!("{}", SortDirection::Descending), "desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    #[serde(rename = "desc")]
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// A single entry of an ordered sort list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Storage field name (alias remapping already applied)
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortField {
    /// Create a sort entry
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Descending sort on `field`
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Parse a sort spec into an ordered sort list
///
/// `spec` is the raw value of the sorts parameter. Each comma-separated
/// segment is a field name with an optional `-` or `+` prefix; an absent or
/// unrecognized prefix means ascending. Field names are remapped through
/// `aliases` (request name → storage name) before emission. An empty spec
/// yields an empty list, which drivers read as "no explicit sort". Segments
/// left empty by stray commas are dropped.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use pagekit::sort::{self, SortField};
///
/// let aliases = HashMap::from([("name".to_string(), "nickname".to_string())]);
/// let sorts = sort::parse("-age,name", &aliases);
/// assert_eq!(sorts[0], SortField::descending("age"));
/// assert_eq!(sorts[1], SortField::ascending("nickname"));
/// ```
#[must_use]
pub fn parse(spec: &str, aliases: &HashMap<String, String>) -> Vec<SortField> {
    if spec.is_empty() {
        return Vec::new();
    }

    spec.split(',')
        .filter_map(|segment| {
            let (name, direction) = match segment.strip_prefix('-') {
                Some(name) => (name, SortDirection::Descending),
                None => (
                    segment.strip_prefix('+').unwrap_or(segment),
                    SortDirection::Ascending,
                ),
            };
            if name.is_empty() {
                return None;
            }
            let field = aliases.get(name).map_or(name, String::as_str);
            Some(SortField::new(field, direction))
        })
        .collect()
}
