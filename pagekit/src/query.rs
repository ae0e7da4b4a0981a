//! Request-side query representation
//!
//! This module provides [`PageQuery`], the crate's view of an incoming HTTP
//! query string, and [`ParamNames`], the set of reserved control-parameter
//! names that drive pagination instead of filtering.
//!
//! The crate never touches the transport layer: a `PageQuery` is built from
//! already-percent-decoded `(key, value)` pairs, which is exactly the shape
//! web-framework query extractors hand out. Multiple pairs may share a key;
//! order is preserved.
//!
//! # Example
//!
//! ```rust
//! use pagekit::query::PageQuery;
//!
//! let query = PageQuery::from_pairs([
//!     ("page", "2"),
//!     ("rows", "10"),
//!     ("status", "active"),
//!     ("status", "pending"),
//! ]);
//!
//! assert_eq!(query.first("page"), Some("2"));
//! assert_eq!(query.values("status").count(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Reserved control-parameter names
///
/// The four parameters that control pagination rather than filtering. Each
/// name is independently renameable so the crate can coexist with endpoints
/// that already use `page`/`rows`/`sorts`/`range` as data fields.
///
/// # Example
///
/// ```rust
/// use pagekit::query::ParamNames;
///
/// let names = ParamNames::default();
/// assert_eq!(names.page, "page");
/// assert!(names.is_control("sorts"));
/// assert!(!names.is_control("status"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamNames {
    /// 1-based page index parameter
    pub page: String,
    /// Page size parameter
    pub rows: String,
    /// Ordered sort-spec parameter
    pub sorts: String,
    /// Repeatable range-spec parameter
    pub range: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            rows: "rows".to_string(),
            sorts: "sorts".to_string(),
            range: "range".to_string(),
        }
    }
}

impl ParamNames {
    /// Check whether `key` is one of the four control-parameter names
    #[must_use]
    pub fn is_control(&self, key: &str) -> bool {
        key == self.page || key == self.rows || key == self.sorts || key == self.range
    }
}

/// Decoded query-string pairs for a single request
///
/// An ordered, multi-value-aware list of `(key, value)` pairs. Values must
/// already be percent-decoded; the crate performs no URL decoding.
///
/// # Example
///
/// ```rust
/// use pagekit::query::PageQuery;
///
/// let mut query = PageQuery::new();
/// query.push("age", "18");
/// query.push("age", "30");
///
/// assert_eq!(query.first("age"), Some("18"));
/// let ages: Vec<&str> = query.values("age").collect();
/// assert_eq!(ages, vec!["18", "30"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pairs: Vec<(String, String)>,
}

impl PageQuery {
    /// Create an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from decoded `(key, value)` pairs
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagekit::query::PageQuery;
    ///
    /// let query = PageQuery::from_pairs([("page", "3"), ("nickname", "a")]);
    /// assert_eq!(query.len(), 2);
    /// ```
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append one pair, preserving order
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`, if any
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in request order
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs, in request order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the query holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
