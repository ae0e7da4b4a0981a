//! Filter building
//!
//! Turns the non-control query parameters of a request into the equality
//! predicate handed to a driver: field name → scalar value or in-list of
//! values. Configured default filters merge in afterwards and take
//! precedence, modeling server-enforced scoping (a tenant id, an owner id)
//! that a client must not be able to bypass. Disabled fields are stripped
//! last, whatever their origin.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use pagekit::filter::{FilterMap, FilterValue};
//! use pagekit::query::{PageQuery, ParamNames};
//!
//! let query = PageQuery::from_pairs([
//!     ("page", "2"),
//!     ("status", "active"),
//!     ("tag", "a"),
//!     ("tag", "b"),
//! ]);
//!
//! let filter = FilterMap::from_query(&query, &ParamNames::default(), &HashMap::new());
//! assert_eq!(filter.get("status"), Some(&FilterValue::from("active")));
//! assert!(filter.get("tag").is_some_and(FilterValue::is_list));
//! assert_eq!(filter.get("page"), None);
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::query::{PageQuery, ParamNames};

/// A value in a filter predicate
///
/// Whether a field is a scalar (equality) or a list (in-list) is decided
/// once, at parse time, by counting the query-parameter occurrences of its
/// key. Values are `serde_json::Value`-backed: request-derived values are
/// strings, while configured defaults keep their native JSON types.
///
/// # Example
///
/// ```rust
/// use pagekit::filter::FilterValue;
///
/// let scalar: FilterValue = "active".into();
/// let number: FilterValue = 42_i64.into();
/// let list: FilterValue = vec!["a".to_string(), "b".to_string()].into();
///
/// assert!(!scalar.is_list());
/// assert!(list.is_list());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Single value, an equality predicate
    Scalar(Value),
    /// Ordered list of values, an in-list predicate
    List(Vec<Value>),
}

impl FilterValue {
    /// Whether this value signals an in-list predicate
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The scalar as a string slice, if it is one
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => value.as_str(),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Value::from(n))
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Scalar(Value::from(i64::from(n)))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Scalar(Value::from(n))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Value::from(b))
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::List(values),
            scalar => Self::Scalar(scalar),
        }
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(list: Vec<String>) -> Self {
        Self::List(list.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(list: Vec<i64>) -> Self {
        Self::List(list.into_iter().map(Value::from).collect())
    }
}

/// Equality/in-list predicate for a request: field name → value(s)
///
/// Iteration order is deterministic (sorted by field name) so drivers
/// produce stable queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterMap(BTreeMap<String, FilterValue>);

impl FilterMap {
    /// Create an empty filter map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the request-derived part of the filter from query parameters
    ///
    /// Every pair whose key is not a control-parameter name contributes:
    /// the key is remapped through `aliases`, then a single non-empty value
    /// becomes a scalar, a single empty value is omitted (an empty input is
    /// not a filter), and multiple values become an in-list, with empty
    /// strings included, in request order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use pagekit::filter::{FilterMap, FilterValue};
    /// use pagekit::query::{PageQuery, ParamNames};
    ///
    /// let query = PageQuery::from_pairs([("name", "alice"), ("email", "")]);
    /// let filter = FilterMap::from_query(&query, &ParamNames::default(), &HashMap::new());
    ///
    /// assert_eq!(filter.get("name"), Some(&FilterValue::from("alice")));
    /// assert_eq!(filter.get("email"), None);
    /// ```
    #[must_use]
    pub fn from_query(
        query: &PageQuery,
        params: &ParamNames,
        aliases: &HashMap<String, String>,
    ) -> Self {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, value) in query.pairs() {
            if params.is_control(key) {
                continue;
            }
            grouped.entry(key).or_default().push(value);
        }

        let mut filter = Self::new();
        for (key, values) in grouped {
            let field = aliases.get(key).map_or(key, String::as_str);
            match values.as_slice() {
                [""] => {}
                [single] => filter.insert(field, *single),
                many => filter.insert(
                    field,
                    FilterValue::List(many.iter().copied().map(Value::from).collect()),
                ),
            }
        }
        filter
    }

    /// Merge configured defaults over the request-derived entries
    ///
    /// Defaults win: an entry sharing a key with a request-derived one
    /// overwrites it, so server-enforced scoping cannot be bypassed by the
    /// client. A default keyed by a control-parameter name is skipped.
    pub fn merge_defaults(&mut self, defaults: &Self, params: &ParamNames) {
        for (key, value) in defaults.iter() {
            if params.is_control(key) {
                continue;
            }
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Strip every disabled field, whatever its origin
    pub fn remove_disabled(&mut self, disabled: &HashSet<String>) {
        for field in disabled {
            self.0.remove(field);
        }
    }

    /// Insert or replace a single entry
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Value for `field`, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    /// Remove the entry for `field`, returning it
    pub fn remove(&mut self, field: &str) -> Option<FilterValue> {
        self.0.remove(field)
    }

    /// Whether `field` carries a value
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the predicate is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(field, value)` in field-name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, FilterValue> {
        self.0.iter()
    }

    /// Iterate field names in order
    pub fn keys(&self) -> btree_map::Keys<'_, String, FilterValue> {
        self.0.keys()
    }
}

impl<'a> IntoIterator for &'a FilterMap {
    type Item = (&'a String, &'a FilterValue);
    type IntoIter = btree_map::Iter<'a, String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterMap
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
