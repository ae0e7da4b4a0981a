//! Range-spec parsing
//!
//! Parses the repeatable `range` control parameter. Each occurrence is a
//! compact expression of the form `key:v` or `key:v1,v2`:
//!
//! - `age:18`: lower bound only (`age >= 18`)
//! - `-age:30`: upper bound only (`age <= 30`); the leading `-` on the key
//!   flips a single bare value from lower to upper bound
//! - `age:18,30`: both bounds; the two values are sorted before assignment,
//!   so `age:30,18` means the same thing
//!
//! Bounds are inclusive signed 64-bit integers. Non-numeric components parse
//! to `0`; user-supplied range values never abort a request. Entries the
//! grammar cannot place (no `:` separator, empty key, three or more value
//! components) are skipped with a `tracing` diagnostic.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use pagekit::range::{self, Bounds};
//!
//! let ranges = range::parse(["age:18,30", "-score:90"], &HashMap::new());
//! assert_eq!(ranges.get("age"), Some(&Bounds::between(18, 30)));
//! assert_eq!(ranges.get("score"), Some(&Bounds::upper(90)));
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Inclusive bounds on a single field
///
/// A field may carry only a lower bound, only an upper bound, or both.
/// When both are present, `gte <= lte` holds by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound, inclusive (greater than or equal)
    pub gte: Option<i64>,
    /// Upper bound, inclusive (less than or equal)
    pub lte: Option<i64>,
}

impl Bounds {
    /// Lower bound only
    #[must_use]
    pub const fn lower(value: i64) -> Self {
        Self {
            gte: Some(value),
            lte: None,
        }
    }

    /// Upper bound only
    #[must_use]
    pub const fn upper(value: i64) -> Self {
        Self {
            gte: None,
            lte: Some(value),
        }
    }

    /// Both bounds; the arguments are ordered so the smaller becomes `gte`
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagekit::range::Bounds;
    ///
    /// assert_eq!(Bounds::between(30, 18), Bounds::between(18, 30));
    /// ```
    #[must_use]
    pub const fn between(a: i64, b: i64) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            gte: Some(lo),
            lte: Some(hi),
        }
    }

    /// Check a value against both bounds
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagekit::range::Bounds;
    ///
    /// let bounds = Bounds::between(18, 30);
    /// assert!(bounds.contains(18));
    /// assert!(bounds.contains(30));
    /// assert!(!bounds.contains(31));
    /// ```
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.gte.is_none_or(|lo| value >= lo) && self.lte.is_none_or(|hi| value <= hi)
    }
}

/// Range predicate for a request: field name → inclusive bounds
///
/// Built by [`parse`] and handed to a driver verbatim. Iteration order is
/// deterministic (sorted by field name) so drivers produce stable queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeMap(BTreeMap<String, Bounds>);

impl RangeMap {
    /// Create an empty range map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds for `field`, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Bounds> {
        self.0.get(field)
    }

    /// Set the lower bound for `field`, keeping any existing upper bound
    pub fn set_lower(&mut self, field: impl Into<String>, value: i64) {
        self.0.entry(field.into()).or_default().gte = Some(value);
    }

    /// Set the upper bound for `field`, keeping any existing lower bound
    pub fn set_upper(&mut self, field: impl Into<String>, value: i64) {
        self.0.entry(field.into()).or_default().lte = Some(value);
    }

    /// Replace the bounds for `field`
    pub fn insert(&mut self, field: impl Into<String>, bounds: Bounds) {
        self.0.insert(field.into(), bounds);
    }

    /// Number of bounded fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field carries bounds
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(field, bounds)` in field-name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Bounds> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RangeMap {
    type Item = (&'a String, &'a Bounds);
    type IntoIter = btree_map::Iter<'a, String, Bounds>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse repeated range expressions into a [`RangeMap`]
///
/// `entries` are the raw values of the range parameter, one per occurrence.
/// Different keys accumulate; a later occurrence for the same key and bound
/// overwrites the earlier one. The emitted key has any leading `-` or `+`
/// stripped and is remapped through `aliases` (request name → storage name).
///
/// Entries the grammar cannot place are skipped with a `warn!` diagnostic
/// rather than failing the request.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use pagekit::range::{self, Bounds};
///
/// let ranges = range::parse(["age:18", "age:16"], &HashMap::new());
/// assert_eq!(ranges.get("age"), Some(&Bounds::lower(16)));
/// ```
#[must_use]
pub fn parse<'a, I>(entries: I, aliases: &HashMap<String, String>) -> RangeMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranges = RangeMap::new();
    for entry in entries {
        parse_entry(&mut ranges, entry, aliases);
    }
    ranges
}

fn parse_entry(ranges: &mut RangeMap, entry: &str, aliases: &HashMap<String, String>) {
    let Some((key, value)) = entry.split_once(':') else {
        warn!(entry, "range entry missing `:` separator, skipped");
        return;
    };

    let upper_only = key.starts_with('-');
    let name = strip_prefix(key);
    if name.is_empty() {
        warn!(entry, "range entry has empty field name, skipped");
        return;
    }
    let field = aliases.get(name).map_or(name, String::as_str);

    let components: Vec<&str> = value.split(',').collect();
    match components.as_slice() {
        [single] => {
            let parsed = parse_component(single);
            if upper_only {
                ranges.set_upper(field, parsed);
            } else {
                ranges.set_lower(field, parsed);
            }
        }
        [a, b] => {
            ranges.insert(field, Bounds::between(parse_component(a), parse_component(b)));
        }
        _ => warn!(entry, "range entry has more than two components, skipped"),
    }
}

// One leading `-` then one leading `+`, matching the sort-prefix convention.
fn strip_prefix(key: &str) -> &str {
    let key = key.strip_prefix('-').unwrap_or(key);
    key.strip_prefix('+').unwrap_or(key)
}

// Non-numeric components fall back to 0; strict callers pre-validate.
fn parse_component(component: &str) -> i64 {
    component.parse().unwrap_or(0)
}
