//! In-memory reference driver
//!
//! [`MemoryDriver`] implements the [`Driver`] contract over a `Vec` of
//! records held in process. It paginates collections that are already
//! loaded, such as fixture data, cached lists, and test datasets. It doubles as the
//! reference implementation of the contract's semantics: what it returns for
//! a given plan is what a storage-backed driver is expected to return.
//!
//! Matching is performed on the records' serialized form, so field names are
//! the serialized ones and equality is loose: the query string `"18"`
//! matches the number `18`.
//!
//! # Example
//!
//! ```rust
//! use pagekit::memory::MemoryDriver;
//! use pagekit::pager::Pagination;
//! use pagekit::query::PageQuery;
//!
//! let records = vec![
//!     serde_json::json!({"id": 1, "status": "active"}),
//!     serde_json::json!({"id": 2, "status": "done"}),
//! ];
//!
//! let pagination = Pagination::new().with_index("tasks");
//! let query = PageQuery::from_pairs([("status", "done")]);
//! let mut driver = MemoryDriver::new(records);
//!
//! let result = pagination.paginate(&mut driver, &query).unwrap();
//! assert_eq!(result.count, 1);
//! assert_eq!(result.data[0]["id"], 2);
//! ```

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::convert::coerce_i64;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::filter::{FilterMap, FilterValue};
use crate::range::RangeMap;
use crate::sort::{SortDirection, SortField};

/// Driver over an in-process `Vec` of records
///
/// Holds the dataset plus the per-request query state, so one value serves
/// one request at a time, like any other driver.
#[derive(Debug, Clone)]
pub struct MemoryDriver<T> {
    records: Vec<T>,
    index: String,
    limit: u64,
    skip: u64,
    sorts: Vec<SortField>,
    ranges: RangeMap,
    filter: FilterMap,
}

impl<T: Serialize + Clone> MemoryDriver<T> {
    /// Create a driver over `records`
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            index: String::new(),
            limit: u64::MAX,
            skip: 0,
            sorts: Vec::new(),
            ranges: RangeMap::new(),
            filter: FilterMap::new(),
        }
    }

    // Indices of matching records in dataset order, paired with their
    // serialized form for sorting.
    fn matching(&self) -> Result<Vec<(usize, Value)>> {
        let mut matched = Vec::new();
        for (position, record) in self.records.iter().enumerate() {
            let value = serde_json::to_value(record).map_err(Error::driver)?;
            if self.matches(&value) {
                matched.push((position, value));
            }
        }
        Ok(matched)
    }

    fn matches(&self, record: &Value) -> bool {
        for (field, expected) in &self.filter {
            let actual = record.get(field);
            let hit = match expected {
                FilterValue::Scalar(want) => loose_eq(actual, want),
                FilterValue::List(options) => options.iter().any(|want| loose_eq(actual, want)),
            };
            if !hit {
                return false;
            }
        }

        for (field, bounds) in &self.ranges {
            let Some(actual) = record.get(field) else {
                return false;
            };
            let Some(numeric) = coerce_i64(actual.clone()).as_i64() else {
                return false;
            };
            if !bounds.contains(numeric) {
                return false;
            }
        }

        true
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for sort in &self.sorts {
            let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
            let ordering = match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl<T: Serialize + Clone> Driver for MemoryDriver<T> {
    type Record = T;

    fn index(&mut self, index: &str) {
        self.index = index.to_string();
    }

    fn limit(&mut self, limit: u64) {
        self.limit = limit;
    }

    fn skip(&mut self, skip: u64) {
        self.skip = skip;
    }

    fn sort(&mut self, sorts: &[SortField]) {
        self.sorts = sorts.to_vec();
    }

    fn range(&mut self, ranges: &RangeMap) {
        self.ranges = ranges.clone();
    }

    fn filter(&mut self, filter: &FilterMap) {
        self.filter = filter.clone();
    }

    fn find(&mut self, out: &mut Vec<T>) -> Result<()> {
        debug!(index = %self.index, records = self.records.len(), "scanning in-memory dataset");
        let mut matched = self.matching()?;
        // Stable sort keeps dataset order for equal keys.
        matched.sort_by(|(_, a), (_, b)| self.compare(a, b));
        out.extend(
            matched
                .into_iter()
                .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
                .map(|(position, _)| self.records[position].clone()),
        );
        Ok(())
    }

    fn count(&mut self) -> Result<i64> {
        Ok(self.matching()?.len() as i64)
    }
}

// Equality between a record field and a filter value: exact JSON equality,
// or matching text forms so the query string "18" equals the number 18.
fn loose_eq(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        None => false,
        Some(actual) => actual == expected || text(actual) == text(expected),
    }
}

fn text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
                x.cmp(y)
            } else if let (Some(x), Some(y)) = (a.as_bool(), b.as_bool()) {
                x.cmp(&y)
            } else {
                text(a).cmp(&text(b))
            }
        }
    }
}
