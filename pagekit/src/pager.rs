//! Pagination orchestrator
//!
//! [`Pagination`] holds the per-endpoint configuration (default filters,
//! default page size, control-parameter names, field aliases, disabled
//! fields, cursor field) and translates each incoming [`PageQuery`] into a
//! request-scoped [`QueryPlan`], dispatches the plan to a [`Driver`], and
//! assembles the [`PageResult`].
//!
//! Configuration is immutable once built: every request method takes
//! `&self`, so one configured `Pagination` is safely shared across
//! concurrent requests. All per-request mutable state lives in the plan and
//! in the caller's driver value, which must serve exactly one in-flight
//! request.
//!
//! # Example
//!
//! ```rust
//! use pagekit::memory::MemoryDriver;
//! use pagekit::pager::Pagination;
//! use pagekit::query::PageQuery;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Clone)]
//! struct Member {
//!     id: u64,
//!     nickname: String,
//!     age: u8,
//! }
//!
//! let members: Vec<Member> = (1..=26)
//!     .map(|n| Member {
//!         id: n,
//!         nickname: char::from(b'a' + n as u8 - 1).to_string(),
//!         age: n as u8,
//!     })
//!     .collect();
//!
//! let pagination = Pagination::new()
//!     .with_index("members")
//!     .with_cursor_field("id");
//!
//! let query = PageQuery::from_pairs([("page", "2"), ("rows", "10")]);
//! let mut driver = MemoryDriver::new(members);
//! let result = pagination.paginate(&mut driver, &query).unwrap();
//!
//! assert_eq!(result.len(), 10);
//! assert_eq!(result.count, 26);
//! assert_eq!(result.prev_id, Some(11_u64.into()));
//! assert_eq!(result.next_id, Some(20_u64.into()));
//! ```

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::driver::Driver;
use crate::error::Result;
use crate::filter::FilterMap;
use crate::query::{PageQuery, ParamNames};
use crate::range::{self, RangeMap};
use crate::result::PageResult;
use crate::sort::{self, SortField};

/// Default number of records per page when the request does not override it
pub const DEFAULT_ROWS: u64 = 12;

/// Per-endpoint pagination configuration and request orchestrator
///
/// Built once per logical use-case with the `with_*` methods and reused
/// across requests.
///
/// # Example
///
/// ```rust
/// use pagekit::filter::FilterMap;
/// use pagekit::pager::Pagination;
///
/// let pagination = Pagination::new()
///     .with_index("members")
///     .with_default_rows(20)
///     .with_default_filter(FilterMap::from_iter([("tenant_id", 7_i64)]))
///     .with_alias("name", "nickname")
///     .with_disabled_field("password")
///     .with_cursor_field("id");
///
/// assert_eq!(pagination.index(), "members");
/// assert_eq!(pagination.default_rows(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Pagination {
    index: String,
    default_filter: FilterMap,
    default_rows: u64,
    params: ParamNames,
    aliases: HashMap<String, String>,
    disabled: HashSet<String>,
    cursor_field: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            index: String::new(),
            default_filter: FilterMap::new(),
            default_rows: DEFAULT_ROWS,
            params: ParamNames::default(),
            aliases: HashMap::new(),
            disabled: HashSet::new(),
            cursor_field: None,
        }
    }
}

impl Pagination {
    /// Create a configuration with default control-parameter names and a
    /// page size of [`DEFAULT_ROWS`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection or table name handed to the driver
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the default number of records per page
    #[must_use]
    pub fn with_default_rows(mut self, rows: u64) -> Self {
        self.default_rows = rows;
        self
    }

    /// Set the default filter merged over every request's filters
    ///
    /// Defaults take precedence over request-supplied values for the same
    /// key; use this for server-enforced scoping such as returning only the
    /// calling user's records.
    #[must_use]
    pub fn with_default_filter(mut self, filter: FilterMap) -> Self {
        self.default_filter = filter;
        self
    }

    /// Rename the reserved control parameters
    #[must_use]
    pub fn with_params(mut self, params: ParamNames) -> Self {
        self.params = params;
        self
    }

    /// Map a request field name to the storage field name
    ///
    /// Applies to sort fields, range keys, and filter keys alike.
    #[must_use]
    pub fn with_alias(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.aliases.insert(key.into(), field.into());
        self
    }

    /// Forbid a storage field from participating in filtering
    ///
    /// The field is stripped from the final filter map whether it came from
    /// the request or from the configured defaults.
    #[must_use]
    pub fn with_disabled_field(mut self, field: impl Into<String>) -> Self {
        self.disabled.insert(field.into());
        self
    }

    /// Forbid several storage fields at once
    #[must_use]
    pub fn with_disabled_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Surface cursor values for the named record field
    ///
    /// When set, the result's `next_id` and `prev_id` carry this field of
    /// the last and first record on the page. The name refers to the
    /// record's *serialized* field.
    #[must_use]
    pub fn with_cursor_field(mut self, field: impl Into<String>) -> Self {
        self.cursor_field = Some(field.into());
        self
    }

    /// The configured index name
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The configured default page size
    #[must_use]
    pub fn default_rows(&self) -> u64 {
        self.default_rows
    }

    /// Translate a request into its normalized query plan
    ///
    /// Pure translation: no driver is involved, which makes the plan easy
    /// to inspect and test.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagekit::pager::Pagination;
    /// use pagekit::query::PageQuery;
    ///
    /// let pagination = Pagination::new().with_index("members");
    /// let query = PageQuery::from_pairs([("page", "3"), ("rows", "10")]);
    ///
    /// let plan = pagination.plan(&query);
    /// assert_eq!(plan.rows, 10);
    /// assert_eq!(plan.skip, 20);
    /// ```
    #[must_use]
    pub fn plan(&self, query: &PageQuery) -> QueryPlan {
        let rows = self.effective_rows(query);
        let skip = self.skip_offset(query, rows);
        let sorts = sort::parse(
            query.first(&self.params.sorts).unwrap_or(""),
            &self.aliases,
        );
        let ranges = range::parse(query.values(&self.params.range), &self.aliases);

        let mut filter = FilterMap::from_query(query, &self.params, &self.aliases);
        filter.merge_defaults(&self.default_filter, &self.params);
        filter.remove_disabled(&self.disabled);

        QueryPlan {
            index: self.index.clone(),
            rows,
            skip,
            sorts,
            ranges,
            filter,
        }
    }

    /// Translate a request, dispatch it to `driver`, and assemble the page
    ///
    /// Malformed `page`/`rows`/range parameters degrade to defaults rather
    /// than failing; a driver error from `find` or `count` is returned as
    /// [`Error::Driver`](crate::error::Error::Driver).
    pub fn paginate<D>(&self, driver: &mut D, query: &PageQuery) -> Result<PageResult<D::Record>>
    where
        D: Driver,
        D::Record: Serialize,
    {
        let plan = self.plan(query);
        debug!(
            index = %plan.index,
            rows = plan.rows,
            skip = plan.skip,
            sorts = plan.sorts.len(),
            ranges = plan.ranges.len(),
            filters = plan.filter.len(),
            "dispatching query plan"
        );
        plan.apply(driver);

        let mut data = Vec::new();
        driver.find(&mut data)?;
        let count = driver.count()?;

        let (next_id, prev_id) = self.cursors(&data)?;
        Ok(PageResult {
            data,
            next_id,
            prev_id,
            count,
            rows: plan.rows,
        })
    }

    // `rows` must parse as a positive integer; anything else falls back to
    // the configured default.
    fn effective_rows(&self, query: &PageQuery) -> u64 {
        match query
            .first(&self.params.rows)
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            Some(rows) if rows > 0 => rows,
            _ => self.default_rows,
        }
    }

    // `page` is 1-based; page 1, page 0, and unparsable values all start at
    // the first record.
    fn skip_offset(&self, query: &PageQuery, rows: u64) -> u64 {
        let page = query
            .first(&self.params.page)
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(0);
        if page <= 1 {
            0
        } else {
            (page - 1).saturating_mul(rows)
        }
    }

    fn cursors<T: Serialize>(&self, data: &[T]) -> Result<(Option<Value>, Option<Value>)> {
        let Some(field) = self.cursor_field.as_deref() else {
            return Ok((None, None));
        };
        let (Some(first), Some(last)) = (data.first(), data.last()) else {
            return Ok((None, None));
        };
        Ok((cursor_value(last, field)?, cursor_value(first, field)?))
    }
}

fn cursor_value<T: Serialize>(record: &T, field: &str) -> Result<Option<Value>> {
    let value = serde_json::to_value(record)?;
    match value.get(field) {
        Some(found) => Ok(Some(found.clone())),
        None => {
            warn!(field, "cursor field missing from record, omitting cursor");
            Ok(None)
        }
    }
}

/// Normalized, storage-agnostic description of one request
///
/// Created fresh per request by [`Pagination::plan`] and discarded after the
/// driver call; nothing here outlives the request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Target collection or table name
    pub index: String,
    /// Page size
    pub rows: u64,
    /// Records to skip before the page starts
    pub skip: u64,
    /// Ordered sort list
    pub sorts: Vec<SortField>,
    /// Inclusive per-field range predicate
    pub ranges: RangeMap,
    /// Equality/in-list filter predicate
    pub filter: FilterMap,
}

impl QueryPlan {
    /// Hand the plan to a driver, in the contract's call order
    pub fn apply<D: Driver>(&self, driver: &mut D) {
        driver.index(&self.index);
        driver.limit(self.rows);
        driver.sort(&self.sorts);
        driver.skip(self.skip);
        driver.range(&self.ranges);
        driver.filter(&self.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::filter::FilterValue;
    use crate::range::Bounds;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Member {
        id: u64,
        nickname: String,
        age: u8,
    }

    fn member(id: u64, nickname: &str, age: u8) -> Member {
        Member {
            id,
            nickname: nickname.to_string(),
            age,
        }
    }

    /// Records every call so tests can assert sequencing and payloads.
    #[derive(Default)]
    struct RecordingDriver {
        calls: Vec<String>,
        index: String,
        limit: u64,
        skip: u64,
        sorts: Vec<SortField>,
        ranges: RangeMap,
        filter: FilterMap,
        page: Vec<Member>,
        total: i64,
    }

    impl Driver for RecordingDriver {
        type Record = Member;

        fn index(&mut self, index: &str) {
            self.calls.push("index".to_string());
            self.index = index.to_string();
        }

        fn limit(&mut self, limit: u64) {
            self.calls.push("limit".to_string());
            self.limit = limit;
        }

        fn skip(&mut self, skip: u64) {
            self.calls.push("skip".to_string());
            self.skip = skip;
        }

        fn sort(&mut self, sorts: &[SortField]) {
            self.calls.push("sort".to_string());
            self.sorts = sorts.to_vec();
        }

        fn range(&mut self, ranges: &RangeMap) {
            self.calls.push("range".to_string());
            self.ranges = ranges.clone();
        }

        fn filter(&mut self, filter: &FilterMap) {
            self.calls.push("filter".to_string());
            self.filter = filter.clone();
        }

        fn find(&mut self, out: &mut Vec<Member>) -> Result<()> {
            self.calls.push("find".to_string());
            out.extend(self.page.iter().cloned());
            Ok(())
        }

        fn count(&mut self) -> Result<i64> {
            self.calls.push("count".to_string());
            Ok(self.total)
        }
    }

    /// Fails on demand to exercise error propagation.
    struct FailingDriver {
        fail_find: bool,
    }

    impl Driver for FailingDriver {
        type Record = Member;

        fn index(&mut self, _index: &str) {}
        fn limit(&mut self, _limit: u64) {}
        fn skip(&mut self, _skip: u64) {}
        fn sort(&mut self, _sorts: &[SortField]) {}
        fn range(&mut self, _ranges: &RangeMap) {}
        fn filter(&mut self, _filter: &FilterMap) {}

        fn find(&mut self, _out: &mut Vec<Member>) -> Result<()> {
            if self.fail_find {
                Err(Error::driver("storage unreachable"))
            } else {
                Ok(())
            }
        }

        fn count(&mut self) -> Result<i64> {
            Err(Error::driver("count rejected"))
        }
    }

    #[test]
    fn test_effective_rows_default() {
        let pagination = Pagination::new();
        let plan = pagination.plan(&PageQuery::new());
        assert_eq!(plan.rows, DEFAULT_ROWS);
    }

    #[test]
    fn test_effective_rows_override() {
        let pagination = Pagination::new();
        let query = PageQuery::from_pairs([("rows", "50")]);
        assert_eq!(pagination.plan(&query).rows, 50);
    }

    #[test]
    fn test_effective_rows_fail_soft() {
        let pagination = Pagination::new().with_default_rows(20);
        for raw in ["abc", "0", "-5", ""] {
            let query = PageQuery::from_pairs([("rows", raw)]);
            assert_eq!(pagination.plan(&query).rows, 20, "rows={raw:?}");
        }
    }

    #[test]
    fn test_skip_from_page_and_rows() {
        let pagination = Pagination::new();
        let query = PageQuery::from_pairs([("page", "3"), ("rows", "10")]);
        let plan = pagination.plan(&query);
        assert_eq!(plan.skip, 20);
        assert_eq!(plan.rows, 10);
    }

    #[test]
    fn test_skip_zero_for_first_page() {
        let pagination = Pagination::new();
        for raw in ["0", "1", "abc", "-2"] {
            let query = PageQuery::from_pairs([("page", raw)]);
            assert_eq!(pagination.plan(&query).skip, 0, "page={raw:?}");
        }
        assert_eq!(pagination.plan(&PageQuery::new()).skip, 0);
    }

    #[test]
    fn test_plan_uses_renamed_params() {
        let pagination = Pagination::new().with_params(ParamNames {
            page: "p".to_string(),
            rows: "per_page".to_string(),
            sorts: "order".to_string(),
            range: "bounds".to_string(),
        });
        let query = PageQuery::from_pairs([
            ("p", "2"),
            ("per_page", "5"),
            ("order", "-age"),
            ("bounds", "age:18"),
        ]);
        let plan = pagination.plan(&query);
        assert_eq!(plan.rows, 5);
        assert_eq!(plan.skip, 5);
        assert_eq!(plan.sorts, vec![SortField::descending("age")]);
        assert_eq!(plan.ranges.get("age"), Some(&Bounds::lower(18)));
        assert!(plan.filter.is_empty());
    }

    #[test]
    fn test_plan_aliases_apply_everywhere() {
        let pagination = Pagination::new().with_alias("name", "nickname");
        let query = PageQuery::from_pairs([
            ("sorts", "-name"),
            ("range", "name:1"),
            ("name", "alice"),
        ]);
        let plan = pagination.plan(&query);
        assert_eq!(plan.sorts, vec![SortField::descending("nickname")]);
        assert!(plan.ranges.get("nickname").is_some());
        assert_eq!(plan.filter.get("nickname"), Some(&FilterValue::from("alice")));
    }

    #[test]
    fn test_plan_merges_defaults_and_strips_disabled() {
        let pagination = Pagination::new()
            .with_default_filter(FilterMap::from_iter([("user_id", 42_i64)]))
            .with_disabled_field("role");
        let query = PageQuery::from_pairs([("user_id", "999"), ("role", "admin")]);
        let plan = pagination.plan(&query);
        assert_eq!(plan.filter.get("user_id"), Some(&FilterValue::from(42_i64)));
        assert!(!plan.filter.contains_key("role"));
    }

    #[test]
    fn test_apply_call_order() {
        let pagination = Pagination::new().with_index("members");
        let mut driver = RecordingDriver::default();
        let query = PageQuery::from_pairs([("sorts", "-age"), ("range", "age:18,30")]);
        pagination
            .paginate(&mut driver, &query)
            .expect("pagination should succeed");
        assert_eq!(
            driver.calls,
            vec!["index", "limit", "sort", "skip", "range", "filter", "find", "count"]
        );
        assert_eq!(driver.index, "members");
        assert_eq!(driver.sorts, vec![SortField::descending("age")]);
        assert_eq!(driver.ranges.get("age"), Some(&Bounds::between(18, 30)));
    }

    #[test]
    fn test_paginate_assembles_result() {
        let pagination = Pagination::new()
            .with_index("members")
            .with_cursor_field("id");
        let mut driver = RecordingDriver {
            page: vec![member(11, "k", 11), member(12, "l", 12)],
            total: 26,
            ..RecordingDriver::default()
        };
        let query = PageQuery::from_pairs([("page", "2"), ("rows", "2")]);
        let result = pagination.paginate(&mut driver, &query).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.count, 26);
        assert_eq!(result.rows, 2);
        assert_eq!(result.prev_id, Some(Value::from(11)));
        assert_eq!(result.next_id, Some(Value::from(12)));
    }

    #[test]
    fn test_paginate_empty_page_has_no_cursors() {
        let pagination = Pagination::new().with_cursor_field("id");
        let mut driver = RecordingDriver::default();
        let result = pagination.paginate(&mut driver, &PageQuery::new()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.next_id, None);
        assert_eq!(result.prev_id, None);
    }

    #[test]
    fn test_paginate_without_cursor_field() {
        let pagination = Pagination::new();
        let mut driver = RecordingDriver {
            page: vec![member(1, "a", 1)],
            total: 1,
            ..RecordingDriver::default()
        };
        let result = pagination.paginate(&mut driver, &PageQuery::new()).unwrap();
        assert_eq!(result.next_id, None);
        assert_eq!(result.prev_id, None);
    }

    #[test]
    fn test_paginate_missing_cursor_field_omits_cursor() {
        let pagination = Pagination::new().with_cursor_field("uuid");
        let mut driver = RecordingDriver {
            page: vec![member(1, "a", 1)],
            total: 1,
            ..RecordingDriver::default()
        };
        let result = pagination.paginate(&mut driver, &PageQuery::new()).unwrap();
        assert_eq!(result.next_id, None);
        assert_eq!(result.prev_id, None);
    }

    #[test]
    fn test_paginate_propagates_find_error() {
        let pagination = Pagination::new();
        let mut driver = FailingDriver { fail_find: true };
        let err = pagination
            .paginate(&mut driver, &PageQuery::new())
            .unwrap_err();
        assert!(matches!(err, Error::Driver(_)));
    }

    #[test]
    fn test_paginate_propagates_count_error() {
        let pagination = Pagination::new();
        let mut driver = FailingDriver { fail_find: false };
        let err = pagination
            .paginate(&mut driver, &PageQuery::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "driver error: count rejected");
    }

    #[test]
    fn test_shared_config_across_requests() {
        // One configured instance serves independent requests; plans do not
        // leak state between calls.
        let pagination = Pagination::new().with_default_rows(10);
        let first = pagination.plan(&PageQuery::from_pairs([("page", "5")]));
        let second = pagination.plan(&PageQuery::new());
        assert_eq!(first.skip, 40);
        assert_eq!(second.skip, 0);
    }
}
