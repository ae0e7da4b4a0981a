//! Storage driver contract
//!
//! A driver is the pluggable storage side of the engine: anything that can
//! accept the normalized query description (index, limit, skip, sort list,
//! range predicate, filter predicate) and execute it. The core never
//! inspects driver internals; it only sequences calls against this trait and
//! reads back the container the driver populated. Any backend satisfying the
//! contract plugs in: a SQL database, a search index, a key-value store, or
//! the in-process [`MemoryDriver`](crate::memory::MemoryDriver).
//!
//! The record type travels as the [`Record`](Driver::Record) associated
//! type. Drivers that build schema-aware queries introspect it at compile
//! time by bounding `Record` with their own traits; nothing is conveyed at
//! runtime.
//!
//! All methods are synchronous and blocking. The core has no cancellation or
//! timeout primitive; wrap the whole pagination call in the request layer if
//! you need one. A driver value carries per-request state, so bind each
//! value to exactly one in-flight request.

use crate::error::Result;
use crate::filter::FilterMap;
use crate::range::RangeMap;
use crate::sort::SortField;

/// Capability contract a storage backend implements
///
/// The setter methods arrive in a fixed order before execution: `index`,
/// `limit`, `sort`, `skip`, `range`, `filter`; then `find` materializes the
/// page and `count` totals the matching records independent of `limit` and
/// `skip`.
///
/// # Example
///
/// ```rust
/// use pagekit::prelude::*;
///
/// /// A driver that never matches anything.
/// struct NullDriver;
///
/// impl Driver for NullDriver {
///     type Record = serde_json::Value;
///
///     fn index(&mut self, _index: &str) {}
///     fn limit(&mut self, _limit: u64) {}
///     fn skip(&mut self, _skip: u64) {}
///     fn sort(&mut self, _sorts: &[SortField]) {}
///     fn range(&mut self, _ranges: &RangeMap) {}
///     fn filter(&mut self, _filter: &FilterMap) {}
///
///     fn find(&mut self, _out: &mut Vec<Self::Record>) -> Result<()> {
///         Ok(())
///     }
///
///     fn count(&mut self) -> Result<i64> {
///         Ok(0)
///     }
/// }
/// ```
pub trait Driver {
    /// Element type the driver materializes
    type Record;

    /// Target collection: a table name, a search index, whatever names a
    /// specific set of records in the backend
    fn index(&mut self, index: &str);

    /// Maximum number of records per page
    fn limit(&mut self, limit: u64);

    /// Number of records to skip before the page starts
    fn skip(&mut self, skip: u64);

    /// Ordered sort list; empty means no explicit sort
    fn sort(&mut self, sorts: &[SortField]);

    /// Inclusive per-field range predicate
    fn range(&mut self, ranges: &RangeMap);

    /// Equality/in-list filter predicate
    fn filter(&mut self, filter: &FilterMap);

    /// Execute the query, materializing the page into `out`
    ///
    /// Real data scanning belongs here rather than in the setters, so a
    /// request that never reaches `find` costs nothing.
    fn find(&mut self, out: &mut Vec<Self::Record>) -> Result<()>;

    /// Total number of records matching the filter and range predicates,
    /// independent of `limit` and `skip`
    fn count(&mut self) -> Result<i64>;
}
