//! # pagekit
//!
//! Driver-agnostic pagination engine. pagekit turns a request's query-string
//! parameters (page, rows, a sort spec, a range spec, and arbitrary filter
//! fields) into a normalized, storage-agnostic query description, hands it
//! to a pluggable storage driver, and assembles a uniform paged result.
//!
//! ## Features
//!
//! - **Translation, not execution**: the core builds a [`QueryPlan`] and
//!   sequences calls against the [`Driver`] contract; backends own the query
//!   syntax and the scanning
//! - **Compact request grammar**: `sorts=-age,name`, repeatable
//!   `range=age:18,30` / `range=-score:90`, everything else a filter field
//! - **Server-enforced defaults**: configured filters overwrite
//!   client-supplied values, so scoping cannot be bypassed
//! - **Field aliasing and exclusion**: request names remap to storage names;
//!   disabled fields never reach a driver
//! - **Cursor hints**: `next_id`/`prev_id` from a configured record field
//! - **Fail-soft parameters**: malformed paging input degrades to defaults
//!   instead of failing the request; driver errors are surfaced, never
//!   swallowed
//!
//! ## Example
//!
//! ```rust
//! use pagekit::prelude::*;
//!
//! #[derive(Serialize, Clone)]
//! struct Member {
//!     id: u64,
//!     nickname: String,
//!     age: u8,
//! }
//!
//! fn main() -> Result<()> {
//!     let members = vec![
//!         Member { id: 1, nickname: "a".into(), age: 17 },
//!         Member { id: 2, nickname: "b".into(), age: 21 },
//!         Member { id: 3, nickname: "c".into(), age: 30 },
//!     ];
//!
//!     // Configure once per endpoint, reuse across requests.
//!     let pagination = Pagination::new()
//!         .with_index("members")
//!         .with_default_rows(10)
//!         .with_cursor_field("id");
//!
//!     // Per request: decoded query pairs in, one page out.
//!     let query = PageQuery::from_pairs([("range", "age:18,30"), ("sorts", "-age")]);
//!     let mut driver = MemoryDriver::new(members);
//!     let result = pagination.paginate(&mut driver, &query)?;
//!
//!     assert_eq!(result.count, 2);
//!     assert_eq!(result.data[0].nickname, "c");
//!     assert_eq!(result.next_id, Some(2_u64.into()));
//!     Ok(())
//! }
//! ```
//!
//! [`QueryPlan`]: crate::pager::QueryPlan
//! [`Driver`]: crate::driver::Driver

pub mod convert;
pub mod driver;
pub mod error;
pub mod filter;
pub mod memory;
pub mod pager;
pub mod query;
pub mod range;
pub mod result;
pub mod sort;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::convert::{coerce_bool, coerce_f64, coerce_i64};
    pub use crate::driver::Driver;
    pub use crate::error::{Error, Result};
    pub use crate::filter::{FilterMap, FilterValue};
    pub use crate::memory::MemoryDriver;
    pub use crate::pager::{Pagination, QueryPlan, DEFAULT_ROWS};
    pub use crate::query::{PageQuery, ParamNames};
    pub use crate::range::{Bounds, RangeMap};
    pub use crate::result::PageResult;
    pub use crate::sort::{SortDirection, SortField};

    pub use serde::{Deserialize, Serialize};
}
