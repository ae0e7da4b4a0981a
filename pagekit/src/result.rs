//! Paged result payload

use serde::Serialize;
use serde_json::Value;

/// One page of records plus pagination metadata
///
/// `next_id` and `prev_id` carry the configured cursor field of the last and
/// first record on the page, for cursor-style "load more" navigation. They
/// serialize as `null` when no cursor field is configured or the page is
/// empty.
///
/// # Example
///
/// ```rust
/// use pagekit::result::PageResult;
///
/// let result = PageResult {
///     data: vec!["a", "b"],
///     next_id: None,
///     prev_id: None,
///     count: 26,
///     rows: 2,
/// };
///
/// assert_eq!(result.len(), 2);
/// assert!(!result.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Records on this page, in driver order
    pub data: Vec<T>,
    /// Cursor field of the last record on the page
    pub next_id: Option<Value>,
    /// Cursor field of the first record on the page
    pub prev_id: Option<Value>,
    /// Total records matching the predicate, independent of page size
    pub count: i64,
    /// Page size actually used
    pub rows: u64,
}

impl<T> PageResult<T> {
    /// Number of records on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_is_empty() {
        let result = PageResult {
            data: Vec::<i64>::new(),
            next_id: None,
            prev_id: None,
            count: 0,
            rows: 12,
        };
        assert_eq!(result.len(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_serializes_with_null_cursors() {
        let result = PageResult {
            data: vec![1, 2],
            next_id: None,
            prev_id: None,
            count: 9,
            rows: 2,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": [1, 2],
                "next_id": null,
                "prev_id": null,
                "count": 9,
                "rows": 2,
            })
        );
    }

    #[test]
    fn test_serializes_cursor_values() {
        let result = PageResult {
            data: vec![3, 4],
            next_id: Some(Value::from(4)),
            prev_id: Some(Value::from(3)),
            count: 26,
            rows: 2,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["next_id"], Value::from(4));
        assert_eq!(json["prev_id"], Value::from(3));
    }
}
