//! Paged results for windowed SELECT statements.

use crate::error::{StmtError, StmtResult};

/// Smallest page size a [`PagedResult`] accepts.
pub const MIN_LIMIT: i64 = 10;

/// One page of query results plus the size of the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    offset: i64,
    limit: i64,
    total_count: i64,
    window: (i64, i64),
    results: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Create a page, checking `limit`, `offset` and `total_count` in that
    /// order, then that the row window fits in an `i64`.
    pub fn new(offset: i64, limit: i64, total_count: i64, results: Vec<T>) -> StmtResult<Self> {
        if limit < MIN_LIMIT {
            return Err(StmtError::out_of_range(
                "limit",
                limit,
                "limit must be greater than 10.",
            ));
        }
        if offset < 0 {
            return Err(StmtError::out_of_range(
                "offset",
                offset,
                "offset must be greater than 0.",
            ));
        }
        if total_count < 0 {
            return Err(StmtError::out_of_range(
                "totalCount",
                total_count,
                "totalCount must be greater than 0.",
            ));
        }
        let window = row_window(offset, limit).ok_or_else(|| {
            StmtError::out_of_range(
                "offset",
                offset,
                "offset + limit exceeds the largest row number.",
            )
        })?;

        Ok(Self {
            offset,
            limit,
            total_count,
            window,
            results,
        })
    }

    /// Index of the first record in `results`, zero based.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Records per page.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// `(starting, ending)` row numbers for the SELECT pagination parameters.
    ///
    /// Row numbers are one based and the ending bound is exclusive.
    pub fn row_window(&self) -> (i64, i64) {
        self.window
    }

    /// Whether rows exist past this page.
    pub fn has_more(&self) -> bool {
        i64::try_from(self.results.len())
            .ok()
            .and_then(|len| self.offset.checked_add(len))
            .is_some_and(|seen| seen < self.total_count)
    }
}

/// `(starting, ending)` row numbers covering `limit` rows after `offset`,
/// or `None` when the ending bound overflows.
pub fn row_window(offset: i64, limit: i64) -> Option<(i64, i64)> {
    let start = offset.checked_add(1)?;
    Some((start, start.checked_add(limit)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_page() {
        let page = PagedResult::new(20, 10, 45, vec![1, 2, 3]).unwrap();
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.total_count(), 45);
        assert_eq!(page.results(), &[1, 2, 3]);
        assert_eq!(page.row_window(), (21, 31));
        assert!(page.has_more());
    }

    #[test]
    fn limit_below_minimum() {
        let err = PagedResult::new(0, 9, 0, Vec::<i32>::new()).unwrap_err();
        assert_eq!(err.param(), Some("limit"));
        assert_eq!(err.to_string(), "limit must be greater than 10.");
    }

    #[test]
    fn negative_offset() {
        let err = PagedResult::new(-1, 10, 0, Vec::<i32>::new()).unwrap_err();
        assert_eq!(err.param(), Some("offset"));
    }

    #[test]
    fn negative_total_count() {
        let err = PagedResult::new(0, 10, -5, Vec::<i32>::new()).unwrap_err();
        assert_eq!(err.param(), Some("totalCount"));
        assert!(matches!(err, StmtError::OutOfRange { value: -5, .. }));
    }

    #[test]
    fn limit_checked_before_offset() {
        let err = PagedResult::new(-1, 1, -1, Vec::<i32>::new()).unwrap_err();
        assert_eq!(err.param(), Some("limit"));
    }

    #[test]
    fn window_overflow_is_rejected() {
        let err = PagedResult::new(i64::MAX, 10, i64::MAX, vec![1]).unwrap_err();
        assert_eq!(err.param(), Some("offset"));
        assert_eq!(err.to_string(), "offset + limit exceeds the largest row number.");

        assert_eq!(row_window(i64::MAX, 10), None);
        assert_eq!(row_window(0, i64::MAX), None);
        assert_eq!(row_window(0, 10), Some((1, 11)));
    }

    #[test]
    fn largest_valid_window() {
        let offset = i64::MAX - 11;
        let page = PagedResult::new(offset, 10, i64::MAX, vec![(); 10]).unwrap();
        assert_eq!(page.row_window(), (i64::MAX - 10, i64::MAX));
        assert!(page.has_more());
    }

    #[test]
    fn last_page_has_no_more() {
        let page = PagedResult::new(40, 10, 42, vec![(); 2]).unwrap();
        assert!(!page.has_more());
    }
}
