//! Pagination settings and the paginated response envelope

use serde::Serialize;
use std::num::NonZeroUsize;

/// Page size and page index applied to list results
///
/// Starts unbounded (everything on one page) at page 1. Owned by a single
/// client, so every client carries its own pagination context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    items_per_page: Option<NonZeroUsize>,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            items_per_page: None,
            current_page: 1,
        }
    }
}

impl Pagination {
    /// Pagination with the given page size and page
    pub fn new(items_per_page: Option<usize>, current_page: usize) -> Self {
        let mut pagination = Self::default();
        pagination.set_items_per_page(items_per_page);
        pagination.set_current_page(current_page);
        pagination
    }

    /// Page size, `None` when unbounded
    pub fn items_per_page(&self) -> Option<usize> {
        self.items_per_page.map(NonZeroUsize::get)
    }

    /// Sets the page size. `None` or `Some(0)` means unbounded.
    pub fn set_items_per_page(&mut self, items_per_page: Option<usize>) {
        self.items_per_page = items_per_page.and_then(NonZeroUsize::new);
    }

    /// One-based page index
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Sets the one-based page index; page 0 is treated as page 1
    pub fn set_current_page(&mut self, current_page: usize) {
        self.current_page = current_page.max(1);
    }

    /// Wraps a full collection into a paginated envelope
    ///
    /// When unbounded the whole collection is returned as page 1 of 1. Otherwise
    /// the page is the window of `items_per_page` elements starting at
    /// `items_per_page * (current_page - 1)`, which may be short or empty past the end.
    pub fn paginate<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let total_items = items.len();

        let Some(per_page) = self.items_per_page else {
            return PaginatedResponse {
                total_items,
                items_per_page: None,
                total_pages: 1,
                current_page: 1,
                data: items,
            };
        };

        let per_page = per_page.get();
        let offset = per_page.saturating_mul(self.current_page - 1);
        let data = items.into_iter().skip(offset).take(per_page).collect();

        PaginatedResponse {
            total_items,
            items_per_page: Some(per_page),
            total_pages: total_items.div_ceil(per_page),
            current_page: self.current_page,
            data,
        }
    }
}

/// A page of results plus the counts describing the full collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Length of the collection before slicing
    pub total_items: usize,
    /// Page size, `None` when unbounded
    pub items_per_page: Option<usize>,
    pub total_pages: usize,
    pub current_page: usize,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_default_is_unbounded_first_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.items_per_page(), None);
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_unbounded_returns_everything_on_one_page() {
        let mut pagination = Pagination::default();
        // The page index is ignored while unbounded
        pagination.set_current_page(4);

        let response = pagination.paginate(numbers(137));

        assert_eq!(response.total_items, 137);
        assert_eq!(response.items_per_page, None);
        assert_eq!(response.total_pages, 1);
        assert_eq!(response.current_page, 1);
        assert_eq!(response.data, numbers(137));
    }

    #[test]
    fn test_unbounded_empty_collection() {
        let response = Pagination::default().paginate(Vec::<usize>::new());
        assert_eq!(response.total_items, 0);
        assert_eq!(response.total_pages, 1);
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_first_page_slice() {
        let response = Pagination::new(Some(10), 1).paginate(numbers(25));

        assert_eq!(response.total_items, 25);
        assert_eq!(response.items_per_page, Some(10));
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 1);
        assert_eq!(response.data, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_middle_page_slice_starts_at_offset() {
        let response = Pagination::new(Some(10), 2).paginate(numbers(25));

        assert_eq!(response.data, (10..20).collect::<Vec<_>>());
        assert_eq!(response.total_items, 25);
    }

    #[test]
    fn test_last_page_is_a_short_tail() {
        let response = Pagination::new(Some(10), 3).paginate(numbers(25));

        assert_eq!(response.data, vec![20, 21, 22, 23, 24]);
        assert_eq!(response.total_pages, 3);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let response = Pagination::new(Some(10), 4).paginate(numbers(25));

        assert!(response.data.is_empty());
        assert_eq!(response.total_items, 25);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 4);
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        assert_eq!(Pagination::new(Some(5), 1).paginate(numbers(10)).total_pages, 2);
        assert_eq!(Pagination::new(Some(5), 1).paginate(numbers(11)).total_pages, 3);
        assert_eq!(Pagination::new(Some(5), 1).paginate(numbers(0)).total_pages, 0);
        assert_eq!(Pagination::new(Some(100), 1).paginate(numbers(1)).total_pages, 1);
    }

    #[test]
    fn test_page_size_one() {
        let response = Pagination::new(Some(1), 3).paginate(vec!["a", "b", "c", "d"]);
        assert_eq!(response.data, vec!["c"]);
        assert_eq!(response.total_pages, 4);
    }

    #[test]
    fn test_zero_page_size_means_unbounded() {
        let pagination = Pagination::new(Some(0), 2);
        assert_eq!(pagination.items_per_page(), None);

        let response = pagination.paginate(numbers(3));
        assert_eq!(response.total_pages, 1);
        assert_eq!(response.data, numbers(3));
    }

    #[test]
    fn test_page_zero_is_clamped_to_first_page() {
        let pagination = Pagination::new(Some(2), 0);
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.paginate(numbers(5)).data, vec![0, 1]);
    }

    #[test]
    fn test_setters_switch_back_to_unbounded() {
        let mut pagination = Pagination::new(Some(2), 2);
        pagination.set_items_per_page(None);

        let response = pagination.paginate(numbers(5));
        assert_eq!(response.data, numbers(5));
        assert_eq!(response.current_page, 1);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let response = Pagination::default().paginate(vec![1]);
        let json = serde_json::to_value(&response).expect("Should serialize");

        assert_eq!(json["totalItems"], 1);
        assert!(json["itemsPerPage"].is_null());
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["data"][0], 1);
    }
}
