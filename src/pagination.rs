use serde::Serialize;

/// Page size applied when the caller does not supply one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pagination options applied to repository list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

/// One page of results together with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// Items of the requested page, in result order.
    pub items: Vec<T>,
    /// Echo of the requested page number.
    pub page: usize,
    /// Total number of items matching the query.
    pub total_items: usize,
    /// Total number of pages at the requested page size.
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Assemble a result page from the items and the query totals.
    pub fn new(items: Vec<T>, page: usize, total_items: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_items,
            total_pages,
        }
    }
}
