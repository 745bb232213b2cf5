//! Pagination shared by every mock list operation.

use clickdelivery_core::models::PaginatedResponse;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Slices `items` into the requested page. Page numbers are 1-based and
/// default to the first page; `total_pages` is `ceil(total / page_size)`.
pub fn paginate<T: Clone>(
    items: &[T],
    page: Option<usize>,
    page_size: Option<usize>,
) -> PaginatedResponse<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let start = (page - 1) * page_size;
    let data: Vec<T> = items.iter().skip(start).take(page_size).cloned().collect();
    PaginatedResponse {
        data,
        total: items.len(),
        page,
        page_size,
        total_pages: items.len().div_ceil(page_size),
    }
}
