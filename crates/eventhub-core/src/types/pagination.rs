//! Offset pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Largest offset a page may reach; SQL binds it as a signed 64-bit value.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping `limit` to `1..=max_limit` and
    /// `page` so its offset stays within [`MAX_OFFSET`].
    pub fn new(page: u64, limit: u64, max_limit: u64) -> Self {
        let limit = limit.clamp(1, max_limit.max(1));
        let last_page = MAX_OFFSET / limit + 1;
        Self {
            page: page.clamp(1, last_page),
            limit,
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_OFFSET)
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages; zero when there are no items.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total_items,
            total_pages: total_items.div_ceil(request.limit),
        }
    }
}
