//! Pagination query parameters.

use serde::{Deserialize, Serialize};

/// `page` and `limit` query parameters; absent values take the listing's
/// defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub limit: Option<u64>,
}
