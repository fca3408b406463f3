//! Pagination types.

use serde::{Deserialize, Serialize};

use super::MediaRecord;

/// Pagination bookkeeping reported by the gateway.
///
/// `has_next` and `has_prev` are taken from the response as-is; the client
/// never recomputes them from the page counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    /// 1-based index of the most recently loaded page.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageCursor {
    /// The page to request next, if the gateway reported one.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.current_page.saturating_add(1))
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

/// One page of records from the gateway's list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPage {
    /// The records in this page, in server order.
    #[serde(rename = "data")]
    pub records: Vec<MediaRecord>,

    pub pagination: PageCursor,
}
