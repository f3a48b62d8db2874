use serde::{Deserialize, Serialize};

use crate::models::SortOrder;

/// Page size used when none is configured, or when the configured one is 0.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Construction-time settings for a [`Leaderboard`](crate::Leaderboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardOptions {
    /// Key of the sorted set in the store's namespace.
    pub name: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl LeaderboardOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            sort_order: SortOrder::default(),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
