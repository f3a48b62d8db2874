//! Test context for CLI command tests.
//!
//! Provides a TestContext struct that sets up a leaderboard over an in-memory
//! store, so commands run end to end without a Redis server.

use std::sync::Arc;

use leaderboard::{InMemoryRankingStore, Leaderboard, LeaderboardOptions, SortOrder};

/// Test context for CLI command tests.
pub struct TestContext {
    /// Leaderboard the command under test operates on.
    pub board: Leaderboard,
}

impl TestContext {
    /// Create a context with an empty ascending leaderboard.
    pub fn new() -> Self {
        Self::with_options(LeaderboardOptions::new("test-board"))
    }

    /// Create a context with an empty descending leaderboard.
    pub fn descending() -> Self {
        Self::with_options(
            LeaderboardOptions::new("test-board").sort_order(SortOrder::Descending),
        )
    }

    pub fn with_options(options: LeaderboardOptions) -> Self {
        let store = InMemoryRankingStore::new();
        Self {
            board: Leaderboard::new(Arc::new(store), options),
        }
    }

    /// Rank every `(member, score)` pair on the board.
    pub async fn seed(self, members: &[(&str, f64)]) -> Self {
        for (member, score) in members {
            self.board
                .rank_member(member, *score)
                .await
                .expect("Failed to seed leaderboard");
        }
        self
    }
}
