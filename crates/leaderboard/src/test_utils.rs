//! Shared test utilities for leaderboard tests.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::{mock_leaderboard, seeded_leaderboard};
//!
//! let mut store = MockRankingStore::new();
//! store.expect_cardinality().returning(|_| Ok(3));
//! let board = mock_leaderboard(store, LeaderboardOptions::new("board"));
//! ```

use std::sync::Arc;

use crate::config::LeaderboardOptions;
use crate::leaderboard::Leaderboard;
use crate::stores::{InMemoryRankingStore, MockRankingStore, RankingStore};

/// Builds a leaderboard over a configured mock store.
pub fn mock_leaderboard(store: MockRankingStore, options: LeaderboardOptions) -> Leaderboard {
    Leaderboard::new(Arc::new(store), options)
}

/// Builds a leaderboard over a fresh in-memory store holding `members`.
pub async fn seeded_leaderboard(
    options: LeaderboardOptions,
    members: &[(&str, f64)],
) -> Leaderboard {
    let store = InMemoryRankingStore::new();
    for (member, score) in members {
        store
            .add(&options.name, member, *score)
            .await
            .expect("seeding the in-memory store cannot fail");
    }
    Leaderboard::new(Arc::new(store), options)
}
