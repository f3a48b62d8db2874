//! Leaderboards on top of a sorted-set store.
//!
//! A [`Leaderboard`] answers ranking queries (rank, score, page, top-N) for a
//! named collection of scored members. Storage goes through the
//! [`RankingStore`] trait: [`RedisRankingStore`] for Redis sorted sets,
//! [`InMemoryRankingStore`] for tests and embedding.
//!
//! ```ignore
//! let options = LeaderboardOptions::new("highscores").sort_order(SortOrder::Descending);
//! let board = Leaderboard::connect("redis://127.0.0.1:6379", options).await?;
//!
//! board.rank_member("alice", 1200.0).await?;
//! let rank = board.get_rank_for("alice").await?;
//! ```

pub mod config;
pub mod leaderboard;
pub mod models;
pub mod stores;
#[cfg(test)]
mod test_utils;

pub use config::{DEFAULT_PAGE_SIZE, LeaderboardOptions};
pub use leaderboard::Leaderboard;
pub use models::{MemberScore, RankWithScore, RankedMember, SortOrder};
pub use stores::{
    Batch, BatchOp, BatchReply, InMemoryRankingStore, RankingStore, RedisRankingStore,
};
