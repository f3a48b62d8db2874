//! Sorted-set stores.
//!
//! This module contains the [`RankingStore`] trait and its implementations.
//! A leaderboard is one sorted set whose key is the leaderboard name.
//!
//! ## Stores
//!
//! - **ranking** - `RankingStore` trait and the Redis implementation
//! - **in_memory** - HashMap-backed implementation with Redis ordering rules
//! - **batch** - reads queued for one atomic `MULTI`/`EXEC` round trip
//!
//! ## Redis Key Patterns
//!
//! ```text
//! {leaderboard_name}    → Sorted set of member → score
//! ```

mod batch;
mod in_memory;
mod ranking;

pub use batch::{Batch, BatchOp, BatchReply};
pub use in_memory::InMemoryRankingStore;
pub use ranking::{RankingStore, RedisRankingStore};

#[cfg(test)]
pub use ranking::MockRankingStore;
