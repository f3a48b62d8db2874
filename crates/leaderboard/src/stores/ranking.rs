//! Sorted-set primitives behind a leaderboard.

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use super::batch::{Batch, BatchOp, BatchReply};
use crate::models::MemberScore;

/// Ordered-set operations against a named collection.
///
/// Each method maps to one store primitive. Ranks and range bounds are 0-based
/// store indices; turning them into leaderboard ranks is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Set a member's score, creating the member if needed.
    async fn add(&self, collection: &str, member: &str, score: f64) -> Result<()>;

    /// Add `delta` to a member's score and return the new score.
    async fn increment(&self, collection: &str, member: &str, delta: f64) -> Result<f64>;

    /// Remove a member, returning how many were removed (0 or 1).
    async fn remove(&self, collection: &str, member: &str) -> Result<u64>;

    /// Number of members in the collection.
    async fn cardinality(&self, collection: &str) -> Result<u64>;

    /// Number of members with `min <= score <= max`.
    async fn count_in_range(&self, collection: &str, min: f64, max: f64) -> Result<u64>;

    /// Position of a member counting from the lowest score.
    async fn rank_ascending(&self, collection: &str, member: &str) -> Result<Option<u64>>;

    /// Position of a member counting from the highest score.
    async fn rank_descending(&self, collection: &str, member: &str) -> Result<Option<u64>>;

    async fn score(&self, collection: &str, member: &str) -> Result<Option<f64>>;

    /// Members at positions `start..=stop`, lowest score first.
    async fn range_ascending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>>;

    /// Members at positions `start..=stop`, highest score first.
    async fn range_descending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>>;

    /// Drop the whole collection, returning how many keys were removed (0 or 1).
    async fn delete_collection(&self, collection: &str) -> Result<u64>;

    /// Run every op in `batch` as one atomic unit.
    ///
    /// Replies come back in queue order. A failure anywhere fails the whole batch.
    async fn execute(&self, collection: &str, batch: &Batch) -> Result<Vec<BatchReply>>;
}

/// Redis implementation of RankingStore.
#[derive(Clone)]
pub struct RedisRankingStore {
    conn: MultiplexedConnection,
}

impl RedisRankingStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open the single multiplexed connection this store will use.
    pub async fn connect(client: &redis::Client) -> Result<Self> {
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self::new(conn))
    }

    /// Indices past `isize::MAX` address nothing, so clamping keeps the window empty.
    fn index(value: u64) -> isize {
        isize::try_from(value).unwrap_or(isize::MAX)
    }
}

#[async_trait]
impl RankingStore for RedisRankingStore {
    async fn add(&self, collection: &str, member: &str, score: f64) -> Result<()> {
        let mut conn = self.conn.clone();

        let _: () = conn.zadd(collection, member, score).await?;
        Ok(())
    }

    async fn increment(&self, collection: &str, member: &str, delta: f64) -> Result<f64> {
        let mut conn = self.conn.clone();

        let score: f64 = conn.zincr(collection, member, delta).await?;
        Ok(score)
    }

    async fn remove(&self, collection: &str, member: &str) -> Result<u64> {
        let mut conn = self.conn.clone();

        let removed: u64 = conn.zrem(collection, member).await?;
        Ok(removed)
    }

    async fn cardinality(&self, collection: &str) -> Result<u64> {
        let mut conn = self.conn.clone();

        let count: u64 = conn.zcard(collection).await?;
        Ok(count)
    }

    async fn count_in_range(&self, collection: &str, min: f64, max: f64) -> Result<u64> {
        let mut conn = self.conn.clone();

        let count: u64 = conn.zcount(collection, min, max).await?;
        Ok(count)
    }

    async fn rank_ascending(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        let mut conn = self.conn.clone();

        let rank: Option<u64> = conn.zrank(collection, member).await?;
        Ok(rank)
    }

    async fn rank_descending(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        let mut conn = self.conn.clone();

        let rank: Option<u64> = conn.zrevrank(collection, member).await?;
        Ok(rank)
    }

    async fn score(&self, collection: &str, member: &str) -> Result<Option<f64>> {
        let mut conn = self.conn.clone();

        let score: Option<f64> = conn.zscore(collection, member).await?;
        Ok(score)
    }

    async fn range_ascending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>> {
        let mut conn = self.conn.clone();

        let pairs: Vec<(String, f64)> = conn
            .zrange_withscores(collection, Self::index(start), Self::index(stop))
            .await?;
        Ok(pairs
            .into_iter()
            .map(|(member, score)| MemberScore { member, score })
            .collect())
    }

    async fn range_descending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>> {
        let mut conn = self.conn.clone();

        let pairs: Vec<(String, f64)> = conn
            .zrevrange_withscores(collection, Self::index(start), Self::index(stop))
            .await?;
        Ok(pairs
            .into_iter()
            .map(|(member, score)| MemberScore { member, score })
            .collect())
    }

    async fn delete_collection(&self, collection: &str) -> Result<u64> {
        let mut conn = self.conn.clone();

        let deleted: u64 = conn.del(collection).await?;
        Ok(deleted)
    }

    async fn execute(&self, collection: &str, batch: &Batch) -> Result<Vec<BatchReply>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();

        // MULTI/EXEC so writers cannot interleave between the queued reads.
        let mut pipe = redis::pipe();
        pipe.atomic();
        for op in batch.ops() {
            match op {
                BatchOp::Score(member) => pipe.zscore(collection, member),
                BatchOp::RankAscending(member) => pipe.zrank(collection, member),
                BatchOp::RankDescending(member) => pipe.zrevrank(collection, member),
                BatchOp::Cardinality => pipe.zcard(collection),
            };
        }

        let values: Vec<redis::Value> = pipe.query_async(&mut conn).await?;
        if values.len() != batch.len() {
            anyhow::bail!(
                "Batch returned {} replies for {} ops",
                values.len(),
                batch.len()
            );
        }

        let mut replies = Vec::with_capacity(values.len());
        for (op, value) in batch.ops().iter().zip(values.iter()) {
            let reply = match op {
                BatchOp::Score(_) => BatchReply::Score(redis::from_redis_value(value)?),
                BatchOp::RankAscending(_) | BatchOp::RankDescending(_) => {
                    BatchReply::Rank(redis::from_redis_value(value)?)
                }
                BatchOp::Cardinality => BatchReply::Count(redis::from_redis_value(value)?),
            };
            replies.push(reply);
        }

        Ok(replies)
    }
}
