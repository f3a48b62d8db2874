//! Leaderboard engine.
//!
//! Maps leaderboard semantics (sort order, 1-based ranks, fixed-size pages)
//! onto the primitives of a [`RankingStore`]. Rank 1 is always the best member
//! for the configured [`SortOrder`], so every rank or range lookup goes through
//! the store primitive of the same direction.

use std::sync::Arc;

use anyhow::Result;

use crate::config::{DEFAULT_PAGE_SIZE, LeaderboardOptions};
use crate::models::{MemberScore, RankWithScore, RankedMember, SortOrder};
use crate::stores::{Batch, BatchReply, RankingStore, RedisRankingStore};

/// Number of pages needed to hold `total` members.
///
/// An empty leaderboard has no pages.
pub fn page_count(total: u64, page_size: usize) -> u64 {
    total.div_ceil(page_size.max(1) as u64)
}

/// Page holding the member at 1-based `rank`. Rank 0 (absent) maps to page 0.
pub fn page_for_rank(rank: u64, page_size: usize) -> u64 {
    rank.div_ceil(page_size.max(1) as u64)
}

/// A named leaderboard over one sorted set.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn RankingStore>,
    name: String,
    page_size: usize,
    sort_order: SortOrder,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn RankingStore>, options: LeaderboardOptions) -> Self {
        let page_size = checked_page_size(&options.name, options.page_size);
        Self {
            store,
            name: options.name,
            page_size,
            sort_order: options.sort_order,
        }
    }

    /// Open a Redis connection and build a leaderboard on top of it.
    pub async fn connect(redis_url: &str, options: LeaderboardOptions) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let store = RedisRankingStore::connect(&client).await?;
        Ok(Self::new(Arc::new(store), options))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the default page size for later queries. 0 resets it to the default.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = checked_page_size(&self.name, page_size);
    }

    /// Remove the whole leaderboard. Returns 0 if it did not exist.
    pub async fn delete_leaderboard(&self) -> Result<u64> {
        let removed = self.store.delete_collection(&self.name).await?;
        tracing::info!(leaderboard = %self.name, removed, "leaderboard deleted");
        Ok(removed)
    }

    /// Set a member's score, adding the member if it is new.
    pub async fn rank_member(&self, member: &str, score: f64) -> Result<()> {
        self.store.add(&self.name, member, score).await?;
        tracing::debug!(leaderboard = %self.name, member = %member, score, "member ranked");
        Ok(())
    }

    /// Add `delta` to a member's score and return the new score.
    ///
    /// A member that is not on the board starts from 0.
    pub async fn change_score_for(&self, member: &str, delta: f64) -> Result<f64> {
        let score = self.store.increment(&self.name, member, delta).await?;
        tracing::debug!(
            leaderboard = %self.name,
            member = %member,
            delta,
            score,
            "score changed"
        );
        Ok(score)
    }

    pub async fn remove_member(&self, member: &str) -> Result<u64> {
        let removed = self.store.remove(&self.name, member).await?;
        tracing::info!(leaderboard = %self.name, member = %member, removed, "member removed");
        Ok(removed)
    }

    pub async fn member_count(&self) -> Result<u64> {
        self.store.cardinality(&self.name).await
    }

    /// Members with `min_score <= score <= max_score`. Inverted bounds count 0.
    pub async fn member_count_in_range(&self, min_score: f64, max_score: f64) -> Result<u64> {
        self.store
            .count_in_range(&self.name, min_score, max_score)
            .await
    }

    /// Number of pages, using `page_size` if given and positive, else the
    /// leaderboard's page size.
    pub async fn page_count(&self, page_size: Option<usize>) -> Result<u64> {
        let total = self.member_count().await?;
        Ok(page_count(total, self.effective_page_size(page_size)))
    }

    /// 1-based rank, or `None` if the member is not on the board.
    pub async fn get_rank_for(&self, member: &str) -> Result<Option<u64>> {
        let index = self.rank_index(member).await?;
        tracing::debug!(leaderboard = %self.name, member = %member, ?index, "rank lookup");
        Ok(index.map(|i| i + 1))
    }

    /// Current score, or `None` if the member is not on the board.
    ///
    /// Store failures are returned as errors, never folded into `None`.
    pub async fn get_score_for(&self, member: &str) -> Result<Option<f64>> {
        self.store.score(&self.name, member).await
    }

    /// Rank and score read in one atomic batch, so the pair always existed
    /// together even with concurrent writers.
    pub async fn get_rank_with_score_for(&self, member: &str) -> Result<Option<RankWithScore>> {
        let batch = self.queue_rank(Batch::new().score(member), member);
        let replies = self.store.execute(&self.name, &batch).await?;

        match replies.as_slice() {
            [BatchReply::Score(Some(score)), BatchReply::Rank(Some(index))] => {
                Ok(Some(RankWithScore {
                    rank: index + 1,
                    score: *score,
                }))
            }
            [BatchReply::Score(_), BatchReply::Rank(_)] => Ok(None),
            other => anyhow::bail!("Unexpected reply to rank and score batch: {:?}", other),
        }
    }

    /// 1-based page holding the member, or 0 if the member is not on the board.
    pub async fn get_page_for(&self, member: &str, page_size: Option<usize>) -> Result<u64> {
        let rank = self.rank_index(member).await?.map_or(0, |i| i + 1);
        Ok(page_for_rank(rank, self.effective_page_size(page_size)))
    }

    /// The best `count` members in sort order.
    pub async fn get_top(&self, count: u64) -> Result<Vec<MemberScore>> {
        self.get_top_from(0, count).await
    }

    /// `count` members in sort order, skipping the first `offset`.
    pub async fn get_top_from(&self, offset: u64, count: u64) -> Result<Vec<MemberScore>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let stop = offset.saturating_add(count - 1);
        self.range(offset, stop).await
    }

    /// Members on 1-based `page` with their ranks. Page 0 reads as page 1; a
    /// page past the end is empty.
    pub async fn get_page(
        &self,
        page: u64,
        page_size: Option<usize>,
    ) -> Result<Vec<RankedMember>> {
        let size = self.effective_page_size(page_size) as u64;
        // A page whose ranks do not fit in u64 lies past the end of any board.
        let Some((start, last_rank)) = (page.max(1) - 1)
            .checked_mul(size)
            .and_then(|start| Some((start, start.checked_add(size)?)))
        else {
            return Ok(Vec::new());
        };

        let entries = self.range(start, last_rank - 1).await?;
        Ok(entries
            .into_iter()
            .zip(start + 1..=last_rank)
            .map(|(entry, rank)| RankedMember {
                rank,
                member: entry.member,
                score: entry.score,
            })
            .collect())
    }

    fn effective_page_size(&self, page_size: Option<usize>) -> usize {
        match page_size {
            Some(size) if size > 0 => size,
            _ => self.page_size,
        }
    }

    async fn rank_index(&self, member: &str) -> Result<Option<u64>> {
        match self.sort_order {
            SortOrder::Ascending => self.store.rank_ascending(&self.name, member).await,
            SortOrder::Descending => self.store.rank_descending(&self.name, member).await,
        }
    }

    fn queue_rank(&self, batch: Batch, member: &str) -> Batch {
        match self.sort_order {
            SortOrder::Ascending => batch.rank_ascending(member),
            SortOrder::Descending => batch.rank_descending(member),
        }
    }

    async fn range(&self, start: u64, stop: u64) -> Result<Vec<MemberScore>> {
        match self.sort_order {
            SortOrder::Ascending => self.store.range_ascending(&self.name, start, stop).await,
            SortOrder::Descending => self.store.range_descending(&self.name, start, stop).await,
        }
    }
}

fn checked_page_size(name: &str, page_size: usize) -> usize {
    if page_size == 0 {
        tracing::warn!(
            leaderboard = %name,
            default = DEFAULT_PAGE_SIZE,
            "page size must be positive, using default"
        );
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}
