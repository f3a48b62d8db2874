//! InMemoryRankingStore - HashMap-backed sorted sets for testing and embedding.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::batch::{Batch, BatchOp, BatchReply};
use super::ranking::RankingStore;
use crate::models::MemberScore;

type Collection = HashMap<String, f64>;

/// In-memory sorted sets with the same ordering rules as Redis.
///
/// Members sort by score, then by member bytes. Descending order is the exact
/// reverse of ascending order. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryRankingStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryRankingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<String, Collection>) -> T) -> Result<T> {
        let guard = self
            .collections
            .read()
            .map_err(|_| anyhow!("lock poisoned"))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut HashMap<String, Collection>) -> T) -> Result<T> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| anyhow!("lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

fn compare(a: (&String, &f64), b: (&String, &f64)) -> Ordering {
    a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0))
}

fn sorted_ascending(collection: &Collection) -> Vec<(&String, &f64)> {
    let mut entries: Vec<_> = collection.iter().collect();
    entries.sort_by(|a, b| compare(*a, *b));
    entries
}

fn rank_of(collection: Option<&Collection>, member: &str, descending: bool) -> Option<u64> {
    let collection = collection?;
    let target = collection.get_key_value(member)?;
    let below = collection
        .iter()
        .filter(|entry| compare(*entry, target) == Ordering::Less)
        .count() as u64;
    if descending {
        Some(collection.len() as u64 - 1 - below)
    } else {
        Some(below)
    }
}

fn window(
    collection: Option<&Collection>,
    start: u64,
    stop: u64,
    descending: bool,
) -> Vec<MemberScore> {
    let Some(collection) = collection else {
        return Vec::new();
    };
    if stop < start {
        return Vec::new();
    }
    let mut entries = sorted_ascending(collection);
    if descending {
        entries.reverse();
    }
    let take = (stop - start).saturating_add(1);
    entries
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(usize::try_from(take).unwrap_or(usize::MAX))
        .map(|(member, score)| MemberScore::new(member.clone(), *score))
        .collect()
}

fn reject_nan(value: f64) -> Result<()> {
    if value.is_nan() {
        anyhow::bail!("score is not a valid float");
    }
    Ok(())
}

#[async_trait]
impl RankingStore for InMemoryRankingStore {
    async fn add(&self, collection: &str, member: &str, score: f64) -> Result<()> {
        reject_nan(score)?;
        self.write(|collections| {
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(member.to_string(), score);
        })
    }

    async fn increment(&self, collection: &str, member: &str, delta: f64) -> Result<f64> {
        reject_nan(delta)?;
        self.write(|collections| {
            let current = collections
                .get(collection)
                .and_then(|set| set.get(member).copied())
                .unwrap_or(0.0);
            let score = current + delta;
            // Matches ZINCRBY: inf + -inf fails and leaves the member untouched.
            if score.is_nan() {
                anyhow::bail!("resulting score is not a number (NaN)");
            }
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(member.to_string(), score);
            Ok(score)
        })?
    }

    async fn remove(&self, collection: &str, member: &str) -> Result<u64> {
        self.write(|collections| {
            let Some(set) = collections.get_mut(collection) else {
                return 0;
            };
            let removed = set.remove(member).is_some();
            // Redis drops a sorted set once its last member goes.
            if set.is_empty() {
                collections.remove(collection);
            }
            u64::from(removed)
        })
    }

    async fn cardinality(&self, collection: &str) -> Result<u64> {
        self.read(|collections| {
            collections
                .get(collection)
                .map_or(0, |set| set.len() as u64)
        })
    }

    async fn count_in_range(&self, collection: &str, min: f64, max: f64) -> Result<u64> {
        self.read(|collections| {
            collections.get(collection).map_or(0, |set| {
                set.values()
                    .filter(|score| **score >= min && **score <= max)
                    .count() as u64
            })
        })
    }

    async fn rank_ascending(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        self.read(|collections| rank_of(collections.get(collection), member, false))
    }

    async fn rank_descending(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        self.read(|collections| rank_of(collections.get(collection), member, true))
    }

    async fn score(&self, collection: &str, member: &str) -> Result<Option<f64>> {
        self.read(|collections| {
            collections
                .get(collection)
                .and_then(|set| set.get(member).copied())
        })
    }

    async fn range_ascending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>> {
        self.read(|collections| window(collections.get(collection), start, stop, false))
    }

    async fn range_descending(
        &self,
        collection: &str,
        start: u64,
        stop: u64,
    ) -> Result<Vec<MemberScore>> {
        self.read(|collections| window(collections.get(collection), start, stop, true))
    }

    async fn delete_collection(&self, collection: &str) -> Result<u64> {
        self.write(|collections| u64::from(collections.remove(collection).is_some()))
    }

    async fn execute(&self, collection: &str, batch: &Batch) -> Result<Vec<BatchReply>> {
        // One lock acquisition for the whole batch keeps it atomic.
        self.read(|collections| {
            let set = collections.get(collection);
            batch
                .ops()
                .iter()
                .map(|op| match op {
                    BatchOp::Score(member) => {
                        BatchReply::Score(set.and_then(|s| s.get(member).copied()))
                    }
                    BatchOp::RankAscending(member) => {
                        BatchReply::Rank(rank_of(set, member, false))
                    }
                    BatchOp::RankDescending(member) => {
                        BatchReply::Rank(rank_of(set, member, true))
                    }
                    BatchOp::Cardinality => {
                        BatchReply::Count(set.map_or(0, |s| s.len() as u64))
                    }
                })
                .collect()
        })
    }
}
